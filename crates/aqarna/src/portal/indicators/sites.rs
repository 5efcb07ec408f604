use serde::{Deserialize, Serialize};

use super::domain::{Region, RegionScope};

/// Directory row for an association site shown on the authority's coverage
/// table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionSite {
    pub name: String,
    pub region: Region,
    pub units: u32,
    pub open_objections: u32,
    pub satisfaction: u32,
    pub collection: u32,
}

impl UnionSite {
    /// Map deep link built from the site name and region label. The portal
    /// never tracks coordinates, only a text query.
    pub fn maps_search_url(&self) -> String {
        let query = format!("{} {}", self.name, self.region.label());
        format!(
            "https://www.google.com/maps/search/?api=1&query={}",
            urlencoding::encode(&query)
        )
    }
}

/// Sites visible under the selected region scope, in directory order.
pub fn sites_in_scope<'a>(sites: &'a [UnionSite], scope: RegionScope) -> Vec<&'a UnionSite> {
    sites
        .iter()
        .filter(|site| scope.admits(site.region))
        .collect()
}
