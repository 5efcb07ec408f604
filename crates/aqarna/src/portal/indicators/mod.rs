//! National indicator aggregation for the authority view.
//!
//! The dataset is a flat list of per-region monthly readings; everything
//! here is a pure fold over that list: quarter/region filtering, per-month
//! aggregation, KPI roll-up, the coverage-site directory, and CSV export.

mod aggregate;
mod domain;
mod export;
mod sites;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, filter_rows, kpis, IndicatorFilter, KpiSet, MonthlyAggregate};
pub use domain::{NationalRow, PeriodKey, Quarter, Region, RegionScope, ALL_REGIONS_LABEL};
pub use export::{national_index_csv, national_index_file_name};
pub use sites::{sites_in_scope, UnionSite};
