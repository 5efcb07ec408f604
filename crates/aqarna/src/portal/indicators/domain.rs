use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Administrative regions the national index is broken down by.
///
/// Display labels stay in Arabic because they are the values carried by the
/// dataset itself and by the CSV exports the authority publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "الرياض")]
    Riyadh,
    #[serde(rename = "مكة")]
    Makkah,
    #[serde(rename = "الشرقية")]
    Eastern,
    #[serde(rename = "المدينة")]
    Madinah,
    #[serde(rename = "عسير")]
    Asir,
    #[serde(rename = "تبوك")]
    Tabuk,
    #[serde(rename = "حائل")]
    Hail,
    #[serde(rename = "جازان")]
    Jazan,
    #[serde(rename = "نجران")]
    Najran,
    #[serde(rename = "القصيم")]
    Qassim,
    #[serde(rename = "الباحة")]
    Baha,
    #[serde(rename = "الجوف")]
    Jouf,
}

impl Region {
    pub const fn label(self) -> &'static str {
        match self {
            Region::Riyadh => "الرياض",
            Region::Makkah => "مكة",
            Region::Eastern => "الشرقية",
            Region::Madinah => "المدينة",
            Region::Asir => "عسير",
            Region::Tabuk => "تبوك",
            Region::Hail => "حائل",
            Region::Jazan => "جازان",
            Region::Najran => "نجران",
            Region::Qassim => "القصيم",
            Region::Baha => "الباحة",
            Region::Jouf => "الجوف",
        }
    }

    pub const fn ordered() -> [Region; 12] {
        [
            Region::Riyadh,
            Region::Makkah,
            Region::Eastern,
            Region::Madinah,
            Region::Asir,
            Region::Tabuk,
            Region::Hail,
            Region::Jazan,
            Region::Najran,
            Region::Qassim,
            Region::Baha,
            Region::Jouf,
        ]
    }

    pub fn from_label(label: &str) -> Option<Region> {
        Region::ordered()
            .into_iter()
            .find(|region| region.label() == label.trim())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Region selection for filtered views: everything, or one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionScope {
    #[default]
    All,
    Only(Region),
}

/// Label the all-regions scope serializes to.
pub const ALL_REGIONS_LABEL: &str = "الكل";

impl RegionScope {
    pub fn admits(self, region: Region) -> bool {
        match self {
            RegionScope::All => true,
            RegionScope::Only(selected) => selected == region,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionScope::All => ALL_REGIONS_LABEL,
            RegionScope::Only(region) => region.label(),
        }
    }

    pub fn from_label(label: &str) -> Option<RegionScope> {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed == ALL_REGIONS_LABEL {
            return Some(RegionScope::All);
        }
        Region::from_label(trimmed).map(RegionScope::Only)
    }
}

impl Serialize for RegionScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RegionScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RegionScope::from_label(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown region '{raw}'")))
    }
}

/// Calendar quarter, each owning its fixed 3-month set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const fn months(self) -> [u32; 3] {
        match self {
            Quarter::Q1 => [1, 2, 3],
            Quarter::Q2 => [4, 5, 6],
            Quarter::Q3 => [7, 8, 9],
            Quarter::Q4 => [10, 11, 12],
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    pub const fn ordered() -> [Quarter; 4] {
        [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4]
    }

    /// The quarter whose month set contains `month` (1-12).
    pub fn containing(month: u32) -> Option<Quarter> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }
}

/// Month key in `YYYY-MM` form, the grain of the national dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Option<PeriodKey> {
        (1..=12).contains(&month).then_some(PeriodKey { year, month })
    }

    pub fn parse(raw: &str) -> Option<PeriodKey> {
        let (year, month) = raw.trim().split_once('-')?;
        PeriodKey::new(year.parse().ok()?, month.parse().ok()?)
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PeriodKey::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("expected YYYY-MM month key, got '{raw}'")))
    }
}

/// One month of indicator readings reported for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalRow {
    pub month: PeriodKey,
    pub region: Region,
    pub owner_satisfaction: u32,
    pub payment_rate: u32,
    pub objections_open: u32,
    pub compliance_rate: u32,
}
