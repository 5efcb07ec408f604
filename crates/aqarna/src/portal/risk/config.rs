use serde::{Deserialize, Serialize};

/// Threshold and weight dials for the delinquency heuristic.
///
/// The defaults are the portal's published model; dashboards across roles
/// quote the same numbers, so changing them is a product decision, not a
/// tuning knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub severe_overdue_ratio: f64,
    pub elevated_overdue_ratio: f64,
    pub severe_overdue_weight: u8,
    pub elevated_overdue_weight: u8,
    pub any_overdue_weight: u8,
    pub flat_slope_weight: u8,
    pub imminent_due_days: i64,
    pub near_due_days: i64,
    pub imminent_due_weight: u8,
    pub near_due_weight: u8,
    pub high_level_floor: u8,
    pub medium_level_floor: u8,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            severe_overdue_ratio: 0.35,
            elevated_overdue_ratio: 0.15,
            severe_overdue_weight: 50,
            elevated_overdue_weight: 25,
            any_overdue_weight: 10,
            flat_slope_weight: 20,
            imminent_due_days: 7,
            near_due_days: 15,
            imminent_due_weight: 20,
            near_due_weight: 10,
            high_level_floor: 60,
            medium_level_floor: 25,
        }
    }
}
