//! Delinquency risk scoring for an owner's payment behavior.
//!
//! A rule-based heuristic, not a statistical model: three observations
//! (overdue ratio, payment trend, next due date) accumulate fixed weights
//! into a 0-100 score, bucketed into low/medium/high. Pure over its
//! inputs, so dashboards recompute it freely.

mod config;
mod policy;
mod rules;


pub use config::RiskConfig;
pub use policy::RiskLevel;

use chrono::NaiveDate;
use serde::Serialize;

use crate::portal::billing::{Invoice, MonthlyRow};

/// Stateless evaluator applying the configured thresholds and weights.
pub struct RiskEngine {
    config: RiskConfig,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Assess the trailing six months of history plus the nearest unpaid
    /// invoice as of `today`.
    pub fn assess(
        &self,
        rows: &[MonthlyRow],
        invoices: &[Invoice],
        today: NaiveDate,
    ) -> RiskAssessment {
        let observation = rules::observe(rows, invoices, today);

        let score = policy::accumulate_score(&observation, &self.config);
        let level = policy::bucket_level(score, &self.config);
        let signals = policy::describe_signals(&observation, &self.config);
        let recommended_actions = policy::recommended_actions(&observation, &self.config);

        RiskAssessment {
            score,
            level,
            signals,
            recommended_actions,
            overdue_ratio: observation.overdue_ratio,
            payment_slope: observation.payment_slope,
            days_until_due: observation.days_until_due,
        }
    }
}

/// One human-readable indicator backing the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskSignal {
    pub ok: bool,
    pub label: &'static str,
    pub value: String,
}

/// Derived assessment; recomputed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub signals: Vec<RiskSignal>,
    pub recommended_actions: Vec<String>,
    pub overdue_ratio: f64,
    pub payment_slope: f64,
    pub days_until_due: i64,
}
