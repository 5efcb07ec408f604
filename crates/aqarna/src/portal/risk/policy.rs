use serde::{Deserialize, Serialize};

use super::config::RiskConfig;
use super::rules::RiskObservation;
use super::RiskSignal;

/// Qualitative bucket derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

pub(crate) fn accumulate_score(observation: &RiskObservation, config: &RiskConfig) -> u8 {
    let mut score: u8 = 0;

    if observation.overdue_ratio > config.severe_overdue_ratio {
        score += config.severe_overdue_weight;
    } else if observation.overdue_ratio > config.elevated_overdue_ratio {
        score += config.elevated_overdue_weight;
    } else if observation.overdue_ratio > 0.0 {
        score += config.any_overdue_weight;
    }

    if observation.payment_slope <= 0.0 {
        score += config.flat_slope_weight;
    }

    if observation.days_until_due <= config.imminent_due_days {
        score += config.imminent_due_weight;
    } else if observation.days_until_due <= config.near_due_days {
        score += config.near_due_weight;
    }

    score
}

pub(crate) fn bucket_level(score: u8, config: &RiskConfig) -> RiskLevel {
    if score >= config.high_level_floor {
        RiskLevel::High
    } else if score >= config.medium_level_floor {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub(crate) fn describe_signals(
    observation: &RiskObservation,
    config: &RiskConfig,
) -> Vec<RiskSignal> {
    let no_arrears = observation.overdue_ratio == 0.0;
    let rising_trend = observation.payment_slope > 0.0;
    let due_distant = observation.days_until_due > config.near_due_days;

    vec![
        RiskSignal {
            ok: no_arrears,
            label: if no_arrears {
                "no arrears outstanding"
            } else {
                "arrears outstanding"
            },
            value: format!("{}%", (observation.overdue_ratio * 100.0).round()),
        },
        RiskSignal {
            ok: rising_trend,
            label: if rising_trend {
                "payment trend rising"
            } else {
                "payment trend flat or falling"
            },
            value: format!("{:.1}", observation.payment_slope),
        },
        RiskSignal {
            ok: due_distant,
            label: if due_distant {
                "due date distant"
            } else {
                "due date imminent"
            },
            value: format!("{} day(s)", observation.days_until_due),
        },
    ]
}

pub(crate) fn recommended_actions(
    observation: &RiskObservation,
    config: &RiskConfig,
) -> Vec<String> {
    let mut actions = Vec::new();
    if observation.overdue_ratio > 0.0 {
        actions.push("Send an immediate arrears alert and payment reminder.".to_string());
    }
    if observation.payment_slope <= 0.0 {
        actions
            .push("Offer an automatic installment plan for the accumulated balance.".to_string());
    }
    if observation.days_until_due <= config.near_due_days {
        actions.push("Surface the quick-pay action at the top of the dashboard.".to_string());
    }
    actions
}
