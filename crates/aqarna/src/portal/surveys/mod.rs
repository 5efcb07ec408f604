//! Owner satisfaction surveys.
//!
//! Responses accumulate per session and feed the authority's satisfaction
//! indicator; the CSV export carries every response with its per-area
//! breakdown.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::export::{csv_with_bom, ExportError};

/// Ratings for the individual service areas, each 1-5 when answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaScores {
    #[serde(default)]
    pub billing_clarity: Option<u8>,
    #[serde(default)]
    pub objection_handling: Option<u8>,
    #[serde(default)]
    pub union_communication: Option<u8>,
}

impl AreaScores {
    fn answered(&self) -> Vec<u8> {
        [
            self.billing_clarity,
            self.objection_handling,
            self.union_communication,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Mean of the answered areas, rounded to one decimal; 0.0 when none
    /// were answered.
    pub fn average(&self) -> f64 {
        let answered = self.answered();
        if answered.is_empty() {
            return 0.0;
        }
        let sum: u32 = answered.iter().map(|&v| u32::from(v)).sum();
        (sum as f64 / answered.len() as f64 * 10.0).round() / 10.0
    }
}

/// One submitted survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub owner: String,
    pub score: u8,
    pub areas: AreaScores,
    pub area_average: f64,
    pub comment: String,
    pub submitted: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    #[error("an overall rating is required")]
    MissingOverallScore,
    #[error("ratings run from 1 to 5 (got {0})")]
    ScoreOutOfRange(u8),
}

/// Assemble a response, enforcing the overall-rating requirement the form
/// blocks on.
pub fn build_response(
    owner: impl Into<String>,
    score: u8,
    areas: AreaScores,
    comment: impl Into<String>,
    submitted: NaiveDate,
) -> Result<SurveyResponse, SurveyError> {
    if score == 0 {
        return Err(SurveyError::MissingOverallScore);
    }
    if score > 5 {
        return Err(SurveyError::ScoreOutOfRange(score));
    }
    for area in areas.answered() {
        if !(1..=5).contains(&area) {
            return Err(SurveyError::ScoreOutOfRange(area));
        }
    }

    Ok(SurveyResponse {
        owner: owner.into(),
        score,
        areas,
        area_average: areas.average(),
        comment: comment.into(),
        submitted,
    })
}

/// Column headers as the survey export shows them, in the same order.
const SURVEY_HEADERS: [&str; 8] = [
    "المالك",
    "التقييم العام",
    "متوسط مجالات",
    "وضوح الفواتير",
    "سرعة المعالجة",
    "التواصل",
    "ملاحظات",
    "التاريخ",
];

/// Render the collected responses as a BOM-prefixed CSV document.
pub fn surveys_csv(responses: &[SurveyResponse]) -> Result<String, ExportError> {
    let area = |value: Option<u8>| value.map(|v| v.to_string()).unwrap_or_default();

    let rows: Vec<Vec<String>> = responses
        .iter()
        .map(|response| {
            vec![
                response.owner.clone(),
                response.score.to_string(),
                response.area_average.to_string(),
                area(response.areas.billing_clarity),
                area(response.areas.objection_handling),
                area(response.areas.union_communication),
                response.comment.replace('\n', " "),
                response.submitted.to_string(),
            ]
        })
        .collect();

    csv_with_bom(&SURVEY_HEADERS, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 20).expect("valid date")
    }

    #[test]
    fn overall_rating_is_mandatory() {
        let err = build_response("رنيم", 0, AreaScores::default(), "", day())
            .expect_err("zero means unanswered");
        assert_eq!(err, SurveyError::MissingOverallScore);

        let err = build_response("رنيم", 6, AreaScores::default(), "", day())
            .expect_err("out of range");
        assert_eq!(err, SurveyError::ScoreOutOfRange(6));
    }

    #[test]
    fn area_average_rounds_to_one_decimal() {
        let areas = AreaScores {
            billing_clarity: Some(4),
            objection_handling: Some(3),
            union_communication: None,
        };
        assert_eq!(areas.average(), 3.5);

        let uneven = AreaScores {
            billing_clarity: Some(5),
            objection_handling: Some(4),
            union_communication: Some(4),
        };
        assert_eq!(uneven.average(), 4.3, "13/3 rounded to one decimal");

        assert_eq!(AreaScores::default().average(), 0.0);
    }

    #[test]
    fn response_snapshots_the_average() {
        let areas = AreaScores {
            billing_clarity: Some(4),
            objection_handling: Some(5),
            union_communication: Some(3),
        };
        let response =
            build_response("رنيم", 4, areas, "خدمة جيدة", day()).expect("valid response");
        assert_eq!(response.area_average, 4.0);
    }

    #[test]
    fn csv_flattens_comment_newlines() {
        let response = build_response(
            "رنيم",
            5,
            AreaScores {
                billing_clarity: Some(5),
                objection_handling: None,
                union_communication: None,
            },
            "سطر أول\nسطر ثان",
            day(),
        )
        .expect("valid response");

        let csv = surveys_csv(&[response]).expect("csv renders");
        assert!(csv.starts_with('\u{feff}'));
        assert!(csv.contains("سطر أول سطر ثان"));
        assert!(csv.contains("\"المالك\""));
        assert!(csv.contains("\"2025-09-20\""));
    }
}
