use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use mime::Mime;
use serde::{Deserialize, Serialize};

use crate::portal::indicators::Region;

/// Identifier wrapper for tracked objections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectionId(pub String);

impl fmt::Display for ObjectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static OBJECTION_SEQUENCE: AtomicU64 = AtomicU64::new(2300);

/// Monotonic id generation keeping the familiar `OBJ-nnnn` shape.
/// The portal historically drew a random 4-digit suffix, which could
/// collide; the counter cannot.
pub(crate) fn next_objection_id() -> ObjectionId {
    let id = OBJECTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ObjectionId(format!("OBJ-{id:04}"))
}

/// Review lifecycle of an objection.
///
/// `New` and `UnderReview` are distinct states even though several list
/// views fold them together; `Accepted` and `Rejected` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionStatus {
    New,
    UnderReview,
    Accepted,
    Rejected,
}

impl ObjectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ObjectionStatus::New => "new",
            ObjectionStatus::UnderReview => "under_review",
            ObjectionStatus::Accepted => "accepted",
            ObjectionStatus::Rejected => "rejected",
        }
    }

    /// Label used by list views, which present freshly filed objections as
    /// already in review.
    pub const fn public_label(self) -> &'static str {
        match self {
            ObjectionStatus::New | ObjectionStatus::UnderReview => "under_review",
            ObjectionStatus::Accepted => "accepted",
            ObjectionStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ObjectionStatus::Accepted | ObjectionStatus::Rejected)
    }

    /// Whitelisted moves: intake may enter review, and only open
    /// objections may be decided. Nothing leaves a terminal state.
    pub const fn can_become(self, target: ObjectionStatus) -> bool {
        matches!(
            (self, target),
            (ObjectionStatus::New, ObjectionStatus::UnderReview)
                | (
                    ObjectionStatus::New | ObjectionStatus::UnderReview,
                    ObjectionStatus::Accepted | ObjectionStatus::Rejected,
                )
        )
    }

    pub fn from_label(label: &str) -> Option<ObjectionStatus> {
        match label.trim() {
            "new" => Some(ObjectionStatus::New),
            "under_review" => Some(ObjectionStatus::UnderReview),
            "accepted" => Some(ObjectionStatus::Accepted),
            "rejected" => Some(ObjectionStatus::Rejected),
            _ => None,
        }
    }
}

/// Error raised for a move the lifecycle table does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("objection is already {} and cannot become {}", .from.label(), .to.label())]
    Terminal {
        from: ObjectionStatus,
        to: ObjectionStatus,
    },
    #[error("unsupported transition from {} to {}", .from.label(), .to.label())]
    Unsupported {
        from: ObjectionStatus,
        to: ObjectionStatus,
    },
}

/// Who filed the objection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionSource {
    Union,
    Member,
}

impl ObjectionSource {
    pub const fn label(self) -> &'static str {
        match self {
            ObjectionSource::Union => "union",
            ObjectionSource::Member => "member",
        }
    }

    pub fn from_label(label: &str) -> Option<ObjectionSource> {
        match label.trim() {
            "union" => Some(ObjectionSource::Union),
            "member" => Some(ObjectionSource::Member),
            _ => None,
        }
    }
}

/// Dispute category collected by the full owner submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionCategory {
    BillingCalculation,
    DuplicateCharge,
    ServiceQuality,
    Other,
}

impl ObjectionCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ObjectionCategory::BillingCalculation => "billing_calculation",
            ObjectionCategory::DuplicateCharge => "duplicate_charge",
            ObjectionCategory::ServiceQuality => "service_quality",
            ObjectionCategory::Other => "other",
        }
    }
}

/// Declared severity collected by the full owner submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

/// Metadata for an uploaded supporting file. Only the declared content
/// type and size travel with the objection; the bytes live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl AttachmentRef {
    /// PDFs and any image type are accepted; a `.pdf` extension covers
    /// uploads whose browser left the content type blank.
    pub fn is_allowed_type(&self) -> bool {
        if let Ok(parsed) = self.content_type.parse::<Mime>() {
            if parsed == mime::APPLICATION_PDF || parsed.type_() == mime::IMAGE {
                return true;
            }
        }
        self.name.to_lowercase().ends_with(".pdf")
    }

    pub fn size_label(&self) -> String {
        let mb = self.size_bytes as f64 / (1024.0 * 1024.0);
        if mb >= 1.0 {
            format!("{mb:.2} MB")
        } else {
            format!("{:.0} KB", self.size_bytes as f64 / 1024.0)
        }
    }
}

/// Display identity of whoever files through the full owner flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitterIdentity {
    pub name: String,
    pub unit: Option<String>,
    pub union_name: String,
    pub region: Region,
}

/// Full owner submission: validated title/reason, category, impact, and
/// optional supporting files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerObjectionDraft {
    #[serde(default)]
    pub invoice_id: Option<String>,
    pub title: String,
    pub reason: String,
    pub category: ObjectionCategory,
    pub impact: ImpactLevel,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default)]
    pub agree: bool,
}

/// Lightweight form a union files on its own behalf: a title plus an
/// optional short note, no unit and no attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionObjectionDraft {
    pub title: String,
    #[serde(default)]
    pub details: String,
}

/// A tracked dispute against a billed fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objection {
    pub id: ObjectionId,
    pub title: String,
    pub reason: String,
    pub submitted_by: String,
    pub union_name: String,
    pub unit: Option<String>,
    pub region: Region,
    pub source: ObjectionSource,
    pub status: ObjectionStatus,
    pub created: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ObjectionCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
}

impl Objection {
    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().unwrap_or("—")
    }

    /// Apply a lifecycle move, rejecting anything outside the whitelist.
    pub fn transition(&mut self, target: ObjectionStatus) -> Result<(), TransitionError> {
        if !self.status.can_become(target) {
            return Err(if self.status.is_terminal() {
                TransitionError::Terminal {
                    from: self.status,
                    to: target,
                }
            } else {
                TransitionError::Unsupported {
                    from: self.status,
                    to: target,
                }
            });
        }
        self.status = target;
        Ok(())
    }
}

/// Reviewer verdict on an open objection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Accepted,
    Rejected,
}

impl ReviewDecision {
    pub const fn status(self) -> ObjectionStatus {
        match self {
            ReviewDecision::Accepted => ObjectionStatus::Accepted,
            ReviewDecision::Rejected => ObjectionStatus::Rejected,
        }
    }
}
