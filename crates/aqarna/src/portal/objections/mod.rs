//! Objection intake, triage, and tracking.
//!
//! An objection is a formal dispute against a billed fee. Owners file
//! through a validated full form (reason, category, impact, attachments);
//! unions file a short form on their own behalf. Review moves through a
//! fixed lifecycle whose terminal states cannot be re-opened.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AttachmentRef, ImpactLevel, Objection, ObjectionCategory, ObjectionId, ObjectionSource,
    ObjectionStatus, OwnerObjectionDraft, ReviewDecision, SubmitterIdentity, TransitionError,
    UnionObjectionDraft,
};
pub use repository::{ObjectionRepository, ObjectionView, RepositoryError};
pub use router::objection_router;
pub use service::{
    CreatedOrder, ObjectionFilter, ObjectionService, ObjectionServiceError,
};
pub use validation::{
    RuleViolation, SubmissionRules, SubmissionStage, MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES,
    REASON_MIN_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
