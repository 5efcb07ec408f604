use super::domain::{AttachmentRef, OwnerObjectionDraft, UnionObjectionDraft};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 120;
pub const REASON_MIN_CHARS: usize = 20;
pub const MAX_ATTACHMENTS: usize = 5;
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Which point of the submission flow is being checked. Intermediate steps
/// let a filer park a draft without the final acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Draft,
    Final,
}

/// A single violated constraint, phrased for the filer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("title must be between 3 and 120 characters (got {chars})")]
    TitleLength { chars: usize },
    #[error("reason must be at least 20 characters (got {chars})")]
    ReasonTooShort { chars: usize },
    #[error("the accuracy acknowledgement is required before submitting")]
    AgreementRequired,
    #[error("at most 5 attachments are allowed (got {count})")]
    TooManyAttachments { count: usize },
    #[error("unsupported attachment type: {name}")]
    UnsupportedAttachmentType { name: String },
    #[error("attachment {name} exceeds 5 MB ({size})")]
    AttachmentTooLarge { name: String, size: String },
}

/// Dials for the attachment limits. Defaults match the published upload
/// policy; the title/reason bounds are fixed.
#[derive(Debug, Clone)]
pub struct SubmissionRules {
    pub max_attachments: usize,
    pub max_attachment_bytes: u64,
}

impl Default for SubmissionRules {
    fn default() -> Self {
        Self {
            max_attachments: MAX_ATTACHMENTS,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
        }
    }
}

impl SubmissionRules {
    /// Check the full owner flow, reporting every violated constraint in
    /// presentation order rather than stopping at the first, so a filer
    /// sees all problems in one pass.
    pub fn check_owner(
        &self,
        draft: &OwnerObjectionDraft,
        stage: SubmissionStage,
    ) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        push_title_violation(&mut violations, &draft.title);

        let reason_chars = draft.reason.trim().chars().count();
        if reason_chars < REASON_MIN_CHARS {
            violations.push(RuleViolation::ReasonTooShort {
                chars: reason_chars,
            });
        }

        if stage == SubmissionStage::Final && !draft.agree {
            violations.push(RuleViolation::AgreementRequired);
        }

        if draft.attachments.len() > self.max_attachments {
            violations.push(RuleViolation::TooManyAttachments {
                count: draft.attachments.len(),
            });
        }

        for attachment in &draft.attachments {
            self.push_attachment_violations(&mut violations, attachment);
        }

        violations
    }

    /// Union short form: only the title is constrained; the note is
    /// optional and there are no attachments to police.
    pub fn check_union(&self, draft: &UnionObjectionDraft) -> Vec<RuleViolation> {
        let mut violations = Vec::new();
        push_title_violation(&mut violations, &draft.title);
        violations
    }

    fn push_attachment_violations(
        &self,
        violations: &mut Vec<RuleViolation>,
        attachment: &AttachmentRef,
    ) {
        if !attachment.is_allowed_type() {
            violations.push(RuleViolation::UnsupportedAttachmentType {
                name: attachment.name.clone(),
            });
        }
        if attachment.size_bytes > self.max_attachment_bytes {
            violations.push(RuleViolation::AttachmentTooLarge {
                name: attachment.name.clone(),
                size: attachment.size_label(),
            });
        }
    }
}

fn push_title_violation(violations: &mut Vec<RuleViolation>, title: &str) {
    let chars = title.trim().chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
        violations.push(RuleViolation::TitleLength { chars });
    }
}
