use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::portal::indicators::{Region, RegionScope};

use super::domain::{
    next_objection_id, Objection, ObjectionId, ObjectionSource, ObjectionStatus,
    OwnerObjectionDraft, ReviewDecision, SubmitterIdentity, TransitionError, UnionObjectionDraft,
};
use super::repository::{ObjectionRepository, RepositoryError};
use super::validation::{RuleViolation, SubmissionRules, SubmissionStage};

/// Service composing the submission rules and the repository port.
pub struct ObjectionService<R> {
    rules: SubmissionRules,
    repository: Arc<R>,
}

impl<R> ObjectionService<R>
where
    R: ObjectionRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_rules(SubmissionRules::default(), repository)
    }

    pub fn with_rules(rules: SubmissionRules, repository: Arc<R>) -> Self {
        Self { rules, repository }
    }

    /// File an objection through the full owner flow. The draft is checked
    /// at the final stage, so the acknowledgement and every attachment
    /// constraint apply.
    pub fn submit_owner(
        &self,
        draft: OwnerObjectionDraft,
        submitter: SubmitterIdentity,
        today: NaiveDate,
    ) -> Result<Objection, ObjectionServiceError> {
        let violations = self.rules.check_owner(&draft, SubmissionStage::Final);
        if !violations.is_empty() {
            return Err(ObjectionServiceError::Validation(violations));
        }

        let objection = Objection {
            id: next_objection_id(),
            title: draft.title.trim().to_string(),
            reason: draft.reason.trim().to_string(),
            submitted_by: submitter.name,
            union_name: submitter.union_name,
            unit: submitter.unit,
            region: submitter.region,
            source: ObjectionSource::Member,
            status: ObjectionStatus::New,
            created: today,
            invoice_id: draft.invoice_id,
            category: Some(draft.category),
            impact: Some(draft.impact),
            attachments: draft.attachments,
        };

        Ok(self.repository.insert(objection)?)
    }

    /// File an objection on the union's own behalf: no unit, no
    /// attachments, short-form note.
    pub fn submit_union(
        &self,
        draft: UnionObjectionDraft,
        union_name: String,
        region: Region,
        today: NaiveDate,
    ) -> Result<Objection, ObjectionServiceError> {
        let violations = self.rules.check_union(&draft);
        if !violations.is_empty() {
            return Err(ObjectionServiceError::Validation(violations));
        }

        let objection = Objection {
            id: next_objection_id(),
            title: draft.title.trim().to_string(),
            reason: draft.details.trim().to_string(),
            submitted_by: union_name.clone(),
            union_name,
            unit: None,
            region,
            source: ObjectionSource::Union,
            status: ObjectionStatus::New,
            created: today,
            invoice_id: None,
            category: None,
            impact: None,
            attachments: Vec::new(),
        };

        Ok(self.repository.insert(objection)?)
    }

    /// Move a freshly filed objection into active review.
    pub fn begin_review(&self, id: &ObjectionId) -> Result<Objection, ObjectionServiceError> {
        self.apply_transition(id, ObjectionStatus::UnderReview)
    }

    /// Record a reviewer verdict. Only open objections may be decided;
    /// a decided objection stays decided.
    pub fn review(
        &self,
        id: &ObjectionId,
        decision: ReviewDecision,
    ) -> Result<Objection, ObjectionServiceError> {
        self.apply_transition(id, decision.status())
    }

    fn apply_transition(
        &self,
        id: &ObjectionId,
        target: ObjectionStatus,
    ) -> Result<Objection, ObjectionServiceError> {
        let mut objection = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        objection.transition(target)?;
        self.repository.update(objection.clone())?;
        Ok(objection)
    }

    pub fn get(&self, id: &ObjectionId) -> Result<Objection, ObjectionServiceError> {
        let objection = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(objection)
    }

    /// Filtered listing. Pure over the stored set and order-preserving
    /// apart from the explicit created-date sort.
    pub fn list(&self, filter: &ObjectionFilter) -> Result<Vec<Objection>, ObjectionServiceError> {
        let mut matching: Vec<Objection> = self
            .repository
            .all()?
            .into_iter()
            .filter(|objection| filter.admits(objection))
            .collect();

        match filter.order {
            CreatedOrder::NewestFirst => matching.sort_by(|a, b| b.created.cmp(&a.created)),
            CreatedOrder::OldestFirst => matching.sort_by(|a, b| a.created.cmp(&b.created)),
        }

        Ok(matching)
    }

    /// Owner-list convenience removal; not a review action and carries no
    /// domain authority.
    pub fn remove(&self, id: &ObjectionId) -> Result<(), ObjectionServiceError> {
        self.repository.delete(id)?;
        Ok(())
    }
}

/// Sort direction for the created-date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatedOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Listing filter shared by the owner, union, and authority tables.
#[derive(Debug, Clone, Default)]
pub struct ObjectionFilter {
    pub query: Option<String>,
    pub status: Option<ObjectionStatus>,
    pub region: RegionScope,
    pub source: Option<ObjectionSource>,
    pub order: CreatedOrder,
}

impl ObjectionFilter {
    pub fn admits(&self, objection: &Objection) -> bool {
        if let Some(status) = self.status {
            if objection.status != status {
                return false;
            }
        }
        if let Some(source) = self.source {
            if objection.source != source {
                return false;
            }
        }
        if !self.region.admits(objection.region) {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let needle = query.to_lowercase();
                [
                    objection.id.0.as_str(),
                    objection.title.as_str(),
                    objection.submitted_by.as_str(),
                    objection.union_name.as_str(),
                ]
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Error raised by the objection service.
#[derive(Debug, thiserror::Error)]
pub enum ObjectionServiceError {
    #[error("submission rejected: {}", format_violations(.0))]
    Validation(Vec<RuleViolation>),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn format_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
