use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Objection, ObjectionId};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ObjectionRepository: Send + Sync {
    fn insert(&self, objection: Objection) -> Result<Objection, RepositoryError>;
    fn update(&self, objection: Objection) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ObjectionId) -> Result<Option<Objection>, RepositoryError>;
    fn all(&self) -> Result<Vec<Objection>, RepositoryError>;
    fn delete(&self, id: &ObjectionId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("objection already exists")]
    Conflict,
    #[error("objection not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// List-row projection with the collapsed status label the tables show.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectionView {
    pub id: ObjectionId,
    pub title: String,
    pub submitted_by: String,
    pub union_name: String,
    pub unit: String,
    pub region: &'static str,
    pub source: &'static str,
    pub status: &'static str,
    pub created: NaiveDate,
}

impl Objection {
    pub fn view(&self) -> ObjectionView {
        ObjectionView {
            id: self.id.clone(),
            title: self.title.clone(),
            submitted_by: self.submitted_by.clone(),
            union_name: self.union_name.clone(),
            unit: self.unit_label().to_string(),
            region: self.region.label(),
            source: self.source.label(),
            status: self.status.public_label(),
            created: self.created,
        }
    }
}
