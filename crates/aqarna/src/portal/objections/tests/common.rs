use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::portal::indicators::Region;
use crate::portal::objections::domain::{
    AttachmentRef, ImpactLevel, Objection, ObjectionCategory, ObjectionId, OwnerObjectionDraft,
    SubmitterIdentity, UnionObjectionDraft,
};
use crate::portal::objections::repository::{ObjectionRepository, RepositoryError};
use crate::portal::objections::router::objection_router;
use crate::portal::objections::service::ObjectionService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 12).expect("valid date")
}

pub(super) fn pdf_attachment(name: &str, size_bytes: u64) -> AttachmentRef {
    AttachmentRef {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        size_bytes,
    }
}

pub(super) fn owner_draft() -> OwnerObjectionDraft {
    OwnerObjectionDraft {
        invoice_id: Some("INV-240113".to_string()),
        title: "Review of the shared-services fee calculation".to_string(),
        reason: "The July invoice applies a 7% rate where the signed agreement says 5%."
            .to_string(),
        category: ObjectionCategory::BillingCalculation,
        impact: ImpactLevel::Medium,
        attachments: vec![pdf_attachment("agreement.pdf", 300 * 1024)],
        agree: true,
    }
}

pub(super) fn union_draft() -> UnionObjectionDraft {
    UnionObjectionDraft {
        title: "Review of the operating fee calculation".to_string(),
        details: "Short note for the reviewer.".to_string(),
    }
}

pub(super) fn submitter() -> SubmitterIdentity {
    SubmitterIdentity {
        name: "رنيم عبد العزيز".to_string(),
        unit: Some("A-12".to_string()),
        union_name: "اتحاد برج الندى".to_string(),
        region: Region::Riyadh,
    }
}

pub(super) fn build_service() -> (ObjectionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ObjectionService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(
    service: ObjectionService<MemoryRepository>,
) -> axum::Router {
    objection_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ObjectionId, Objection>>>,
    insertion_order: Arc<Mutex<Vec<ObjectionId>>>,
}

impl ObjectionRepository for MemoryRepository {
    fn insert(&self, objection: Objection) -> Result<Objection, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&objection.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(objection.id.clone(), objection.clone());
        self.insertion_order
            .lock()
            .expect("order mutex poisoned")
            .push(objection.id.clone());
        Ok(objection)
    }

    fn update(&self, objection: Objection) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&objection.id) {
            guard.insert(objection.id.clone(), objection);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ObjectionId) -> Result<Option<Objection>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Objection>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let order = self.insertion_order.lock().expect("order mutex poisoned");
        Ok(order
            .iter()
            .filter_map(|id| guard.get(id).cloned())
            .collect())
    }

    fn delete(&self, id: &ObjectionId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        self.insertion_order
            .lock()
            .expect("order mutex poisoned")
            .retain(|known| known != id);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ObjectionRepository for UnavailableRepository {
    fn insert(&self, _objection: Objection) -> Result<Objection, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _objection: Objection) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ObjectionId) -> Result<Option<Objection>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Objection>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn delete(&self, _id: &ObjectionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
