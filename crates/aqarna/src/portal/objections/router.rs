use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use crate::portal::indicators::RegionScope;

use super::domain::{
    ObjectionId, ObjectionSource, ObjectionStatus, OwnerObjectionDraft, ReviewDecision,
    SubmitterIdentity, UnionObjectionDraft,
};
use super::repository::{ObjectionRepository, RepositoryError};
use super::service::{CreatedOrder, ObjectionFilter, ObjectionService, ObjectionServiceError};

/// Router builder exposing HTTP endpoints for submission, triage, and
/// tracking.
pub fn objection_router<R>(service: Arc<ObjectionService<R>>) -> Router
where
    R: ObjectionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/objections",
            post(submit_owner_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/objections/union", post(submit_union_handler::<R>))
        .route(
            "/api/v1/objections/:objection_id",
            get(detail_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/objections/:objection_id/review",
            post(review_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerSubmitRequest {
    pub(crate) draft: OwnerObjectionDraft,
    pub(crate) submitter: SubmitterIdentity,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnionSubmitRequest {
    pub(crate) draft: UnionObjectionDraft,
    #[serde(rename = "union")]
    pub(crate) union_name: String,
    pub(crate) region: crate::portal::indicators::Region,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    pub(crate) decision: ReviewDecision,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    q: Option<String>,
    status: Option<String>,
    source: Option<String>,
    region: Option<String>,
    order: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> Result<ObjectionFilter, String> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                ObjectionStatus::from_label(raw).ok_or_else(|| format!("unknown status '{raw}'"))?,
            ),
        };
        let source = match self.source.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                ObjectionSource::from_label(raw).ok_or_else(|| format!("unknown source '{raw}'"))?,
            ),
        };
        let region = match self.region.as_deref() {
            None => RegionScope::All,
            Some(raw) => {
                RegionScope::from_label(raw).ok_or_else(|| format!("unknown region '{raw}'"))?
            }
        };
        let order = match self.order.as_deref().map(str::trim) {
            None | Some("") | Some("newest_first") => CreatedOrder::NewestFirst,
            Some("oldest_first") => CreatedOrder::OldestFirst,
            Some(raw) => return Err(format!("unknown order '{raw}'")),
        };

        Ok(ObjectionFilter {
            query: self.q,
            status,
            region,
            source,
            order,
        })
    }
}

pub(crate) async fn submit_owner_handler<R>(
    State(service): State<Arc<ObjectionService<R>>>,
    axum::Json(request): axum::Json<OwnerSubmitRequest>,
) -> Response
where
    R: ObjectionRepository + 'static,
{
    let today = Local::now().date_naive();
    submission_response(service.submit_owner(request.draft, request.submitter, today))
}

pub(crate) async fn submit_union_handler<R>(
    State(service): State<Arc<ObjectionService<R>>>,
    axum::Json(request): axum::Json<UnionSubmitRequest>,
) -> Response
where
    R: ObjectionRepository + 'static,
{
    let today = Local::now().date_naive();
    submission_response(service.submit_union(
        request.draft,
        request.union_name,
        request.region,
        today,
    ))
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ObjectionService<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: ObjectionRepository + 'static,
{
    let filter = match params.into_filter() {
        Ok(filter) => filter,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.list(&filter) {
        Ok(objections) => {
            let views: Vec<_> = objections.iter().map(|o| o.view()).collect();
            let payload = json!({ "total": views.len(), "objections": views });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<ObjectionService<R>>>,
    Path(objection_id): Path<String>,
) -> Response
where
    R: ObjectionRepository + 'static,
{
    match service.get(&ObjectionId(objection_id)) {
        Ok(objection) => (StatusCode::OK, axum::Json(objection)).into_response(),
        Err(ObjectionServiceError::Repository(RepositoryError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ObjectionService<R>>>,
    Path(objection_id): Path<String>,
) -> Response
where
    R: ObjectionRepository + 'static,
{
    match service.remove(&ObjectionId(objection_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ObjectionServiceError::Repository(RepositoryError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<ObjectionService<R>>>,
    Path(objection_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: ObjectionRepository + 'static,
{
    match service.review(&ObjectionId(objection_id), request.decision) {
        Ok(objection) => (StatusCode::OK, axum::Json(objection.view())).into_response(),
        Err(ObjectionServiceError::Transition(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(ObjectionServiceError::Repository(RepositoryError::NotFound)) => not_found(),
        Err(error) => internal_error(error),
    }
}

fn submission_response(
    result: Result<super::domain::Objection, ObjectionServiceError>,
) -> Response {
    match result {
        Ok(objection) => (StatusCode::ACCEPTED, axum::Json(objection.view())).into_response(),
        Err(ObjectionServiceError::Validation(violations)) => {
            let errors: Vec<String> = violations.iter().map(ToString::to_string).collect();
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ObjectionServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "objection already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

fn not_found() -> Response {
    let payload = json!({ "error": "objection not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: ObjectionServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
