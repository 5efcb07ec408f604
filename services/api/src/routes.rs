use crate::infra::{deserialize_optional_date, seed_national_rows, seed_union_sites, AppState};
use aqarna::portal::billing::{Invoice, MonthlyRow};
use aqarna::portal::indicators::{
    aggregate, kpis, sites_in_scope, IndicatorFilter, KpiSet, MonthlyAggregate,
};
use aqarna::portal::objections::{objection_router, ObjectionRepository, ObjectionService};
use aqarna::portal::risk::{RiskAssessment, RiskEngine};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct NationalIndicatorsRequest {
    #[serde(flatten)]
    pub(crate) filter: IndicatorFilter,
    #[serde(default)]
    pub(crate) include_sites: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NationalIndicatorsResponse {
    pub(crate) year: i32,
    pub(crate) quarter: &'static str,
    pub(crate) region: &'static str,
    pub(crate) series: Vec<MonthlyAggregate>,
    pub(crate) kpis: KpiSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sites: Option<Vec<SiteEntry>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SiteEntry {
    pub(crate) name: String,
    pub(crate) region: &'static str,
    pub(crate) units: u32,
    pub(crate) open_objections: u32,
    pub(crate) satisfaction: u32,
    pub(crate) collection: u32,
    pub(crate) maps_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RiskAssessmentRequest {
    pub(crate) monthly: Vec<MonthlyRow>,
    #[serde(default)]
    pub(crate) invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn with_portal_routes<R>(service: Arc<ObjectionService<R>>) -> axum::Router
where
    R: ObjectionRepository + 'static,
{
    objection_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/indicators/national",
            axum::routing::post(national_indicators_endpoint),
        )
        .route(
            "/api/v1/risk/assessment",
            axum::routing::post(risk_assessment_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn national_indicators_endpoint(
    Json(payload): Json<NationalIndicatorsRequest>,
) -> Json<NationalIndicatorsResponse> {
    let NationalIndicatorsRequest {
        filter,
        include_sites,
    } = payload;

    let rows = seed_national_rows();
    let series = aggregate(&rows, &filter);
    let summary = kpis(&series);

    let sites = include_sites.then(|| {
        let directory = seed_union_sites();
        sites_in_scope(&directory, filter.region)
            .into_iter()
            .map(|site| SiteEntry {
                name: site.name.clone(),
                region: site.region.label(),
                units: site.units,
                open_objections: site.open_objections,
                satisfaction: site.satisfaction,
                collection: site.collection,
                maps_url: site.maps_search_url(),
            })
            .collect()
    });

    Json(NationalIndicatorsResponse {
        year: filter.year,
        quarter: filter.quarter.label(),
        region: filter.region.label(),
        series,
        kpis: summary,
        sites,
    })
}

pub(crate) async fn risk_assessment_endpoint(
    Json(payload): Json<RiskAssessmentRequest>,
) -> Json<RiskAssessment> {
    let RiskAssessmentRequest {
        monthly,
        invoices,
        today,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let assessment = RiskEngine::default().assess(&monthly, &invoices, today);
    Json(assessment)
}
