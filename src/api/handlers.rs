// src/api/handlers.rs

//! Route handlers and response envelopes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::error::AppError;
use crate::models::{ApiConfig, CourtStats, NoticeDetail, NoticeSummary};

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Query of `GET /api/notices`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<usize>,
}

/// Query of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub pages: Option<u32>,
}

/// Query of `GET /api/stats`.
#[derive(Debug, Default, Deserialize)]
pub struct PagesParams {
    pub pages: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub page: u32,
    pub limit: usize,
    pub count: usize,
    pub pages_scanned: u32,
    pub notices: Vec<NoticeSummary>,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub success: bool,
    pub notice: NoticeDetail,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub keyword: String,
    pub total_searched: usize,
    pub match_count: usize,
    pub pages_scanned: u32,
    pub notices: Vec<NoticeSummary>,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub total_count: usize,
    pub pages_requested: u32,
    pub pages_scanned: u32,
    pub court_stats: Vec<CourtStats>,
    pub scraped_at: DateTime<Utc>,
}

/// `GET /`
pub async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "bankruptcy estate notice API",
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        endpoints: state
            .endpoints
            .iter()
            .map(|(path, about)| (*about, *path))
            .collect(),
        source: state.source_url.clone(),
        timestamp: Utc::now(),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

/// `GET /api/notices?page&limit`
pub async fn list_notices(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<ListResponse> {
    let Query(params) = params.map_err(rejected)?;
    let (page, limit) = state.api.list_params(params.page, params.limit)?;

    let result = state.service.list(page, limit).await?;
    Ok(Json(ListResponse {
        success: true,
        page: result.page,
        limit: result.limit,
        count: result.notices.len(),
        pages_scanned: result.pages_scanned,
        notices: result.notices,
        scraped_at: result.scraped_at,
    }))
}

/// `GET /api/notices/:detail_id`
pub async fn notice_detail(
    State(state): State<Arc<AppState>>,
    Path(detail_id): Path<String>,
) -> ApiResult<DetailResponse> {
    if detail_id.is_empty() || !detail_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("detail_id must be numeric"));
    }

    let notice = state.service.detail(&detail_id).await?;
    Ok(Json(DetailResponse {
        success: true,
        notice,
    }))
}

/// `GET /api/search?keyword&pages`
pub async fn search_notices(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<SearchResponse> {
    let Query(params) = params.map_err(rejected)?;
    let keyword = ApiConfig::keyword(params.keyword.as_deref())?;
    let pages = state.api.page_count(params.pages)?;

    let result = state.service.search(keyword, pages).await;
    Ok(Json(SearchResponse {
        success: true,
        match_count: result.match_count(),
        keyword: result.keyword,
        total_searched: result.total_searched,
        pages_scanned: result.pages_scanned,
        notices: result.matches,
        scraped_at: result.scraped_at,
    }))
}

/// `GET /api/stats?pages`
pub async fn court_stats(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<PagesParams>, QueryRejection>,
) -> ApiResult<StatsResponse> {
    let Query(params) = params.map_err(rejected)?;
    let pages = state.api.page_count(params.pages)?;

    let report = state.service.stats(pages).await;
    Ok(Json(StatsResponse {
        success: true,
        total_count: report.total_notices,
        pages_requested: report.pages_requested,
        pages_scanned: report.pages_scanned,
        court_stats: report.courts,
        scraped_at: report.scraped_at,
    }))
}

fn invalid(message: impl Into<String>) -> ApiError {
    AppError::validation(message).into()
}

fn rejected(rejection: QueryRejection) -> ApiError {
    invalid(rejection.body_text())
}
