/// HTTP request handlers
use crate::analytics::LaunchAnalytics;
use crate::domain::{Health, LaunchDetailView};
use crate::errors::{ApiError, ApiResult};
use crate::services::{
    LaunchListView, LaunchService, ANALYTICS_ERROR_MESSAGE, DETAIL_ERROR_MESSAGE,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Most pages a single list request may load
pub const MAX_PAGES_PER_REQUEST: u32 = 10;
/// Largest page size a list request may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub launch_service: Arc<LaunchService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

fn bounded_param(
    params: &HashMap<String, String>,
    key: &str,
    max: u32,
) -> ApiResult<Option<u32>> {
    let Some(raw) = params.get(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if (1..=max).contains(&n) => Ok(Some(n)),
        _ => Err(ApiError::InvalidInput(format!(
            "{} must be an integer between 1 and {}",
            key, max
        ))),
    }
}

/// List view: `?pages=N&limit=M`
pub async fn list_launches(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> ApiResult<Json<SuccessResponse<LaunchListView>>> {
    let pages = bounded_param(&params, "pages", MAX_PAGES_PER_REQUEST)?.unwrap_or(1);
    let limit = bounded_param(&params, "limit", MAX_PAGE_SIZE)?;

    let view = state.launch_service.list_view(pages, limit).await;
    Ok(Json(SuccessResponse::new(view)))
}

/// Detail view for one launch
pub async fn get_launch_detail(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Json<SuccessResponse<LaunchDetailView>>> {
    let detail = state
        .launch_service
        .detail(&id)
        .await
        .map_err(|e| ApiError::upstream(DETAIL_ERROR_MESSAGE, e))?;
    Ok(Json(SuccessResponse::new(LaunchDetailView::from(&detail))))
}

/// Analytics view
pub async fn get_analytics(
    State(state): State<AppState>,
) -> ApiResult<Json<SuccessResponse<LaunchAnalytics>>> {
    let analytics = state
        .launch_service
        .analytics()
        .await
        .map_err(|e| ApiError::upstream(ANALYTICS_ERROR_MESSAGE, e))?;
    Ok(Json(SuccessResponse::new(analytics)))
}
