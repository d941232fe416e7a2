//! HTTP handlers for the REST API.
//!
//! Each handler validates its input, delegates to the service layer and maps
//! service errors onto HTTP status codes via [`AppError`].

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{
    BasicAvailabilityParams, BasicAvailabilityRequest, EnhancedAvailabilityParams, HealthResponse,
    SlotsResponse,
};
use super::error::{AppError, FieldIssue};
use super::state::AppState;
use crate::api::EnhancedAvailability;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Basic Availability
// =============================================================================

/// GET /v1/availability
///
/// Query params: `location_id`, `offering_id`, `date` (YYYY-MM-DD),
/// `duration` (optional minutes override).
pub async fn get_availability(
    State(state): State<AppState>,
    Query(params): Query<BasicAvailabilityParams>,
) -> HandlerResult<SlotsResponse> {
    let query = params.validate().map_err(AppError::Validation)?;
    let slots = services::location_availability(state.repository.as_ref(), &query).await?;
    Ok(Json(SlotsResponse { slots }))
}

/// POST /v1/availability
///
/// Same computation as the GET variant, parameters in the JSON body.
pub async fn post_availability(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> HandlerResult<SlotsResponse> {
    // Deserialize manually so type mismatches surface as 400 field issues
    // instead of an extractor rejection.
    let request: BasicAvailabilityRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(vec![FieldIssue::new("body", e.to_string())]))?;
    let query = request.validate().map_err(AppError::Validation)?;
    let slots = services::location_availability(state.repository.as_ref(), &query).await?;
    Ok(Json(SlotsResponse { slots }))
}

// =============================================================================
// Staff-Aware Availability
// =============================================================================

/// GET /v1/availability/enhanced
///
/// Query params: `locationId`, `offeringId`, `date`, `staffId` (optional),
/// `aggregated` (optional, `"true"`), `duration` (optional minutes override).
///
/// The response shape is discriminated by its `type` field: `individual`
/// when a staff member was requested, `aggregated` for the capacity rollup,
/// `multi` for the per-staff breakdown.
pub async fn get_enhanced_availability(
    State(state): State<AppState>,
    Query(params): Query<EnhancedAvailabilityParams>,
) -> HandlerResult<EnhancedAvailability> {
    let query = params.validate().map_err(AppError::Validation)?;
    let response = services::staff_availability(state.repository.as_ref(), &query).await?;
    Ok(Json(response))
}
