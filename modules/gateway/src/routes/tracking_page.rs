use axum::extract::{Path, State};
use axum::Json;
use kanau::processor::Processor;

use tracking::services::query::ResolveTracking;

use crate::api::TrackingResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Public lookup behind the tracking page; the admin detail view calls the
/// same endpoint with the same contract.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<TrackingResponse>, ApiError> {
    let record = state
        .tracking
        .process(ResolveTracking { tracking_number })
        .await
        .map_err(|e| match e {
            tracking::Error::NotFound => {
                ApiError::NotFound("Tracking number not found".to_owned())
            }
            other => ApiError::from(other),
        })?;
    Ok(Json(TrackingResponse::from(&record)))
}
