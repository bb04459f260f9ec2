//! Recommendation API Handlers
//!
//! HTTP handlers for generating, reading and matching daily recommendations.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::recommendation_dto::*, extract::UserId},
    error::AppError,
    llm::prompts::PromptMode,
};

/// Reject anything that is not a calendar date in `YYYY-MM-DD` form
pub(crate) fn validate_date(date: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("Invalid date format: {}", date)))
}

async fn recommend(
    state: &AppState,
    user_id: &str,
    date: &str,
    mode: PromptMode,
) -> Result<RecommendResponse, AppError> {
    validate_date(date)?;
    let outcome = state
        .recommendation_service
        .recommend(user_id, date, mode)
        .await?;
    Ok(RecommendResponse::from(outcome))
}

/// Recommend content from any platform
///
/// POST /api/v1/recommendations/:date/all-platforms
pub async fn recommend_all_platforms(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Recommending (all platforms) for user {} on {}", user_id, date);
    let response = recommend(&state, &user_id, &date, PromptMode::AllPlatforms).await?;
    Ok(Json(response))
}

/// Recommend content from the user's subscribed platform
///
/// POST /api/v1/recommendations/:date/subscribed
pub async fn recommend_subscribed(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Recommending (subscribed) for user {} on {}", user_id, date);
    let response = recommend(&state, &user_id, &date, PromptMode::SubscribedPlatform).await?;
    Ok(Json(response))
}

/// Get the stored analysis for a date
///
/// GET /api/v1/recommendations/:date
pub async fn get_stored_result(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_date(&date)?;
    let result = state
        .recommendation_service
        .stored_result(&user_id, &date)
        .await?;
    Ok(Json(StoredResultResponse::from(result)))
}

/// Get catalog details for the stored recommendation
///
/// GET /api/v1/recommendations/:date/content
pub async fn get_recommended_content(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    validate_date(&date)?;
    let matched = state
        .recommendation_service
        .recommended_content(&user_id, &date)
        .await?;
    Ok(Json(RecommendContentResponse::from(matched)))
}

/// Get emotion statistics for a content title
///
/// GET /api/v1/stats/:title
pub async fn get_content_stats(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting emotion stats for: {}", title);
    let stats = state.recommendation_service.content_stats(&title).await?;
    Ok(Json(stats))
}
