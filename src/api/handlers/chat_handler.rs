//! Chat API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::chat_dto::*},
    error::AppError,
};

/// Ask the chatbot a question
///
/// POST /api/v1/chat/question
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.chat_service.ask(&request.question_text).await?;
    Ok(Json(QuestionResponse { response }))
}

/// Save one question/answer exchange
///
/// POST /api/v1/chat/history
pub async fn save_chat(
    State(state): State<AppState>,
    Json(request): Json<SaveChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Saving chat for user: {}", request.user_id);
    state
        .chat_service
        .save(&request.user_id, &request.message, &request.response)
        .await?;

    Ok(Json(MessageResponse {
        message: "Chat history saved successfully".to_string(),
    }))
}

/// Get a user's chat history, oldest first
///
/// GET /api/v1/chat/history/:user_id
pub async fn get_chat_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let chat_history = state.chat_service.history(&user_id).await?;
    if chat_history.is_empty() {
        return Err(AppError::NotFound(format!(
            "No chat history found for user {}",
            user_id
        )));
    }
    Ok(Json(ChatHistoryResponse { chat_history }))
}
