//! Chat Routes

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;
use crate::api::handlers::chat_handler::*;

/// 创建聊天路由器
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/chat/question", post(ask_question))
        .route("/chat/history", post(save_chat))
        .route("/chat/history/:user_id", get(get_chat_history))
}
