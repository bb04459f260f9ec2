//! API 模块
//!
//! 提供 REST API 支持。用户身份由网关通过 `x-user-id` 头传入。

pub mod app_state;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod routes;

use std::time::Duration;

use axum::Router;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::app_state::AppState;

pub fn create_router(app_state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .merge(routes::recommendation_routes::create_recommendation_router())
        .merge(routes::chat_routes::create_chat_router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
