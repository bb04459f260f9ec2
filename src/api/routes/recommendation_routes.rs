//! Recommendation Routes
//!
//! 推荐与内容统计路由。

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;
use crate::api::handlers::recommendation_handler::*;

/// 创建推荐路由器
pub fn create_recommendation_router() -> Router<AppState> {
    Router::new()
        .route("/recommendations/:date", get(get_stored_result))
        .route(
            "/recommendations/:date/all-platforms",
            post(recommend_all_platforms),
        )
        .route("/recommendations/:date/subscribed", post(recommend_subscribed))
        .route("/recommendations/:date/content", get(get_recommended_content))
        .route("/stats/:title", get(get_content_stats))
}
