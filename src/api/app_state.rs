use crate::llm::LlmClient;
use crate::services::chat::ChatService;
use crate::services::recommendation::RecommendationService;
use crate::storage::Stores;
use crate::storage::repository::ChatStore;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Recommendation flow: prompt, model call, entry update and stats
    pub recommendation_service: Arc<RecommendationService>,
    /// Chatbot questions and transcript storage
    pub chat_service: Arc<ChatService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("recommendation_service", &"Arc<RecommendationService>")
            .field("chat_service", &"Arc<ChatService>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(stores: &Stores, chat_store: Arc<dyn ChatStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            recommendation_service: Arc::new(RecommendationService::new(stores, llm.clone())),
            chat_service: Arc::new(ChatService::new(llm, chat_store)),
        }
    }
}
