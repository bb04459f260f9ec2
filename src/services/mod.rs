//! 服务模块

pub mod chat;
pub mod content_matcher;
pub mod emotion_stats;
pub mod entry_updater;
pub mod recommendation;
pub mod response_parser;

pub use chat::ChatService;
pub use content_matcher::ContentMatcher;
pub use emotion_stats::EmotionStatsAggregator;
pub use entry_updater::{AppliedResponse, EntryUpdater, StatsOutcome};
pub use recommendation::{MatchedContent, RecommendationOutcome, RecommendationService, StoredResult};
pub use response_parser::{
    Recommendation, RecommendationMarker, extract_recommendation, parse_recommendation,
};
