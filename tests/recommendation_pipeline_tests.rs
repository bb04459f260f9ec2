// Integration tests for the recommendation pipeline
//
// Tests cover:
// - Response parsing over multi-line model output
// - Concurrent emotion aggregation for one title
// - Entry updates with and without a personality type
// - Catalog prefix matching

use std::sync::Arc;

use moom::models::{Calendar, ContentRecord, DiaryEntry, Emoticons};
use moom::services::content_matcher::ContentMatcher;
use moom::services::emotion_stats::EmotionStatsAggregator;
use moom::services::entry_updater::{EntryUpdater, StatsOutcome};
use moom::services::response_parser::extract_recommendation;
use moom::storage::memory::{
    InMemoryCalendarStore, InMemoryContentCatalog, InMemoryEmotionStatsStore,
};
use moom::storage::repository::{CalendarStore, EmotionStatsStore};

const DATE: &str = "2024-11-20";

// ============ Parsing ============

#[test]
fn test_extract_from_multiline_model_output() {
    let raw = "오늘은 마음이 조금 무거웠던 하루였네요.\n\
               따뜻한 이야기가 도움이 될 거예요.\n\
               추천 콘텐츠: Netflix Inception";
    assert_eq!(extract_recommendation(raw).as_deref(), Some("Inception"));

    let raw = "요약입니다.\n추천 컨텐츠 Netflix 'Inception (2010)'";
    assert_eq!(extract_recommendation(raw).as_deref(), Some("Inception (2010)"));
}

#[test]
fn test_extract_absent_without_marker_on_last_line() {
    assert_eq!(extract_recommendation(""), None);
    assert_eq!(extract_recommendation("\n\n"), None);
    assert_eq!(
        extract_recommendation("추천 콘텐츠: Netflix Inception\n감사합니다."),
        None
    );
}

// ============ Aggregation ============

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_emotions_loses_no_updates() {
    let store = Arc::new(InMemoryEmotionStatsStore::new());
    let aggregator = EmotionStatsAggregator::new(store.clone());

    let mut handles = Vec::new();
    for i in 0..32 {
        let aggregator = aggregator.clone();
        handles.push(tokio::spawn(async move {
            let emotions = vec![format!("감정{}", i), format!("감정{}-b", i)];
            aggregator
                .add_emotions("Inception", "INTJ", &emotions)
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = store.find_by_title("Inception").await.unwrap().unwrap();
    assert_eq!(stats.total(), 64);
    assert_eq!(stats.total_for("INTJ"), 64);
    assert_eq!(stats.count("INTJ", "감정7"), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_add_emotions_noops() {
    let store = Arc::new(InMemoryEmotionStatsStore::new());
    let aggregator = EmotionStatsAggregator::new(store.clone());

    aggregator.add_emotions("Inception", "INTJ", &[]).await.unwrap();
    aggregator
        .add_emotions("", "INTJ", &["기쁨".to_string()])
        .await
        .unwrap();

    assert!(store.is_empty());
}

// ============ Entry updates ============

fn calendar(mbti: Option<&str>) -> Calendar {
    let calendar = Calendar::new("user-1").with_entry(
        DATE,
        DiaryEntry::new(Emoticons::with_emotions(["슬픔"]), Some("비가 왔다".into())),
    );
    match mbti {
        Some(mbti) => calendar.with_mbti(mbti),
        None => calendar,
    }
}

#[tokio::test]
async fn test_result_emotion_is_verbatim_regardless_of_parse() {
    let calendars = Arc::new(InMemoryCalendarStore::new());
    let stats = Arc::new(InMemoryEmotionStatsStore::new());
    let updater = EntryUpdater::new(calendars.clone(), EmotionStatsAggregator::new(stats));

    for raw in ["추천 콘텐츠: Netflix Inception", "그냥 쉬세요.", ""] {
        let mut calendar = calendar(Some("ENFP"));
        let applied = updater
            .apply_model_response(&mut calendar, DATE, raw)
            .await
            .unwrap();
        assert_eq!(applied.entry.result_emotion.as_deref(), Some(raw));

        let saved = calendars.find_by_user_id("user-1").await.unwrap().unwrap();
        assert_eq!(saved.entry(DATE).unwrap().result_emotion.as_deref(), Some(raw));
    }
}

#[tokio::test]
async fn test_missing_mbti_updates_entry_without_stats() {
    let calendars = Arc::new(InMemoryCalendarStore::new());
    let stats = Arc::new(InMemoryEmotionStatsStore::new());
    let updater = EntryUpdater::new(calendars, EmotionStatsAggregator::new(stats.clone()));

    let mut calendar = calendar(None);
    let applied = updater
        .apply_model_response(&mut calendar, DATE, "추천 콘텐츠: Netflix Inception")
        .await
        .unwrap();

    assert_eq!(applied.entry.recommend_content.as_deref(), Some("Inception"));
    assert_eq!(applied.stats, StatsOutcome::Skipped);
    assert!(stats.find_by_title("Inception").await.unwrap().is_none());
}

// ============ Catalog ============

#[tokio::test]
async fn test_prefix_match_tolerates_truncated_title() {
    let catalog = Arc::new(InMemoryContentCatalog::from_records(vec![
        ContentRecord::new("Interstellar", None),
        ContentRecord::new("Inception (2010)", Some("https://img.example/inception.jpg")),
    ]));
    let matcher = ContentMatcher::new(catalog);

    let found = matcher.find_by_title_prefix("Incep").await.unwrap().unwrap();
    assert_eq!(found.title, "Inception (2010)");
    assert!(matcher.find_by_title_prefix("incep").await.unwrap().is_none());
}
