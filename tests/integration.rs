//! Integration tests for the pipeline with real files

use igdigest::activity::{ListLoader, ListReport, not_following_back};
use igdigest::analysis::DailyCount;
use igdigest::prelude::*;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

fn fixtures_dir() -> &'static str {
    "tests/fixtures"
}

fn ensure_fixtures() {
    INIT.call_once(|| {
        let dir = fixtures_dir();
        if !Path::new(dir).exists() {
            fs::create_dir_all(dir).unwrap();
        }

        // Thread: newest first, mojibake, action notices, attachment-only event
        let thread = r#"{
  "participants": [{"name": "JosÃ©"}, {"name": "ann"}],
  "title": "JosÃ© and ann",
  "messages": [
    {"sender_name": "ann", "timestamp_ms": 1672621200000, "content": "good night"},
    {"sender_name": "JosÃ©", "timestamp_ms": 1672620000000, "content": "Reacted â\u009d¤ to your message"},
    {"sender_name": "JosÃ©", "timestamp_ms": 1672617600000, "photos": [{"uri": "a.jpg"}]},
    {"sender_name": "JosÃ©", "timestamp_ms": 1672614000000, "content": "cafÃ© tomorrow?"},
    {"sender_name": "ann", "timestamp_ms": 1672610400000, "content": "ann sent an attachment."},
    {"sender_name": "ann", "timestamp_ms": 1672592400000, "content": "good morning good people"}
  ]
}"#;
        fs::write(format!("{dir}/message_1.json"), thread).unwrap();

        let following = r#"{"relationships_following": [
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/zoe", "value": "zoe", "timestamp": 1650000300}]},
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/max", "value": "max", "timestamp": 1650000100}]},
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/ann", "value": "ann", "timestamp": 1650000200}]}
]}"#;
        fs::write(format!("{dir}/following.json"), following).unwrap();

        let followers = r#"[
  {"title": "", "media_list_data": [], "string_list_data": [{"href": "https://www.instagram.com/ann", "value": "ann", "timestamp": 1650000400}]}
]"#;
        fs::write(format!("{dir}/followers_1.json"), followers).unwrap();

        let liked = r#"{"likes_comment_likes": [
  {"title": "zoe", "string_list_data": [{"href": "https://www.instagram.com/p/1/", "value": "ð\u009f\u0094¥", "timestamp": 1660000000}]}
]}"#;
        fs::write(format!("{dir}/liked_comments.json"), liked).unwrap();

        fs::write(format!("{dir}/broken.json"), r#"{"messages": [ {"sender_name": "#).unwrap();
        fs::write(format!("{dir}/wrong_key.json"), r#"{"items": []}"#).unwrap();
    });
}

fn fixture(name: &str) -> String {
    ensure_fixtures();
    format!("{}/{}", fixtures_dir(), name)
}

fn utc_analyzer() -> ThreadAnalyzer {
    ThreadAnalyzer::with_config(AnalysisConfig::new().with_timezone(chrono_tz::UTC))
}

// =========================================================================
// Thread analysis
// =========================================================================

#[test]
fn test_thread_loader_reads_file() {
    let dataset = ThreadLoader::new().load_file(&fixture("message_1.json")).unwrap();
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.participants.len(), 2);
    assert!(dataset.messages[2].has_attachments());
    assert!(dataset.messages[2].content().is_none());
}

#[test]
fn test_thread_report_counts() {
    let report = utc_analyzer()
        .analyze_file(fixture("message_1.json"))
        .unwrap();

    assert_eq!(report.title.as_deref(), Some("José and ann"));
    assert_eq!(report.participants, vec!["José", "ann"]);
    assert_eq!(report.total_messages, 6);
    assert_eq!(report.content_messages, 3);
    assert_eq!(report.skipped_records, 0);
    assert_eq!(report.hour_month_matrix.total(), 6);
}

#[test]
fn test_thread_report_views() {
    let report = utc_analyzer()
        .analyze_file(fixture("message_1.json"))
        .unwrap();

    // "good" appears three times, in two records
    assert_eq!(report.word_frequency[0].word, "good");
    assert_eq!(report.word_frequency[0].count, 3);

    let senders: Vec<(&str, usize)> = report
        .sender_counts
        .iter()
        .map(|s| (s.sender.as_str(), s.count))
        .collect();
    assert_eq!(senders, vec![("ann", 2), ("José", 1)]);

    assert_eq!(
        report.daily_series,
        vec![
            DailyCount {
                date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                count: 2
            },
            DailyCount {
                date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
                count: 1
            },
        ]
    );

    let first: Vec<&str> = report.first_messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(first, vec!["good morning good people", "café tomorrow?", "good night"]);
    assert_eq!(report.first_messages[0].time, "01-01-2023 17:00");
    assert_eq!(report.last_messages, report.first_messages);
}

#[test]
fn test_thread_report_in_pacific_time() {
    let report = ThreadAnalyzer::new()
        .analyze_file(fixture("message_1.json"))
        .unwrap();

    // Everything falls on Jan 1st in UTC-8
    assert_eq!(report.daily_series.len(), 1);
    assert_eq!(report.daily_series[0].count, 3);
    // 2023-01-01T17:00Z is 09:00 in Los Angeles
    assert_eq!(report.hour_month_matrix.get(9, 1), 1);
    assert_eq!(report.timezone, "US/Pacific");
}

#[test]
fn test_report_json_roundtrip_shape() {
    let report = utc_analyzer()
        .analyze_file(fixture("message_1.json"))
        .unwrap();
    let json = to_json(&report, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["content_messages"], 3);
    assert_eq!(value["sender_counts"][0]["sender"], "ann");
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_missing_file_is_not_found() {
    let err = ThreadAnalyzer::new()
        .analyze_file("tests/fixtures/does_not_exist.json")
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn test_broken_json_is_parse_error_with_path() {
    let err = ThreadAnalyzer::new()
        .analyze_file(fixture("broken.json"))
        .unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_wrong_key_is_schema_error() {
    let err = ThreadAnalyzer::new()
        .analyze_file(fixture("wrong_key.json"))
        .unwrap_err();
    assert!(err.is_schema());

    let report = ThreadAnalyzer::with_config(AnalysisConfig::new().with_messages_key("items"))
        .analyze_file(fixture("wrong_key.json"))
        .unwrap();
    assert_eq!(report.total_messages, 0);
}

// =========================================================================
// Activity lists
// =========================================================================

#[test]
fn test_following_and_not_following_back() {
    let following = ListLoader::following()
        .load_file(&fixture("following.json"))
        .unwrap();
    let followers = ListLoader::followers()
        .load_file(&fixture("followers_1.json"))
        .unwrap();

    let missing = not_following_back(&followers, &following);
    let names: Vec<&str> = missing.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(names, vec!["zoe", "max"]);

    let bucketer = TimeBucketer::new(chrono_tz::UTC);
    let report = ListReport::new("following list", &following, 5, &bucketer)
        .with_not_following_back(&missing, &bucketer);
    assert_eq!(report.total, 3);
    assert_eq!(report.first[0].value, "max");
    assert_eq!(report.recent.last().unwrap().value, "zoe");
}

#[test]
fn test_liked_comments_are_repaired() {
    let liked = ListLoader::liked_comments()
        .load_file(&fixture("liked_comments.json"))
        .unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].value, "🔥");
    assert_eq!(liked[0].title.as_deref(), Some("zoe"));
}

#[test]
fn test_list_loaders_reject_wrong_layout() {
    let err = ListLoader::followers()
        .load_file(&fixture("following.json"))
        .unwrap_err();
    assert!(err.is_schema());

    let err = ListLoader::liked_comments()
        .load_file(&fixture("following.json"))
        .unwrap_err();
    assert!(err.is_schema());
}
