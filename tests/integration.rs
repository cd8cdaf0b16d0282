//! Integration tests for end-to-end analysis of chat files.

use chatstat::config::AnalysisConfig;
use chatstat::core::ActivityPeriod;
use chatstat::prelude::*;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const SAMPLE_CHAT: &str = "\
12/09/2025, 21:00 - Alice created group \"Weekend\"
12/09/2025, 21:02 - Alice: Hey! How are you?
12/09/2025, 21:03 - Bob: I'm fine, thanks! :)
[12/09/2025, 9:05 PM] Alice: Pizza tonight?
13/09/2025, 10:15 - Bob: <Media omitted>
13/09/2025, 10:16 - Bob: pizza was great, see https://example.com
and the photos
are coming

14/09/2025, 23:30 - Carol: 😀😀 late pizza
";

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn analyze_text(text: &str) -> Summary {
    Analyzer::new().analyze_str(text).unwrap()
}

// ============================================================================
// Core scenarios
// ============================================================================

#[test]
fn test_single_android_line() {
    let summary = analyze_text("12/09/2025, 21:02 - Alice: Hey! How are you?\n");
    assert_eq!(summary.total_messages, 1);
    assert_eq!(summary.per_hour[21], 1);
    assert_eq!(summary.per_weekday.get("Friday"), 1);
    assert_eq!(summary.question_count, 1);
    assert_eq!(summary.per_user.get("Alice"), 1);
}

#[test]
fn test_ios_pm_line() {
    let summary = analyze_text("[12/09/2025, 9:02 PM] Alice: iOS format test\n");
    assert_eq!(summary.total_messages, 1);
    assert_eq!(summary.per_hour[21], 1);
    assert_eq!(summary.most_active_period, Some(ActivityPeriod::Evening));
}

#[test]
fn test_blank_line_splits_messages() {
    let summary = analyze_text(
        "12/09/2025, 21:02 - Alice: first\n\n12/09/2025, 21:03 - Alice: second\n",
    );
    assert_eq!(summary.total_messages, 2);
}

#[test]
fn test_continuation_lines_are_joined() {
    let (messages, unparsed) = reassemble([
        "12/09/2025, 21:02 - Alice: this message",
        "wraps onto",
        "three lines",
    ]);
    assert!(unparsed.is_empty());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "this message wraps onto three lines");
}

#[test]
fn test_blank_only_file_fails_with_no_samples() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "blank.txt", "\n\n   \n\r\n");

    let err = Analyzer::new().analyze_path(&path).unwrap_err();
    assert!(err.is_no_messages());
    assert_eq!(err.unparsed_samples(), Some(&[][..]));
}

#[test]
fn test_unrecognised_file_reports_samples() {
    let dir = tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "other.txt",
        "2025-09-12T21:02:00Z Alice hi\n2025-09-12T21:03:00Z Bob hey\n",
    );

    let err = analyze(&path, 20, false).unwrap_err();
    assert_eq!(
        err.unparsed_samples().unwrap(),
        ["2025-09-12T21:02:00Z Alice hi", "2025-09-12T21:03:00Z Bob hey"]
    );
    assert!(err.to_string().contains("dd/mm/yyyy, hh:mm - Name: Message"));
}

#[test]
fn test_analysis_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "chat.txt", SAMPLE_CHAT);

    let first = analyze(&path, 20, false).unwrap();
    let second = analyze(&path, 20, false).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Full sample
// ============================================================================

#[test]
fn test_sample_chat_counters() {
    let summary = analyze_text(SAMPLE_CHAT);

    assert_eq!(summary.total_messages, 7);
    assert_eq!(
        summary.ranked_users(),
        [("Bob", 3), ("Alice", 2), ("Carol", 1)]
    );
    assert_eq!(summary.media_count, 1);
    assert_eq!(summary.link_count, 1);
    assert_eq!(summary.question_count, 2);
    assert_eq!(summary.emoji_count, 2);
    assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2025, 9, 12));
    assert_eq!(summary.last_date, NaiveDate::from_ymd_opt(2025, 9, 14));
    assert_eq!(summary.total_days, 3);
    assert_eq!(summary.daily_series(), [
        ("2025-09-12", 4),
        ("2025-09-13", 2),
        ("2025-09-14", 1),
    ]);
    assert_eq!(summary.top_words[0].word, "pizza");
    assert_eq!(summary.top_words[0].count, 3);
    assert_eq!(
        summary.longest_message,
        "pizza was great, see https://example.com and the photos are coming"
    );
}

#[test]
fn test_sample_chat_series() {
    let summary = analyze_text(SAMPLE_CHAT);

    assert_eq!(
        summary.hourly_series(),
        [("10:00".to_string(), 2), ("21:00".to_string(), 4), ("23:00".to_string(), 1)]
    );
    assert_eq!(
        summary.weekday_series(),
        [("Friday", 4), ("Saturday", 2), ("Sunday", 1)]
    );
    assert_eq!(
        summary.period_series(),
        [
            (ActivityPeriod::Morning, 2),
            (ActivityPeriod::Afternoon, 0),
            (ActivityPeriod::Evening, 4),
            (ActivityPeriod::Night, 1),
        ]
    );
}

#[test]
fn test_sample_chat_insights() {
    let summary = analyze_text(SAMPLE_CHAT);
    assert_eq!(summary.insights[0], "📊 Analyzed 7 messages across 3 days");
    assert_eq!(summary.insights[1], "💬 Average of 2.3 messages per day");
    assert!(
        summary
            .insights
            .contains(&"🏆 Bob is the most active with 3 messages (42.9%)".to_string())
    );
    assert!(
        summary
            .insights
            .contains(&"⏰ Most active time: Evening (4 messages)".to_string())
    );
}

// ============================================================================
// Grammars
// ============================================================================

#[test]
fn test_all_timestamp_layouts() {
    let text = "\
12/09/2025, 9:02 pm - A: android twelve hour
12/09/2025, 21:03 - B: android twenty four
[12/09/2025, 9:04:10 PM] C: ios
12-09-2025 21:05 D: space separated
12.09.2025, 21:06 \u{2013} E: dotted
";
    let summary = analyze_text(text);
    assert_eq!(summary.total_messages, 5);
    assert_eq!(summary.per_user.len(), 5);
    assert_eq!(summary.per_hour[21], 5);
    assert_eq!(summary.per_day.get("2025-09-12"), 5);
}

#[test]
fn test_month_first_fallback_and_two_digit_year() {
    let summary = analyze_text("09/25/25, 08:00 - A: US date\n");
    assert_eq!(summary.first_date, NaiveDate::from_ymd_opt(2025, 9, 25));
}

#[test]
fn test_unresolvable_date_still_counts() {
    let summary = analyze_text("45/45/2025, 21:02 - Alice: odd date\n");
    assert_eq!(summary.total_messages, 1);
    assert_eq!(summary.per_user.get("Alice"), 1);
    assert!(summary.per_day.is_empty());
    assert_eq!(summary.timed_messages(), 0);
    assert_eq!(summary.total_days, 1);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_top_n_limits_words() {
    let summary = Analyzer::with_config(AnalysisConfig::new().with_top_n(2))
        .analyze_str(SAMPLE_CHAT)
        .unwrap();
    assert_eq!(summary.top_words.len(), 2);
}

#[test]
fn test_reader_and_file_agree() {
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "chat.txt", SAMPLE_CHAT);

    let from_file = Analyzer::new().analyze_path(&path).unwrap();
    let from_reader = Analyzer::new()
        .analyze_reader(std::io::Cursor::new(SAMPLE_CHAT.as_bytes()))
        .unwrap();
    assert_eq!(from_file, from_reader);
}

#[test]
fn test_forced_image_uses_extractor() {
    let analyzer = Analyzer::new().with_extractor(|_: &std::path::Path| {
        Ok::<String, ImageErrorKind>(SAMPLE_CHAT.to_string())
    });
    let summary = analyzer
        .analyze(&ContentSource::Image("capture.dat".into()))
        .unwrap();
    assert_eq!(summary, analyze_text(SAMPLE_CHAT));
}

#[cfg(feature = "csv-output")]
#[test]
fn test_csv_total_matches_summary() {
    let summary = analyze_text(SAMPLE_CHAT);
    let csv = to_csv(&summary).unwrap();

    let total_row = csv
        .lines()
        .find(|line| line.starts_with("total_messages,"))
        .unwrap();
    assert_eq!(total_row.trim_end(), "total_messages,,7");
}
