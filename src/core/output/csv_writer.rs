//! CSV report writer.

use std::fs;
use std::path::Path;

use crate::core::summary::Summary;
use crate::error::Result;

/// Renders a summary as a three-section CSV report.
///
/// # Format
/// - Delimiter: `,`, line terminator: `\r\n`
/// - Section 1: `metric,key,value` scalar rows (dates only when present)
/// - Section 2: `per_user,user,count,percentage`, busiest user first
/// - Section 3: `top_words,word,count`
/// - Sections are separated by one empty line
pub fn to_csv(summary: &Summary) -> Result<String> {
    let mut writer = section_writer(Vec::new());
    writer.write_record(["metric", "key", "value"])?;
    for (metric, value) in scalar_rows(summary) {
        writer.write_record([metric, "", value.as_str()])?;
    }

    let mut writer = section_writer(end_section(writer)?);
    writer.write_record(["per_user", "user", "count", "percentage"])?;
    for (user, count) in summary.ranked_users() {
        writer.write_record([
            "per_user",
            user,
            count.to_string().as_str(),
            format!("{:.2}", summary.user_percentage(user)).as_str(),
        ])?;
    }

    let mut writer = section_writer(end_section(writer)?);
    writer.write_record(["top_words", "word", "count"])?;
    for word in &summary.top_words {
        writer.write_record(["top_words", word.word.as_str(), word.count.to_string().as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes the CSV report to `path`, replacing any existing file.
pub fn write_csv(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_csv(summary)?)?;
    Ok(())
}

fn scalar_rows(summary: &Summary) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("total_messages", summary.total_messages.to_string()),
        ("media_count", summary.media_count.to_string()),
        ("emoji_count", summary.emoji_count.to_string()),
        ("link_count", summary.link_count.to_string()),
        ("question_count", summary.question_count.to_string()),
        ("avg_message_length", format!("{:.1}", summary.avg_message_length)),
    ];
    if let Some(first) = summary.first_date {
        rows.push(("first_date", first.format("%Y-%m-%d").to_string()));
    }
    if let Some(last) = summary.last_date {
        rows.push(("last_date", last.format("%Y-%m-%d").to_string()));
    }
    rows.push(("total_days", summary.total_days.to_string()));
    rows.push((
        "messages_per_day_avg",
        format!("{:.2}", summary.messages_per_day_avg),
    ));
    rows
}

fn section_writer(buf: Vec<u8>) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(buf)
}

// A zero-field record would be written as `""`, so the separator goes in raw.
fn end_section(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    let mut buf = writer.into_inner().map_err(|e| e.into_error())?;
    buf.extend_from_slice(b"\r\n");
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Aggregator;
    use crate::message::LogicalMessage;
    use chrono::NaiveDateTime;
    use tempfile::NamedTempFile;

    fn sample_summary() -> Summary {
        let ts = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        let mut agg = Aggregator::new();
        agg.observe(
            &LogicalMessage::new("pizza tonight?")
                .with_author("Alice")
                .with_timestamp(ts("2025-09-12 21:02")),
        );
        agg.observe(
            &LogicalMessage::new("pizza yes")
                .with_author("Bob, Jr.")
                .with_timestamp(ts("2025-09-13 10:00")),
        );
        agg.observe(
            &LogicalMessage::new("great")
                .with_author("Bob, Jr.")
                .with_timestamp(ts("2025-09-13 10:05")),
        );
        agg.finish(20)
    }

    #[test]
    fn test_to_csv_layout() {
        let csv = to_csv(&sample_summary()).unwrap();
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[0], "metric,key,value");
        assert_eq!(lines[1], "total_messages,,3");
        assert_eq!(lines[6], "avg_message_length,,9.3");
        assert_eq!(lines[7], "first_date,,2025-09-12");
        assert_eq!(lines[8], "last_date,,2025-09-13");
        assert_eq!(lines[9], "total_days,,2");
        assert_eq!(lines[10], "messages_per_day_avg,,1.50");
        assert_eq!(lines[11], "");
        assert_eq!(lines[12], "per_user,user,count,percentage");
        assert_eq!(lines[13], "per_user,\"Bob, Jr.\",2,66.67");
        assert_eq!(lines[14], "per_user,Alice,1,33.33");
        assert_eq!(lines[15], "");
        assert_eq!(lines[16], "top_words,word,count");
        assert_eq!(lines[17], "top_words,pizza,2");
    }

    #[test]
    fn test_to_csv_omits_missing_dates() {
        let mut agg = Aggregator::new();
        agg.observe(&LogicalMessage::new("untimed").with_author("A"));
        let csv = to_csv(&agg.finish(5)).unwrap();
        assert!(!csv.contains("first_date"));
        assert!(csv.contains("total_days,,1\r\n"));
    }

    #[test]
    fn test_to_csv_sections_separated_by_empty_line() {
        let report = to_csv(&sample_summary()).unwrap();

        assert_eq!(report.matches("\r\n\r\n").count(), 2);
        assert!(report.contains("messages_per_day_avg,,1.50\r\n\r\nper_user,user,count,percentage\r\n"));
        assert!(report.contains("per_user,Alice,1,33.33\r\n\r\ntop_words,word,count\r\n"));
        assert!(!report.contains("\"\""));
        assert!(report.ends_with("top_words,great,1\r\n"));
    }

    #[test]
    fn test_to_csv_is_readable_by_csv_reader() {
        let report = to_csv(&sample_summary()).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(report.as_bytes());
        let total = reader
            .records()
            .map(|r| r.unwrap())
            .find(|r| r.get(0) == Some("total_messages"))
            .unwrap();
        assert_eq!(total.get(2), Some("3"));
    }

    #[test]
    fn test_write_csv() {
        let file = NamedTempFile::new().unwrap();
        let summary = sample_summary();
        write_csv(&summary, file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, to_csv(&summary).unwrap());
    }
}
