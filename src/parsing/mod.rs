//! Line-level parsing: timestamp grammars, author splitting and timestamp
//! resolution.
//!
//! [`parse_line`] combines the three steps into the head of a logical
//! message. The reassembler in [`crate::core::reassembler`] decides what to
//! do with lines that don't parse.

pub mod author;
pub mod grammar;
pub mod timestamp;

use chrono::NaiveDateTime;

pub use author::{AuthorSplit, MAX_AUTHOR_CHARS, SYSTEM_PREFIXES, is_system_author, split_author};
pub use grammar::{ParsedLine, TimestampGrammar, classify_line};
pub use timestamp::{Meridiem, resolve_timestamp, split_meridiem};

/// A line that starts a new logical message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHead {
    /// Resolved timestamp; absent if the date/time tokens were unusable
    pub timestamp: Option<NaiveDateTime>,
    /// Author, absent for system text
    pub author: Option<String>,
    /// First fragment of the message body
    pub message: String,
}

/// Parses one physical line into a message head.
///
/// Returns `None` when the line matches no timestamp grammar, which makes it
/// a continuation line (or an unparsed line if no message is open).
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::parse_line;
///
/// let head = parse_line("12/09/2025, 21:02 - Alice: Hey! How are you?").unwrap();
/// assert_eq!(head.author.as_deref(), Some("Alice"));
/// assert_eq!(head.message, "Hey! How are you?");
/// assert_eq!(head.timestamp.unwrap().to_string(), "2025-09-12 21:02:00");
/// ```
pub fn parse_line(line: &str) -> Option<MessageHead> {
    let parsed = classify_line(line)?;
    let AuthorSplit { author, message } = split_author(parsed.rest_text);

    Some(MessageHead {
        timestamp: resolve_timestamp(parsed.date_text, parsed.time_text),
        author,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_android_line() {
        let head = parse_line("12/09/2025, 21:03 - Bob: I'm fine, thanks! :)").unwrap();
        assert_eq!(head.author.as_deref(), Some("Bob"));
        assert_eq!(head.message, "I'm fine, thanks! :)");
    }

    #[test]
    fn test_parse_ios_pm_line() {
        let head = parse_line("[12/09/2025, 9:02 PM] Alice: iOS format test").unwrap();
        assert_eq!(head.timestamp.unwrap().hour(), 21);
        assert_eq!(head.message, "iOS format test");
    }

    #[test]
    fn test_unresolvable_date_keeps_message() {
        let head = parse_line("45/45/2025, 21:02 - Alice: still counted").unwrap();
        assert!(head.timestamp.is_none());
        assert_eq!(head.author.as_deref(), Some("Alice"));
        assert_eq!(head.message, "still counted");
    }

    #[test]
    fn test_system_line() {
        let head = parse_line("12/09/2025, 21:00 - Alice added Bob").unwrap();
        assert!(head.author.is_none());
        assert_eq!(head.message, "Alice added Bob");
    }

    #[test]
    fn test_continuation_line() {
        assert!(parse_line("and this is the second line").is_none());
    }
}
