//! Logical chat messages.
//!
//! A [`LogicalMessage`] is one conceptual message as reconstructed by the
//! reassembler: a timestamped head line plus any continuation lines, joined
//! with single spaces.
//!
//! # Examples
//!
//! ```
//! use chatstat::LogicalMessage;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2025, 9, 12)
//!     .unwrap()
//!     .and_hms_opt(21, 2, 0)
//!     .unwrap();
//!
//! let msg = LogicalMessage::new("Hey! How are you?")
//!     .with_author("Alice")
//!     .with_timestamp(ts);
//!
//! assert_eq!(msg.author(), Some("Alice"));
//! assert!(msg.has_timestamp());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One reconstructed chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `Option<NaiveDateTime>` | Absent if no grammar matched or the date was unusable |
/// | `author` | `Option<String>` | Absent for system messages |
/// | `text` | `String` | Body, never empty |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalMessage {
    /// When the message was sent, in the export's local time.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,

    /// Display name of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub author: Option<String>,

    /// Message body.
    pub text: String,
}

impl LogicalMessage {
    /// Creates an author-less, untimed message.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            author: None,
            text: text.into(),
        }
    }

    /// Sets the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns the author, if any.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Returns the message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if a timestamp was resolved.
    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Returns `true` for messages without an author (group events, notices).
    pub fn is_system(&self) -> bool {
        self.author.is_none()
    }

    /// Length of the body in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
