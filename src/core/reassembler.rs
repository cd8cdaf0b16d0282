//! Grouping physical lines into logical messages.
//!
//! Exports wrap long messages onto extra lines that carry no timestamp. The
//! [`Reassembler`] keeps at most one open message and decides, line by line,
//! whether to extend it, close it, or start a new one:
//!
//! | Line | Open message | Action |
//! |------|--------------|--------|
//! | blank | yes | emit it |
//! | timestamped | yes | emit it, open the new one |
//! | timestamped | no | open the new one |
//! | other | yes | append as a fragment |
//! | other | no | record as unparsed |

use chrono::NaiveDateTime;
use tracing::debug;

use crate::message::LogicalMessage;
use crate::parsing::{MessageHead, parse_line};

/// Default number of unparsed lines kept for diagnostics.
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

#[derive(Debug)]
struct PendingMessage {
    timestamp: Option<NaiveDateTime>,
    author: Option<String>,
    fragments: Vec<String>,
}

impl PendingMessage {
    /// Opens a message, or nothing when the head carries no text.
    fn open(head: MessageHead) -> Option<Self> {
        if head.message.is_empty() {
            return None;
        }
        Some(Self {
            timestamp: head.timestamp,
            author: head.author,
            fragments: vec![head.message],
        })
    }

    fn into_message(self) -> LogicalMessage {
        LogicalMessage {
            timestamp: self.timestamp,
            author: self.author,
            text: self.fragments.join(" "),
        }
    }
}

/// Line-by-line message reassembly state machine.
///
/// # Example
///
/// ```rust
/// use chatstat::core::Reassembler;
///
/// let mut reassembler = Reassembler::new();
/// let mut messages = Vec::new();
///
/// for line in [
///     "12/09/2025, 21:02 - Alice: first line",
///     "second line",
///     "12/09/2025, 21:03 - Bob: reply",
/// ] {
///     messages.extend(reassembler.push_line(line));
/// }
/// messages.extend(reassembler.finish());
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].text, "first line second line");
/// ```
#[derive(Debug)]
pub struct Reassembler {
    pending: Option<PendingMessage>,
    unparsed_samples: Vec<String>,
    unparsed_count: usize,
    sample_limit: usize,
}

impl Reassembler {
    /// Creates a reassembler that keeps [`DEFAULT_SAMPLE_LIMIT`] unparsed samples.
    pub fn new() -> Self {
        Self::with_sample_limit(DEFAULT_SAMPLE_LIMIT)
    }

    /// Creates a reassembler that keeps up to `limit` unparsed samples.
    pub fn with_sample_limit(limit: usize) -> Self {
        Self {
            pending: None,
            unparsed_samples: Vec::new(),
            unparsed_count: 0,
            sample_limit: limit,
        }
    }

    /// Feeds one physical line.
    ///
    /// Trailing whitespace (including `\r`) is ignored. Returns the message
    /// completed by this line, if any.
    pub fn push_line(&mut self, raw: &str) -> Option<LogicalMessage> {
        let line = raw.trim_end();

        if line.trim().is_empty() {
            return self.flush();
        }

        if let Some(head) = parse_line(line) {
            let completed = self.flush();
            self.pending = PendingMessage::open(head);
            return completed;
        }

        match self.pending.as_mut() {
            Some(pending) => pending.fragments.push(line.trim().to_string()),
            None => self.record_unparsed(line),
        }
        None
    }

    /// Ends the input, returning the last open message.
    pub fn finish(&mut self) -> Option<LogicalMessage> {
        self.flush()
    }

    /// Unparsed lines seen so far, oldest first, capped at the sample limit.
    pub fn unparsed_samples(&self) -> &[String] {
        &self.unparsed_samples
    }

    /// Takes the unparsed samples, leaving the list empty.
    pub fn take_unparsed_samples(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unparsed_samples)
    }

    /// Total number of unparsed lines seen so far.
    pub fn unparsed_count(&self) -> usize {
        self.unparsed_count
    }

    fn flush(&mut self) -> Option<LogicalMessage> {
        self.pending.take().map(PendingMessage::into_message)
    }

    fn record_unparsed(&mut self, line: &str) {
        self.unparsed_count += 1;
        if self.unparsed_samples.len() < self.sample_limit {
            self.unparsed_samples.push(line.to_string());
        }
        debug!(line = %truncate(line, 80), "line matched no timestamp grammar");
    }
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

/// Reassembles a whole sequence of lines.
///
/// Returns the logical messages and the reassembler's unparsed samples.
pub fn reassemble<I, S>(lines: I) -> (Vec<LogicalMessage>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reassembler = Reassembler::new();
    let mut messages: Vec<LogicalMessage> = lines
        .into_iter()
        .filter_map(|line| reassembler.push_line(line.as_ref()))
        .collect();
    messages.extend(reassembler.finish());

    (messages, reassembler.take_unparsed_samples())
}
