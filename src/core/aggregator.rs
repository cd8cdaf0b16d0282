//! Single-pass statistics over logical messages.
//!
//! [`Aggregator`] is an explicit fold state: feed it messages in file order
//! with [`Aggregator::observe`] (or the by-value [`Aggregator::fold`]) and
//! turn it into a [`Summary`] with [`Aggregator::finish`]. Nothing is shared
//! between instances, so independent analyses never interfere.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{NaiveDate, Timelike};
use regex::Regex;
use tracing::info;

use crate::core::summary::{ActivityPeriod, Summary, Tally, UserShare, WordCount};
use crate::message::LogicalMessage;

/// Longest-message preview length, in characters.
pub const LONGEST_PREVIEW_CHARS: usize = 100;

/// Substrings (matched on lower-cased text) that mark a media placeholder.
pub const MEDIA_MARKERS: &[&str] = &[
    "<media omitted>",
    "media omitted",
    "<image omitted>",
    "image omitted",
];

/// Substrings (matched on lower-cased text) that mark a link.
pub const LINK_MARKERS: &[&str] = &["http://", "https://", "www."];

/// Code points above this count toward the emoji total.
pub const EMOJI_CODEPOINT_THRESHOLD: u32 = 1000;

/// Words never ranked in the word frequency table.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "to", "a", "of", "in", "is", "it", "you", "i", "for", "on", "that", "this",
    "with", "are", "was", "as", "but", "be", "have", "has", "not", "we", "they", "what", "when",
    "where", "who", "why", "how", "can", "will", "would", "should", "could", "may", "might",
    "must", "shall",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern must compile"));

/// Running counters for one analysis.
///
/// # Example
///
/// ```rust
/// use chatstat::core::Aggregator;
/// use chatstat::LogicalMessage;
///
/// let summary = [
///     LogicalMessage::new("Is anyone there?").with_author("Alice"),
///     LogicalMessage::new("yes, here").with_author("Bob"),
/// ]
/// .iter()
/// .fold(Aggregator::new(), Aggregator::fold)
/// .finish(10);
///
/// assert_eq!(summary.total_messages, 2);
/// assert_eq!(summary.question_count, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    total: usize,
    per_user: Tally<String>,
    per_day: Tally<String>,
    per_hour: [usize; 24],
    per_weekday: Tally<String>,
    active_periods: Tally<ActivityPeriod>,
    word_counts: Tally<String>,
    media_count: usize,
    emoji_count: usize,
    link_count: usize,
    question_count: usize,
    total_length: usize,
    longest_message: String,
    longest_message_length: usize,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages observed so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Pure fold step: observes `message` and returns the updated state.
    #[must_use]
    pub fn fold(mut self, message: &LogicalMessage) -> Self {
        self.observe(message);
        self
    }

    /// Updates every counter with one message.
    pub fn observe(&mut self, message: &LogicalMessage) {
        self.total += 1;

        if let Some(author) = message.author.as_deref() {
            self.per_user.increment(author);
        }

        if let Some(ts) = message.timestamp {
            let date = ts.date();
            self.per_day.increment(date.format("%Y-%m-%d").to_string().as_str());
            self.per_hour[ts.hour() as usize] += 1;
            self.per_weekday.increment(ts.format("%A").to_string().as_str());
            self.active_periods
                .increment(&ActivityPeriod::from_hour(ts.hour()));

            self.first_date = Some(self.first_date.map_or(date, |d| d.min(date)));
            self.last_date = Some(self.last_date.map_or(date, |d| d.max(date)));
        }

        let text = message.text.as_str();
        let length = text.chars().count();
        self.total_length += length;
        if length > self.longest_message_length {
            self.longest_message_length = length;
            self.longest_message = preview(text, LONGEST_PREVIEW_CHARS);
        }

        let lower = text.to_lowercase();
        if MEDIA_MARKERS.iter().any(|m| lower.contains(m)) {
            self.media_count += 1;
        }
        if LINK_MARKERS.iter().any(|m| lower.contains(m)) {
            self.link_count += 1;
        }
        if text.contains('?') {
            self.question_count += 1;
        }
        self.emoji_count += text
            .chars()
            .filter(|c| u32::from(*c) > EMOJI_CODEPOINT_THRESHOLD)
            .count();

        for word in WORD_RE.find_iter(&lower).map(|m| m.as_str()) {
            if word.chars().count() > 1 && !STOPWORD_SET.contains(word) {
                self.word_counts.increment(word);
            }
        }
    }

    /// Derives the final [`Summary`], keeping the `top_n` most frequent words.
    ///
    /// An empty aggregator yields an all-zero summary; callers that need at
    /// least one message check [`Aggregator::total`] first.
    pub fn finish(self, top_n: usize) -> Summary {
        let total = self.total;

        let avg_message_length = if total > 0 {
            self.total_length as f64 / total as f64
        } else {
            0.0
        };

        let total_days = match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => (last - first).num_days() + 1,
            _ => 1,
        };
        let messages_per_day_avg = total as f64 / total_days as f64;

        let user_percentages: Vec<UserShare> = if total > 0 {
            self.per_user
                .iter()
                .map(|(user, count)| UserShare {
                    user: user.clone(),
                    percentage: count as f64 / total as f64 * 100.0,
                })
                .collect()
        } else {
            Vec::new()
        };

        let top_words: Vec<WordCount> = self
            .word_counts
            .most_common(Some(top_n))
            .into_iter()
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count,
            })
            .collect();

        let most_active_user = self.per_user.argmax().map(|(u, c)| (u.clone(), c));
        let most_active_period = self.active_periods.argmax().map(|(p, c)| (*p, c));
        let most_active_day = self.per_weekday.argmax().map(|(d, c)| (d.clone(), c));

        let insights = if total > 0 {
            let user_line = most_active_user.as_ref().map(|(user, count)| {
                let share = user_percentages
                    .iter()
                    .find(|s| &s.user == user)
                    .map_or(0.0, |s| s.percentage);
                format!(
                    "🏆 {} is the most active with {} messages ({:.1}%)",
                    user,
                    group_thousands(*count),
                    share
                )
            });

            let mut lines = vec![
                format!(
                    "📊 Analyzed {} messages across {} days",
                    group_thousands(total),
                    total_days
                ),
                format!("💬 Average of {:.1} messages per day", messages_per_day_avg),
            ];
            lines.extend(user_line);
            if let Some((period, count)) = most_active_period {
                lines.push(format!(
                    "⏰ Most active time: {} ({} messages)",
                    period,
                    group_thousands(count)
                ));
            }
            if let Some((day, count)) = &most_active_day {
                lines.push(format!(
                    "📅 Most active day: {} ({} messages)",
                    day,
                    group_thousands(*count)
                ));
            }
            if self.media_count > 0 {
                lines.push(format!(
                    "🖼️ {} media files shared",
                    group_thousands(self.media_count)
                ));
            }
            if self.link_count > 0 {
                lines.push(format!("🔗 {} links shared", group_thousands(self.link_count)));
            }
            if self.question_count > 0 {
                lines.push(format!(
                    "❓ {} questions asked",
                    group_thousands(self.question_count)
                ));
            }
            if self.emoji_count > 0 {
                lines.push(format!(
                    "😊 {} emojis used (approx)",
                    group_thousands(self.emoji_count)
                ));
            }
            lines.push(format!(
                "📝 Average message length: {:.0} characters",
                avg_message_length
            ));
            lines
        } else {
            Vec::new()
        };

        info!(
            total,
            users = self.per_user.len(),
            days = total_days,
            "summary built"
        );

        Summary {
            total_messages: total,
            per_user: self.per_user,
            per_day: self.per_day,
            per_hour: self.per_hour,
            per_weekday: self.per_weekday,
            top_words,
            media_count: self.media_count,
            emoji_count: self.emoji_count,
            link_count: self.link_count,
            question_count: self.question_count,
            avg_message_length: round_to(avg_message_length, 1),
            longest_message: self.longest_message,
            longest_message_length: self.longest_message_length,
            first_date: self.first_date,
            last_date: self.last_date,
            total_days,
            messages_per_day_avg: round_to(messages_per_day_avg, 2),
            user_percentages,
            active_periods: self.active_periods,
            most_active_user: most_active_user.map(|(u, _)| u),
            most_active_period: most_active_period.map(|(p, _)| p),
            most_active_day: most_active_day.map(|(d, _)| d),
            insights,
        }
    }
}

impl<'a> Extend<&'a LogicalMessage> for Aggregator {
    fn extend<T: IntoIterator<Item = &'a LogicalMessage>>(&mut self, iter: T) {
        for message in iter {
            self.observe(message);
        }
    }
}

/// First `max_chars` characters of `text`, with `...` appended if cut.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

// Goes through the formatter so exact binary ties round to even.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Formats an integer with `,` thousands separators.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
