//! The analysis result and its building blocks.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Insertion-ordered counter.
///
/// Ties are always broken by first-seen order: [`Tally::most_common`] is a
/// stable sort and [`Tally::argmax`] returns the earliest maximum.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `key`'s count, inserting it on first sight.
    pub fn increment<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&slot) = self.index.get(key) {
            self.entries[slot].1 += 1;
        } else {
            let owned = key.to_owned();
            self.index.insert(owned.clone(), self.entries.len());
            self.entries.push((owned, 1));
        }
    }

    /// Count for `key`, zero if never seen.
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Entries sorted by count descending, ties in first-seen order.
    ///
    /// With `Some(n)`, at most `n` entries are returned.
    pub fn most_common(&self, limit: Option<usize>) -> Vec<(&K, usize)> {
        let mut sorted: Vec<(&K, usize)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = limit {
            sorted.truncate(n);
        }
        sorted
    }

    /// The entry with the highest count, earliest on ties.
    pub fn argmax(&self) -> Option<(&K, usize)> {
        self.iter()
            .fold(None, |best: Option<(&K, usize)>, (k, c)| match best {
                Some((_, best_count)) if best_count >= c => best,
                _ => Some((k, c)),
            })
    }
}

impl<K> Tally<K> {
    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl<K: PartialEq> PartialEq for Tally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Clock-hour bucket used for "when does this chat happen" insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityPeriod {
    /// 05:00 to 11:59
    Morning,
    /// 12:00 to 16:59
    Afternoon,
    /// 17:00 to 21:59
    Evening,
    /// 22:00 to 04:59
    Night,
}

impl ActivityPeriod {
    /// Bucket for an hour of the day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => ActivityPeriod::Morning,
            12..=16 => ActivityPeriod::Afternoon,
            17..=21 => ActivityPeriod::Evening,
            _ => ActivityPeriod::Night,
        }
    }

    /// All periods in clock order, starting with the morning.
    pub fn all() -> &'static [ActivityPeriod] {
        &[
            ActivityPeriod::Morning,
            ActivityPeriod::Afternoon,
            ActivityPeriod::Evening,
            ActivityPeriod::Night,
        ]
    }
}

impl std::fmt::Display for ActivityPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityPeriod::Morning => write!(f, "Morning"),
            ActivityPeriod::Afternoon => write!(f, "Afternoon"),
            ActivityPeriod::Evening => write!(f, "Evening"),
            ActivityPeriod::Night => write!(f, "Night"),
        }
    }
}

/// Weekday names in calendar order, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A ranked word and its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// A user's share of all messages, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    pub user: String,
    pub percentage: f64,
}

/// Aggregate statistics for one chat.
///
/// Built once per analysis by [`Aggregator::finish`](crate::core::Aggregator::finish).
/// Counters keyed by user, day and weekday keep first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Every logical message, system messages included
    pub total_messages: usize,
    /// Messages per author
    pub per_user: Tally<String>,
    /// Messages per ISO date (`YYYY-MM-DD`)
    pub per_day: Tally<String>,
    /// Messages per hour of day
    pub per_hour: [usize; 24],
    /// Messages per weekday name
    pub per_weekday: Tally<String>,
    /// Most frequent words, highest first
    pub top_words: Vec<WordCount>,
    pub media_count: usize,
    /// Characters above U+03E8, a rough emoji count
    pub emoji_count: usize,
    pub link_count: usize,
    pub question_count: usize,
    /// Mean message length in characters, one decimal
    pub avg_message_length: f64,
    /// First 100 characters of the longest message, `...` appended if cut
    pub longest_message: String,
    pub longest_message_length: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Inclusive day span, at least 1
    pub total_days: i64,
    /// Two decimals
    pub messages_per_day_avg: f64,
    /// Per-user share of `total_messages`, in `per_user` order
    pub user_percentages: Vec<UserShare>,
    pub active_periods: Tally<ActivityPeriod>,
    pub most_active_user: Option<String>,
    pub most_active_period: Option<ActivityPeriod>,
    pub most_active_day: Option<String>,
    pub insights: Vec<String>,
}

impl Summary {
    /// Percentage of all messages sent by `user`, zero if unknown.
    pub fn user_percentage(&self, user: &str) -> f64 {
        self.user_percentages
            .iter()
            .find(|share| share.user == user)
            .map_or(0.0, |share| share.percentage)
    }

    /// Users ranked by message count, ties in first-seen order.
    pub fn ranked_users(&self) -> Vec<(&str, usize)> {
        self.per_user
            .most_common(None)
            .into_iter()
            .map(|(user, count)| (user.as_str(), count))
            .collect()
    }

    /// Number of messages that carried a timestamp.
    pub fn timed_messages(&self) -> usize {
        self.per_hour.iter().sum()
    }

    // ------------------------------------------------------------------
    // Chart series
    // ------------------------------------------------------------------

    /// Daily counts in date order.
    pub fn daily_series(&self) -> Vec<(&str, usize)> {
        let mut days: Vec<(&str, usize)> = self
            .per_day
            .iter()
            .map(|(day, count)| (day.as_str(), count))
            .collect();
        days.sort_by(|a, b| a.0.cmp(b.0));
        days
    }

    /// Hourly counts labelled `HH:00`, only for hours with messages.
    pub fn hourly_series(&self) -> Vec<(String, usize)> {
        self.per_hour
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(hour, count)| (format!("{hour:02}:00"), *count))
            .collect()
    }

    /// Weekday counts Monday to Sunday, only for weekdays with messages.
    pub fn weekday_series(&self) -> Vec<(&'static str, usize)> {
        WEEKDAYS
            .iter()
            .map(|day| (*day, self.per_weekday.get(*day)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Counts for all four activity periods in clock order, zero-filled.
    pub fn period_series(&self) -> Vec<(ActivityPeriod, usize)> {
        ActivityPeriod::all()
            .iter()
            .map(|period| (*period, self.active_periods.get(period)))
            .collect()
    }
}
