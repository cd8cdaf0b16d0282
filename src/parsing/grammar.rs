//! Timestamp grammars and the line classifier.
//!
//! WhatsApp exports vary by platform and locale. Rather than detecting one
//! format up front, every physical line is matched against a fixed, ordered
//! list of grammars and the first one that matches wins. Ambiguous lines are
//! therefore resolved purely by list order.

use std::sync::LazyLock;

use regex::Regex;

/// A line-anchored timestamp pattern with `date`, `time` and `rest` captures.
///
/// Variants are listed in priority order; [`TimestampGrammar::all`] returns
/// them in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampGrammar {
    /// Android with 12-hour clock: `12/09/2025, 9:02 pm - Alice: Hi`
    AndroidMeridiem,
    /// Android with 24-hour clock: `12/09/2025, 21:02 - Alice: Hi`
    Android24h,
    /// iOS bracketed: `[12/09/2025, 9:02:10 PM] Alice: Hi`
    IosBracketed,
    /// US date with a four-digit year: `09/12/2025, 21:02 - Alice: Hi`
    UsLongYear,
    /// No separator between timestamp and text: `12-09-2025 21:02 Alice: Hi`
    SpaceSeparated,
    /// Dotted date: `12.09.2025, 21:02 - Alice: Hi`
    DottedDate,
}

impl TimestampGrammar {
    /// Returns the regex source for this grammar.
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampGrammar::AndroidMeridiem => {
                r"(?i)^(?P<date>\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}),\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm))\s*[\-\x{2013}\x{2014}]\s+(?P<rest>.*)$"
            }
            TimestampGrammar::Android24h => {
                r"^(?P<date>\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*[\-\x{2013}\x{2014}]\s+(?P<rest>.*)$"
            }
            TimestampGrammar::IosBracketed => {
                r"(?i)^\[(?P<date>\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm)?)\]?\s*(?P<rest>.*)$"
            }
            TimestampGrammar::UsLongYear => {
                r"^(?P<date>\d{1,2}[/\-]\d{1,2}[/\-]\d{4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*[\-\x{2013}\x{2014}]\s+(?P<rest>.*)$"
            }
            TimestampGrammar::SpaceSeparated => {
                r"^(?P<date>\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s+(?P<rest>.*)$"
            }
            TimestampGrammar::DottedDate => {
                r"^(?P<date>\d{1,2}\.\d{1,2}\.\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?)\s*[\-\x{2013}\x{2014}]\s+(?P<rest>.*)$"
            }
        }
    }

    /// Returns all grammars in priority order.
    pub fn all() -> &'static [TimestampGrammar] {
        &[
            TimestampGrammar::AndroidMeridiem,
            TimestampGrammar::Android24h,
            TimestampGrammar::IosBracketed,
            TimestampGrammar::UsLongYear,
            TimestampGrammar::SpaceSeparated,
            TimestampGrammar::DottedDate,
        ]
    }

    /// Returns the compiled regex for this grammar.
    pub fn regex(self) -> &'static Regex {
        &COMPILED[self.priority()]
    }

    /// Zero-based position in the priority list.
    pub fn priority(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for TimestampGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimestampGrammar::AndroidMeridiem => "Android (12h)",
            TimestampGrammar::Android24h => "Android (24h)",
            TimestampGrammar::IosBracketed => "iOS (bracketed)",
            TimestampGrammar::UsLongYear => "US (4-digit year)",
            TimestampGrammar::SpaceSeparated => "space separated",
            TimestampGrammar::DottedDate => "dotted date",
        };
        f.write_str(name)
    }
}

static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TimestampGrammar::all()
        .iter()
        .map(|g| Regex::new(g.pattern()).expect("timestamp grammar must compile"))
        .collect()
});

/// Raw captures of a line that matched a timestamp grammar.
///
/// All three fields are trimmed and `rest` is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Grammar that matched
    pub grammar: TimestampGrammar,
    /// Date token, e.g. `12/09/2025`
    pub date_text: &'a str,
    /// Time token including any AM/PM marker, e.g. `9:02 PM`
    pub time_text: &'a str,
    /// Everything after the timestamp
    pub rest_text: &'a str,
}

/// Classifies one physical line.
///
/// Tries every grammar in priority order. A match whose `rest` is empty is
/// treated as a non-match and the remaining grammars still get a chance.
///
/// # Example
///
/// ```rust
/// use chatstat::parsing::{classify_line, TimestampGrammar};
///
/// let parsed = classify_line("[12/09/2025, 9:02 PM] Alice: iOS format test").unwrap();
/// assert_eq!(parsed.grammar, TimestampGrammar::IosBracketed);
/// assert_eq!(parsed.time_text, "9:02 PM");
/// assert_eq!(parsed.rest_text, "Alice: iOS format test");
///
/// assert!(classify_line("just some text").is_none());
/// ```
pub fn classify_line(line: &str) -> Option<ParsedLine<'_>> {
    for &grammar in TimestampGrammar::all() {
        let Some(caps) = grammar.regex().captures(line) else {
            continue;
        };

        let rest_text = caps.name("rest").map_or("", |m| m.as_str().trim());
        if rest_text.is_empty() {
            continue;
        }

        return Some(ParsedLine {
            grammar,
            date_text: caps.name("date").map_or("", |m| m.as_str().trim()),
            time_text: caps.name("time").map_or("", |m| m.as_str().trim()),
            rest_text,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar_of(line: &str) -> Option<TimestampGrammar> {
        classify_line(line).map(|p| p.grammar)
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(COMPILED.len(), TimestampGrammar::all().len());
        for (i, g) in TimestampGrammar::all().iter().enumerate() {
            assert_eq!(g.priority(), i);
        }
    }

    #[test]
    fn test_android_meridiem() {
        let p = classify_line("12/09/2025, 9:02 pm - Alice: Hello").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::AndroidMeridiem);
        assert_eq!(p.date_text, "12/09/2025");
        assert_eq!(p.time_text, "9:02 pm");
        assert_eq!(p.rest_text, "Alice: Hello");
    }

    #[test]
    fn test_android_meridiem_uppercase_and_en_dash() {
        let p = classify_line("1/2/24, 10:15:30 AM \u{2013} Bob: Morning").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::AndroidMeridiem);
        assert_eq!(p.time_text, "10:15:30 AM");
        assert_eq!(p.rest_text, "Bob: Morning");
    }

    #[test]
    fn test_android_24h() {
        let p = classify_line("12/09/2025, 21:02 - Alice: Hey! How are you?").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::Android24h);
        assert_eq!(p.date_text, "12/09/2025");
        assert_eq!(p.time_text, "21:02");
        assert_eq!(p.rest_text, "Alice: Hey! How are you?");
    }

    #[test]
    fn test_android_24h_without_comma_and_em_dash() {
        let p = classify_line("12-09-25 21:02 \u{2014} Alice: hi").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::Android24h);
        assert_eq!(p.date_text, "12-09-25");
    }

    #[test]
    fn test_ios_bracketed() {
        let p = classify_line("[12/09/2025, 9:02 PM] Alice: iOS format test").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::IosBracketed);
        assert_eq!(p.date_text, "12/09/2025");
        assert_eq!(p.time_text, "9:02 PM");
        assert_eq!(p.rest_text, "Alice: iOS format test");
    }

    #[test]
    fn test_ios_bracketed_24h_with_seconds() {
        let p = classify_line("[12/09/2025, 21:02:59] Alice: hi").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::IosBracketed);
        assert_eq!(p.time_text, "21:02:59");
    }

    #[test]
    fn test_us_long_year_is_shadowed_by_android() {
        // Anything the US grammar accepts, the 24h Android grammar accepts first.
        let line = "09/12/2025, 21:02 - Alice: hi";
        assert!(TimestampGrammar::UsLongYear.regex().is_match(line));
        assert_eq!(grammar_of(line), Some(TimestampGrammar::Android24h));
    }

    #[test]
    fn test_space_separated() {
        let p = classify_line("12-09-2025 21:02 Name: Alternative format").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::SpaceSeparated);
        assert_eq!(p.date_text, "12-09-2025");
        assert_eq!(p.time_text, "21:02");
        assert_eq!(p.rest_text, "Name: Alternative format");
    }

    #[test]
    fn test_dotted_date() {
        let p = classify_line("26.10.2025, 20:40 - Sender: Message").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::DottedDate);
        assert_eq!(p.date_text, "26.10.2025");
        assert_eq!(p.rest_text, "Sender: Message");
    }

    #[test]
    fn test_empty_rest_falls_through() {
        // The 24h grammar requires whitespace after the dash, so nothing matches.
        assert!(classify_line("12/09/2025, 21:02 -").is_none());
        // The bracketed grammar matches with an empty rest and is skipped.
        assert!(classify_line("[12/09/2025, 21:02]").is_none());
        assert!(classify_line("[12/09/2025, 21:02]    ").is_none());
    }

    #[test]
    fn test_empty_rest_lets_later_grammar_match() {
        // The space-separated grammar sees "-" as the rest.
        let p = classify_line("12/09/2025 21:02 - ").unwrap();
        assert_eq!(p.grammar, TimestampGrammar::SpaceSeparated);
        assert_eq!(p.rest_text, "-");
    }

    #[test]
    fn test_non_matching_lines() {
        assert_eq!(grammar_of(""), None);
        assert_eq!(grammar_of("hello world"), None);
        assert_eq!(grammar_of("  12/09/2025, 21:02 - Alice: indented"), None);
        assert_eq!(grammar_of("2025-09-12 21:02 Alice: iso dates are not supported"), None);
        assert_eq!(grammar_of("12/09/2025, no time here"), None);
    }

    #[test]
    fn test_system_line_without_author() {
        let p = classify_line("12/09/2025, 21:00 - Alice created group \"Trip\"").unwrap();
        assert_eq!(p.rest_text, "Alice created group \"Trip\"");
    }

    #[test]
    fn test_grammar_display() {
        assert_eq!(TimestampGrammar::IosBracketed.to_string(), "iOS (bracketed)");
        assert_eq!(TimestampGrammar::DottedDate.to_string(), "dotted date");
    }
}
