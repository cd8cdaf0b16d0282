//! Format diagnostics for chat files that fail to analyze.
//!
//! [`diagnose`] looks at the head of a file and reports whether the line
//! classifier recognises it, without running a full analysis.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::analyzer::LossyLines;
use crate::error::Result;
use crate::parsing::parse_line;

/// Non-empty lines shown in the preview.
pub const PREVIEW_LINES: usize = 10;
/// Preview line width, in characters.
pub const PREVIEW_CHARS: usize = 80;
/// Physical lines checked against the classifier.
pub const SAMPLE_WINDOW: usize = 50;
/// Unclassified lines kept.
pub const UNPARSED_SAMPLES: usize = 5;
/// Unclassified sample width, in characters.
pub const UNPARSED_CHARS: usize = 100;

/// What [`diagnose`] found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnosis {
    /// Physical lines in the input
    pub total_lines: usize,
    /// First non-empty lines as `(1-based line number, text)`
    pub preview: Vec<(usize, String)>,
    /// Non-empty lines among the first [`SAMPLE_WINDOW`]
    pub sampled: usize,
    /// How many of `sampled` start a message
    pub parsed: usize,
    /// Sampled lines that matched no grammar
    pub unparsed_samples: Vec<String>,
}

impl Diagnosis {
    /// Returns `true` if the input has no non-empty line at all.
    pub fn is_empty(&self) -> bool {
        self.preview.is_empty()
    }

    /// Returns `true` if at least one sampled line starts a message.
    pub fn is_supported(&self) -> bool {
        self.parsed > 0
    }
}

/// Diagnoses a sequence of physical lines.
///
/// # Example
///
/// ```rust
/// use chatstat::diagnose::diagnose;
///
/// let report = diagnose(["Chat header", "", "12/09/2025, 21:02 - Alice: hi"]);
/// assert_eq!(report.total_lines, 3);
/// assert_eq!(report.parsed, 1);
/// assert_eq!(report.unparsed_samples, ["Chat header"]);
/// assert_eq!(report.preview[1], (3, "12/09/2025, 21:02 - Alice: hi".to_string()));
/// ```
pub fn diagnose<I, S>(lines: I) -> Diagnosis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = Diagnosis::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        report.total_lines += 1;

        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if report.preview.len() < PREVIEW_LINES {
            report
                .preview
                .push((idx + 1, truncate(line.trim_end(), PREVIEW_CHARS).to_string()));
        }

        if idx < SAMPLE_WINDOW {
            report.sampled += 1;
            if parse_line(stripped).is_some() {
                report.parsed += 1;
            } else if report.unparsed_samples.len() < UNPARSED_SAMPLES {
                report
                    .unparsed_samples
                    .push(truncate(stripped, UNPARSED_CHARS).to_string());
            }
        }
    }

    report
}

/// Diagnoses a file, decoding it the same way the analyzer does.
pub fn diagnose_file(path: impl AsRef<Path>) -> Result<Diagnosis> {
    let file = File::open(path)?;
    let lines = LossyLines::new(BufReader::new(file)).collect::<std::io::Result<Vec<_>>>()?;
    Ok(diagnose(lines))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
