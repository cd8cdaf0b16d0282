//! Report format types for the chatstat library.
//!
//! These types don't depend on CLI frameworks, so library callers can pick a
//! report format from a path or a string and write it in one call.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatstat::Result<()> {
//! use chatstat::format::{ReportFormat, write_to_format};
//! use chatstat::core::Aggregator;
//! use chatstat::LogicalMessage;
//!
//! let summary = Aggregator::new()
//!     .fold(&LogicalMessage::new("Hello!").with_author("Alice"))
//!     .finish(20);
//!
//! // Write using format enum
//! write_to_format(&summary, "report.csv", ReportFormat::Csv)?;
//!
//! // Or use format detection from extension
//! let format = ReportFormat::from_path("report.html")?;
//! assert_eq!(format, ReportFormat::Html);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Summary;
use crate::error::ChatstatError;

/// Report format for analysis results.
///
/// - [`Csv`](ReportFormat::Csv) - metrics, per-user counts and top words
/// - [`Html`](ReportFormat::Html) - a standalone page for people
/// - [`Json`](ReportFormat::Json) - every counter, for other tools
///
/// # Example
///
/// ```rust
/// use chatstat::format::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("htm").unwrap();
/// assert_eq!(format, ReportFormat::Html);
/// assert_eq!(format.extension(), "html");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Three-section CSV (default)
    #[default]
    Csv,

    /// Standalone HTML page with inline CSS
    Html,

    /// Pretty-printed JSON of the whole summary
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "html", "htm", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ReportFormat] {
        &[ReportFormat::Csv, ReportFormat::Html, ReportFormat::Json]
    }

    /// Returns the MIME type for this format.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstat::format::ReportFormat;
    ///
    /// assert_eq!(ReportFormat::Html.mime_type(), "text/html");
    /// ```
    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Html => "text/html",
            ReportFormat::Json => "application/json",
        }
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatstatError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "html" | "htm" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ChatstatError::invalid_format(
                "report",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: csv, html, json",
                    ext
                ),
            )),
        }
    }

    fn required_feature(self) -> Option<&'static str> {
        match self {
            ReportFormat::Csv => Some("csv-output"),
            ReportFormat::Json => Some("json-output"),
            ReportFormat::Html => None,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "CSV"),
            ReportFormat::Html => write!(f, "HTML"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "html" | "htm" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

fn feature_disabled(format: ReportFormat) -> ChatstatError {
    ChatstatError::invalid_format(
        "report",
        format!(
            "Report format {} requires the '{}' feature to be enabled",
            format,
            format.required_feature().unwrap_or("default")
        ),
    )
}

/// Writes a summary to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
pub fn write_to_format(
    summary: &Summary,
    path: impl AsRef<Path>,
    format: ReportFormat,
) -> Result<(), ChatstatError> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => crate::core::output::write_csv(summary, path),
        ReportFormat::Html => crate::core::output::write_html(summary, path),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::write_json(summary, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders a summary to a string in the specified format.
pub fn to_format_string(summary: &Summary, format: ReportFormat) -> Result<String, ChatstatError> {
    match format {
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => crate::core::output::to_csv(summary),
        ReportFormat::Html => Ok(crate::core::output::to_html(summary)),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::to_json(summary),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}
