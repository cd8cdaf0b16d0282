//! # Chatstat
//!
//! A Rust library for turning exported WhatsApp chat logs into activity,
//! word and media statistics.
//!
//! ## Overview
//!
//! WhatsApp exports a chat as plain text, one message per line, in a handful
//! of locale- and platform-dependent timestamp layouts. Chatstat:
//!
//! - recognises six timestamp layouts (Android and iOS, 12h and 24h, dotted
//!   European dates)
//! - stitches wrapped multi-line messages back together
//! - folds every message into a [`Summary`] in a single pass
//! - writes the result as CSV, HTML or JSON reports
//! - can read screenshots of a chat through the Tesseract OCR engine
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let summary = Analyzer::new().analyze_path("WhatsApp Chat with Alice.txt")?;
//!
//!     println!("{} messages", summary.total_messages);
//!     for insight in &summary.insights {
//!         println!("{insight}");
//!     }
//!
//!     write_html(&summary, "report.html")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Building Blocks
//!
//! The pipeline stages are public and usable on their own:
//!
//! ```rust
//! use chatstat::core::{Aggregator, Reassembler};
//!
//! let mut reassembler = Reassembler::new();
//! let mut aggregator = Aggregator::new();
//!
//! for line in ["[12/09/2025, 9:02 PM] Alice: long message", "wrapped here", ""] {
//!     if let Some(message) = reassembler.push_line(line) {
//!         aggregator.observe(&message);
//!     }
//! }
//! aggregator.extend(reassembler.finish().as_ref());
//!
//! let summary = aggregator.finish(20);
//! assert_eq!(summary.total_messages, 1);
//! assert_eq!(summary.per_hour[21], 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Line classification
//!   - [`TimestampGrammar`](parsing::TimestampGrammar), [`classify_line`](parsing::classify_line)
//!   - [`split_author`](parsing::split_author), [`resolve_timestamp`](parsing::resolve_timestamp)
//! - [`core`] - Reassembly, aggregation and reports
//!   - [`Reassembler`](core::Reassembler), [`Aggregator`](core::Aggregator), [`Summary`]
//!   - [`core::output`] - [`to_csv`](core::output), [`to_html`](core::output::to_html), [`to_json`](core::output)
//! - [`analyzer`] - [`Analyzer`], [`ContentSource`], [`analyze`]
//! - [`ocr`] - [`TextExtractor`](ocr::TextExtractor), [`TesseractExtractor`](ocr::TesseractExtractor)
//! - [`diagnose`] - Format diagnostics
//! - [`format`] - [`ReportFormat`](format::ReportFormat), [`write_to_format`](format::write_to_format)
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig), [`OcrConfig`](config::OcrConfig)
//! - [`error`] - [`ChatstatError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod diagnose;
pub mod error;
pub mod format;
pub mod message;
pub mod ocr;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use analyzer::{Analyzer, ContentSource, analyze};
pub use core::Summary;
pub use error::{ChatstatError, Result};
pub use message::LogicalMessage;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::LogicalMessage;

    pub use crate::error::{ChatstatError, ImageErrorKind, Result};

    pub use crate::analyzer::{Analyzer, ContentSource, analyze};
    pub use crate::config::{AnalysisConfig, OcrConfig};

    pub use crate::core::{
        ActivityPeriod, Aggregator, Reassembler, Summary, Tally, UserShare, WordCount, reassemble,
    };

    pub use crate::core::output::{to_html, write_html};
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};

    pub use crate::format::{ReportFormat, write_to_format};
    pub use crate::ocr::{TesseractExtractor, TextExtractor};
}
