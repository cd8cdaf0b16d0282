//! Core analysis logic for chatstat.
//!
//! This module contains:
//! - [`reassembler`] - Grouping physical lines into logical messages
//! - [`aggregator`] - The single-pass statistics fold
//! - [`summary`] - The [`Summary`] result and its counters
//! - [`output`] - Report writers (CSV, HTML, JSON)
//!
//! # Quick Start
//!
//! ```rust
//! use chatstat::core::{Aggregator, reassemble, to_html};
//!
//! let (messages, _unparsed) = reassemble([
//!     "12/09/2025, 21:02 - Alice: Hey! How are you?",
//!     "12/09/2025, 21:03 - Bob: I'm fine, thanks! :)",
//! ]);
//!
//! let summary = messages
//!     .iter()
//!     .fold(Aggregator::new(), Aggregator::fold)
//!     .finish(20);
//!
//! assert_eq!(summary.total_messages, 2);
//! assert!(to_html(&summary).contains("<td>Alice</td>"));
//! ```

pub mod aggregator;
pub mod output;
pub mod reassembler;
pub mod summary;

pub use aggregator::{Aggregator, group_thousands};
pub use reassembler::{DEFAULT_SAMPLE_LIMIT, Reassembler, reassemble};
pub use summary::{ActivityPeriod, Summary, Tally, UserShare, WEEKDAYS, WordCount};

pub use output::{escape_html, to_html, write_html};
// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
