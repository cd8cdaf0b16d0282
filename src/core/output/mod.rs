//! Report writers.
//!
//! This module provides writers for the three report formats:
//! - [`write_csv`] / [`to_csv`] - three-section CSV - requires `csv-output` feature
//! - [`write_html`] / [`to_html`] - standalone HTML page - always available
//! - [`write_json`] / [`to_json`] - the full summary as JSON - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Contents | Use Case |
//! |--------|----------|----------|
//! | CSV | Scalars, per-user counts, top words | Spreadsheets |
//! | HTML | Headline figures and two tables | Sharing with people |
//! | JSON | Every counter and insight | Dashboards, other tools |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstat::Result<()> {
//! use chatstat::core::output::{to_html, write_csv, write_html, write_json};
//! use chatstat::core::Aggregator;
//! use chatstat::LogicalMessage;
//!
//! let mut aggregator = Aggregator::new();
//! aggregator.observe(&LogicalMessage::new("Hello!").with_author("Alice"));
//! let summary = aggregator.finish(20);
//!
//! write_csv(&summary, "report.csv")?;
//! write_html(&summary, "report.html")?;
//! write_json(&summary, "report.json")?;
//!
//! // Or get the page as a string
//! let page = to_html(&summary);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod html_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use html_writer::{escape_html, to_html, write_html};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
