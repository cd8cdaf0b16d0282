//! Command-line interface definition using clap.
//!
//! [`Args`] maps the command line onto library types: an
//! [`AnalysisConfig`], a [`ContentSource`] and a list of report targets.
//!
//! ```rust
//! use chatstat::cli::Args;
//! use chatstat::format::ReportFormat;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstat", "-f", "chat.txt", "--top", "5", "--export-html", "out.html"]);
//! assert_eq!(args.analysis_config().top_n, 5);
//! assert_eq!(args.report_targets()[0].0, ReportFormat::Html);
//! ```

use std::path::{Path, PathBuf};

use clap::builder::TypedValueParser;
use clap::{ArgAction, Parser};

use crate::analyzer::ContentSource;
use crate::config::{AnalysisConfig, DEFAULT_TOP_N, OcrConfig};
use crate::format::ReportFormat;

/// Analyze an exported WhatsApp chat (or a screenshot of one) and print
/// activity, word and media statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat -f chat.txt
    chatstat -f chat.txt --top 10 --export report.csv
    chatstat -f chat.txt --export-html report.html --export-json report.json
    chatstat -f screenshot.png
    chatstat -f chat.txt --diagnose
    chatstat --check-ocr")]
pub struct Args {
    /// Path to the exported chat (.txt) or a screenshot
    #[arg(short, long, value_name = "PATH", required_unless_present = "check_ocr")]
    pub file: Option<PathBuf>,

    /// Number of top words to show
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = top_parser())]
    pub top: usize,

    /// Write a CSV report to this path
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write an HTML report to this path
    #[arg(long, value_name = "HTML")]
    pub export_html: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Treat the input as an image even without an image extension
    #[arg(long)]
    pub image: bool,

    /// Check whether the file format is recognised instead of analyzing it
    #[arg(long)]
    pub diagnose: bool,

    /// Check that the Tesseract OCR engine is installed
    #[arg(long)]
    pub check_ocr: bool,

    /// Tesseract executable to use
    #[arg(long, value_name = "PATH")]
    pub tesseract: Option<PathBuf>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Any positive integer; values past `usize::MAX` saturate.
fn top_parser() -> impl TypedValueParser<Value = usize> {
    clap::value_parser!(u64)
        .range(1..)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
}

impl Args {
    /// OCR settings, honouring `--tesseract`.
    pub fn ocr_config(&self) -> OcrConfig {
        match &self.tesseract {
            Some(command) => OcrConfig::new().with_command(command),
            None => OcrConfig::new(),
        }
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new()
            .with_top_n(self.top)
            .with_ocr(self.ocr_config())
    }

    /// The input, with `--image` forcing OCR.
    pub fn source(&self) -> Option<ContentSource> {
        let path = self.file.clone()?;
        Some(if self.image {
            ContentSource::Image(path)
        } else {
            ContentSource::from_path(path)
        })
    }

    /// Requested reports in CSV, HTML, JSON order.
    pub fn report_targets(&self) -> Vec<(ReportFormat, &Path)> {
        [
            (ReportFormat::Csv, &self.export),
            (ReportFormat::Html, &self.export_html),
            (ReportFormat::Json, &self.export_json),
        ]
        .into_iter()
        .filter_map(|(format, path)| path.as_deref().map(|p| (format, p)))
        .collect()
    }

    /// Default log filter for the verbosity level, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
