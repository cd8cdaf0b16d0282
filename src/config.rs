//! Configuration types for analysis and OCR.
//!
//! Plain structs with builder methods, no CLI framework dependencies.
//!
//! - [`AnalysisConfig`] - word ranking and diagnostic limits
//! - [`OcrConfig`] - where to find the Tesseract binary
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::AnalysisConfig;
//! use chatstat::Analyzer;
//!
//! let config = AnalysisConfig::new()
//!     .with_top_n(10)
//!     .with_sample_limit(3);
//!
//! let analyzer = Analyzer::with_config(config);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of top words.
pub const DEFAULT_TOP_N: usize = 20;

/// Minimum trimmed OCR output, in characters, to accept an image.
pub const DEFAULT_MIN_OCR_CHARS: usize = 10;

/// Settings for one analysis run.
///
/// # Example
///
/// ```rust
/// use chatstat::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new().with_top_n(5);
/// assert_eq!(config.top_n, 5);
/// assert_eq!(config.sample_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of words kept in the ranking (default: 20)
    pub top_n: usize,

    /// Unparsed lines kept for the failure report (default: 5)
    pub sample_limit: usize,

    /// Minimum characters of OCR text (default: 10)
    pub min_ocr_chars: usize,

    /// OCR engine settings
    pub ocr: OcrConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            sample_limit: crate::core::DEFAULT_SAMPLE_LIMIT,
            min_ocr_chars: DEFAULT_MIN_OCR_CHARS,
            ocr: OcrConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of top words.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Sets how many unparsed lines to keep.
    #[must_use]
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Sets the minimum OCR text length.
    #[must_use]
    pub fn with_min_ocr_chars(mut self, chars: usize) -> Self {
        self.min_ocr_chars = chars;
        self
    }

    /// Replaces the OCR settings.
    #[must_use]
    pub fn with_ocr(mut self, ocr: OcrConfig) -> Self {
        self.ocr = ocr;
        self
    }
}

/// Where to find the Tesseract executable.
///
/// The engine is looked up as `command` (default `tesseract` on `PATH`). If
/// that is missing, each of `search_paths` is tried in order. On Windows the
/// search paths default to the usual install locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Executable to run first (default: `tesseract`)
    pub command: PathBuf,

    /// Fallback executables, tried in order
    pub search_paths: Vec<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        let search_paths = if cfg!(windows) {
            vec![
                PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe"),
                PathBuf::from(r"C:\Tesseract-OCR\tesseract.exe"),
            ]
        } else {
            Vec::new()
        };

        Self {
            command: PathBuf::from("tesseract"),
            search_paths,
        }
    }
}

impl OcrConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the executable to run first.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<PathBuf>) -> Self {
        self.command = command.into();
        self
    }

    /// Appends a fallback executable.
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// All candidate executables, `command` first.
    pub fn candidates(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.command).chain(self.search_paths.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_n, 20);
        assert_eq!(config.sample_limit, 5);
        assert_eq!(config.min_ocr_chars, 10);
        assert_eq!(config.ocr.command, PathBuf::from("tesseract"));
    }

    #[test]
    fn test_analysis_config_builder() {
        let config = AnalysisConfig::new()
            .with_top_n(3)
            .with_sample_limit(1)
            .with_min_ocr_chars(0)
            .with_ocr(OcrConfig::new().with_command("/opt/ocr/tesseract"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.sample_limit, 1);
        assert_eq!(config.min_ocr_chars, 0);
        assert_eq!(config.ocr.command, PathBuf::from("/opt/ocr/tesseract"));
    }

    #[test]
    fn test_ocr_candidates_order() {
        let config = OcrConfig {
            command: PathBuf::from("first"),
            search_paths: vec![PathBuf::from("second"), PathBuf::from("third")],
        };
        let names: Vec<_> = config.candidates().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_search_paths() {
        assert_eq!(OcrConfig::default().search_paths.len(), 3);
    }

    #[test]
    fn test_config_serde_partial() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"top_n": 7}"#).unwrap();
        assert_eq!(config.top_n, 7);
        assert_eq!(config.sample_limit, 5);

        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
