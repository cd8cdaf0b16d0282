//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum that covers every
//! failure the library surfaces to callers. Per-line problems (an unparseable
//! date, a missing author) are never errors: they degrade the affected message
//! and analysis carries on.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::Summary;
///
/// fn my_function() -> Result<Option<Summary>> {
///     // ... operations that may fail
///     Ok(None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist or can't be read
    /// - Permission denied
    /// - Disk is full (when writing a report)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Not a single message could be reconstructed from the input.
    ///
    /// Carries up to a handful of the lines that failed to match any
    /// timestamp pattern so the caller can show the user what went wrong.
    #[error(
        "No messages could be parsed from the input. This might be due to:\n\
         1. Unsupported WhatsApp export format\n\
         2. File encoding issues\n\
         3. Empty or invalid file\n\n\
         First few unparsed lines:\n{}\n\n\
         Please ensure your file is a valid WhatsApp export (.txt) with format like:\n\
         dd/mm/yyyy, hh:mm - Name: Message",
        format_samples(samples)
    )]
    NoMessagesParsed {
        /// Sample lines that matched no timestamp pattern
        samples: Vec<String>,
    },

    /// Text could not be recovered from an image.
    #[error("Failed to process image{}: {source}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    ImageExtraction {
        /// The image being processed, if known
        path: Option<PathBuf>,
        /// What went wrong
        #[source]
        source: ImageErrorKind,
    },

    /// A value didn't match the expected structure.
    ///
    /// Used for unknown report extensions and output formats whose feature
    /// is disabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when generated report bytes are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of OCR failures.
#[derive(Debug, Error)]
pub enum ImageErrorKind {
    /// The OCR engine binary could not be found
    #[error(
        "Tesseract OCR not found. Please install Tesseract OCR from \
         https://github.com/tesseract-ocr/tesseract and ensure it's in your system PATH."
    )]
    EngineNotFound,
    /// The OCR engine ran but reported a failure
    #[error("OCR error: {0}. Please ensure Tesseract OCR is installed and configured correctly.")]
    Engine(String),
    /// The engine produced too little text to be a chat export
    #[error(
        "Could not extract sufficient text from image ({chars} characters, need at least {minimum}). \
         Please ensure the image is clear and contains readable WhatsApp chat text."
    )]
    InsufficientText {
        /// Characters extracted (after trimming)
        chars: usize,
        /// Required minimum
        minimum: usize,
    },
    /// Reading the image or the engine's output failed
    #[error("{0}")]
    Io(#[from] io::Error),
}

fn format_samples(samples: &[String]) -> String {
    if samples.is_empty() {
        "No lines found".to_string()
    } else {
        samples.join("\n")
    }
}

impl From<std::string::FromUtf8Error> for ChatstatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatError::Utf8 {
            context: "report conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates a "no messages parsed" error from sample lines.
    pub fn no_messages(samples: Vec<String>) -> Self {
        ChatstatError::NoMessagesParsed { samples }
    }

    /// Creates an image extraction error.
    pub fn image(kind: ImageErrorKind, path: Option<PathBuf>) -> Self {
        ChatstatError::ImageExtraction { path, source: kind }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns the unparsed sample lines carried by a
    /// [`NoMessagesParsed`](ChatstatError::NoMessagesParsed) error.
    pub fn unparsed_samples(&self) -> Option<&[String]> {
        match self {
            ChatstatError::NoMessagesParsed { samples } => Some(samples),
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatError::Io(_))
    }

    /// Returns `true` if no messages could be parsed.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatstatError::NoMessagesParsed { .. })
    }

    /// Returns `true` if this is an OCR failure.
    pub fn is_image_extraction(&self) -> bool {
        matches!(self, ChatstatError::ImageExtraction { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatstatError::InvalidFormat { .. })
    }
}
