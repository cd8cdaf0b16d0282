//! Text extraction from chat screenshots.
//!
//! The analyzer only needs "image in, text out", expressed by
//! [`TextExtractor`]. [`TesseractExtractor`] implements it by running the
//! `tesseract` command-line tool, so no OCR library is linked in.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatstat::ocr::{TesseractExtractor, TextExtractor};
//! use std::path::Path;
//!
//! let extractor = TesseractExtractor::new();
//! let text = extractor.extract(Path::new("screenshot.png"))?;
//! println!("{text}");
//! # Ok::<(), chatstat::error::ImageErrorKind>(())
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::config::OcrConfig;
use crate::error::ImageErrorKind;

/// File extensions treated as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Returns `true` if `path` has one of the [`IMAGE_EXTENSIONS`].
///
/// ```rust
/// use chatstat::ocr::is_image_path;
///
/// assert!(is_image_path("Screenshot.PNG"));
/// assert!(!is_image_path("chat.txt"));
/// ```
pub fn is_image_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Turns an image into plain text.
pub trait TextExtractor: Send + Sync {
    /// Returns the raw text recognised in `image`.
    fn extract(&self, image: &Path) -> Result<String, ImageErrorKind>;
}

impl<F> TextExtractor for F
where
    F: Fn(&Path) -> Result<String, ImageErrorKind> + Send + Sync,
{
    fn extract(&self, image: &Path) -> Result<String, ImageErrorKind> {
        self(image)
    }
}

/// OCR through the `tesseract` executable.
#[derive(Debug, Clone, Default)]
pub struct TesseractExtractor {
    config: OcrConfig,
}

impl TesseractExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    /// First line of `tesseract --version` for the first candidate that runs.
    pub fn version(&self) -> Option<String> {
        self.config.candidates().find_map(|candidate| {
            let output = Command::new(candidate).arg("--version").output().ok()?;
            if !output.status.success() {
                return None;
            }
            // Older releases print the banner on stderr.
            let banner = if output.stdout.is_empty() {
                output.stderr
            } else {
                output.stdout
            };
            String::from_utf8_lossy(&banner)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
        })
    }

    /// Returns `true` if some candidate executable can be started.
    pub fn is_available(&self) -> bool {
        self.version().is_some()
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract(&self, image: &Path) -> Result<String, ImageErrorKind> {
        fs::metadata(image)?;

        for candidate in self.config.candidates() {
            debug!(engine = %candidate.display(), image = %image.display(), "running OCR");
            match Command::new(candidate).arg(image).arg("stdout").output() {
                Ok(output) if output.status.success() => {
                    return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    warn!(status = %output.status, "OCR engine failed");
                    return Err(ImageErrorKind::Engine(if stderr.is_empty() {
                        format!("engine exited with {}", output.status)
                    } else {
                        stderr
                    }));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(engine = %candidate.display(), "OCR engine not found");
                }
                Err(e) => return Err(ImageErrorKind::Io(e)),
            }
        }

        Err(ImageErrorKind::EngineNotFound)
    }
}
