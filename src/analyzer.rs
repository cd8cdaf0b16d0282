//! End-to-end analysis: content source in, [`Summary`] out.
//!
//! Lines stream through the reassembler straight into the aggregator, so a
//! file is read once and never held in memory as a whole.
//!
//! # Example
//!
//! ```rust
//! use chatstat::Analyzer;
//!
//! let summary = Analyzer::new().analyze_str(
//!     "12/09/2025, 21:02 - Alice: Hey! How are you?\n\
//!      12/09/2025, 21:03 - Bob: I'm fine, thanks! :)",
//! )?;
//!
//! assert_eq!(summary.total_messages, 2);
//! assert_eq!(summary.question_count, 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::core::{Aggregator, Reassembler, Summary};
use crate::error::{ChatstatError, ImageErrorKind, Result};
use crate::ocr::{TesseractExtractor, TextExtractor, is_image_path};

/// Where the chat text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// An exported `.txt` chat log
    File(PathBuf),
    /// A screenshot to run through OCR
    Image(PathBuf),
    /// Chat text already in memory
    Text(String),
}

impl ContentSource {
    /// `Image` for known image extensions, `File` otherwise.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if is_image_path(&path) {
            ContentSource::Image(path)
        } else {
            ContentSource::File(path)
        }
    }

    /// The path behind a file or image source.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ContentSource::File(path) | ContentSource::Image(path) => Some(path.as_path()),
            ContentSource::Text(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ContentSource::Image(_))
    }
}

/// Runs analyses with a fixed configuration and OCR engine.
///
/// # Example
///
/// ```rust
/// use chatstat::{Analyzer, ContentSource};
/// use chatstat::config::AnalysisConfig;
/// use chatstat::error::ImageErrorKind;
/// use std::path::Path;
///
/// let analyzer = Analyzer::with_config(AnalysisConfig::new().with_top_n(5))
///     .with_extractor(|_: &Path| {
///         Ok::<_, ImageErrorKind>("[12/09/2025, 9:02 PM] Alice: from a screenshot".to_string())
///     });
///
/// let summary = analyzer.analyze(&ContentSource::Image("shot.png".into()))?;
/// assert_eq!(summary.per_hour[21], 1);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub struct Analyzer {
    config: AnalysisConfig,
    extractor: Box<dyn TextExtractor>,
}

impl Analyzer {
    /// Creates an analyzer with default settings and the Tesseract engine.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Creates an analyzer using `config`, including its OCR settings.
    pub fn with_config(config: AnalysisConfig) -> Self {
        let extractor = TesseractExtractor::with_config(config.ocr.clone());
        Self {
            config,
            extractor: Box::new(extractor),
        }
    }

    /// Replaces the OCR engine.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes any content source.
    ///
    /// # Errors
    ///
    /// - [`ChatstatError::Io`] if a file cannot be opened or read
    /// - [`ChatstatError::ImageExtraction`] if OCR fails or yields too little text
    /// - [`ChatstatError::NoMessagesParsed`] if no message could be reconstructed
    pub fn analyze(&self, source: &ContentSource) -> Result<Summary> {
        match source {
            ContentSource::File(path) => {
                info!(path = %path.display(), "analyzing chat export");
                let file = File::open(path)?;
                self.analyze_reader(BufReader::new(file))
            }
            ContentSource::Image(path) => {
                info!(path = %path.display(), "analyzing chat screenshot");
                let text = self.extract_text(path)?;
                self.analyze_str(&text)
            }
            ContentSource::Text(text) => self.analyze_str(text),
        }
    }

    /// Analyzes a path, treating known image extensions as screenshots.
    pub fn analyze_path(&self, path: impl AsRef<Path>) -> Result<Summary> {
        self.analyze(&ContentSource::from_path(path.as_ref()))
    }

    /// Analyzes chat text held in memory.
    pub fn analyze_str(&self, text: &str) -> Result<Summary> {
        let mut pass = Pass::new(self.config.sample_limit);
        for line in physical_lines(text) {
            pass.push(line);
        }
        pass.finish(self.config.top_n)
    }

    /// Analyzes a chat log read line by line.
    ///
    /// Invalid UTF-8 sequences are dropped.
    pub fn analyze_reader<R: BufRead>(&self, reader: R) -> Result<Summary> {
        let mut pass = Pass::new(self.config.sample_limit);
        for line in LossyLines::new(reader) {
            pass.push(&line?);
        }
        pass.finish(self.config.top_n)
    }

    /// Runs OCR on `image` and checks that enough text came back.
    pub fn extract_text(&self, image: &Path) -> Result<String> {
        let text = self
            .extractor
            .extract(image)
            .map_err(|kind| ChatstatError::image(kind, Some(image.to_path_buf())))?;

        let chars = text.trim().chars().count();
        if chars < self.config.min_ocr_chars {
            warn!(
                image = %image.display(),
                chars,
                minimum = self.config.min_ocr_chars,
                "OCR produced too little text"
            );
            return Err(ChatstatError::image(
                ImageErrorKind::InsufficientText {
                    chars,
                    minimum: self.config.min_ocr_chars,
                },
                Some(image.to_path_buf()),
            ));
        }
        Ok(text)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Analyzes `path` with default settings and the Tesseract engine.
///
/// `is_image` forces OCR regardless of the file extension.
pub fn analyze(path: impl AsRef<Path>, top_n: usize, is_image: bool) -> Result<Summary> {
    let path = path.as_ref().to_path_buf();
    let source = if is_image {
        ContentSource::Image(path)
    } else {
        ContentSource::File(path)
    };
    Analyzer::with_config(AnalysisConfig::new().with_top_n(top_n)).analyze(&source)
}

/// One reassembly + aggregation pass.
struct Pass {
    reassembler: Reassembler,
    aggregator: Aggregator,
}

impl Pass {
    fn new(sample_limit: usize) -> Self {
        Self {
            reassembler: Reassembler::with_sample_limit(sample_limit),
            aggregator: Aggregator::new(),
        }
    }

    fn push(&mut self, line: &str) {
        if let Some(message) = self.reassembler.push_line(line) {
            self.aggregator.observe(&message);
        }
    }

    fn finish(mut self, top_n: usize) -> Result<Summary> {
        if let Some(message) = self.reassembler.finish() {
            self.aggregator.observe(&message);
        }
        if self.aggregator.total() == 0 {
            return Err(ChatstatError::no_messages(
                self.reassembler.take_unparsed_samples(),
            ));
        }
        if self.reassembler.unparsed_count() > 0 {
            info!(
                unparsed = self.reassembler.unparsed_count(),
                "some lines matched no timestamp grammar"
            );
        }
        Ok(self.aggregator.finish(top_n))
    }
}

// `\r\n`, `\n` and a lone `\r` all end a line.
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

/// Physical lines of a byte stream, decoded as UTF-8 with bad bytes dropped.
///
/// `\r\n`, `\n` and a lone `\r` are all line terminators; the terminator
/// is not included.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn take_line(&self) -> String {
        self.buf.utf8_chunks().map(|chunk| chunk.valid()).collect()
    }

    /// Consumes the `\n` of a `\r\n` pair, if present.
    fn skip_paired_newline(&mut self) -> io::Result<()> {
        loop {
            match self.reader.fill_buf() {
                Ok(next) => {
                    if next.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(e)),
            };
            if available.is_empty() {
                break;
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let carriage_return = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    if carriage_return {
                        if let Err(e) = self.skip_paired_newline() {
                            return Some(Err(e));
                        }
                    }
                    return Some(Ok(self.take_line()));
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        if self.buf.is_empty() {
            None
        } else {
            Some(Ok(self.take_line()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const CHAT: &str = "12/09/2025, 21:02 - Alice: Hey! How are you?\n\
                        12/09/2025, 21:03 - Bob: I'm fine, thanks! :)\n\
                        [12/09/2025, 9:02 PM] Alice: iOS format test\n";

    #[test]
    fn test_analyze_str() {
        let summary = Analyzer::new().analyze_str(CHAT).unwrap();
        assert_eq!(summary.total_messages, 3);
        assert_eq!(summary.per_user.get("Alice"), 2);
        assert_eq!(summary.per_hour[21], 3);
    }

    #[test]
    fn test_analyze_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CHAT.as_bytes()).unwrap();

        let summary = Analyzer::new()
            .analyze(&ContentSource::File(file.path().to_path_buf()))
            .unwrap();
        assert_eq!(summary, Analyzer::new().analyze_str(CHAT).unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Analyzer::new()
            .analyze_path("/definitely/not/here.txt")
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_blank_input_has_no_messages() {
        let err = Analyzer::new().analyze_str("\n   \n\n").unwrap_err();
        assert!(err.is_no_messages());
        assert_eq!(err.unparsed_samples().map(<[String]>::len), Some(0));
        assert!(err.to_string().contains("No lines found"));
    }

    #[test]
    fn test_unparsed_samples_capped() {
        let text: String = (0..8).map(|i| format!("noise {i}\n")).collect();
        let err = Analyzer::with_config(AnalysisConfig::new().with_sample_limit(3))
            .analyze_str(&text)
            .unwrap_err();
        assert_eq!(
            err.unparsed_samples().unwrap(),
            ["noise 0", "noise 1", "noise 2"]
        );
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let mut bytes = b"12/09/2025, 21:02 - Alice: caf".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice("\u{e9} ok\r\n".as_bytes());

        let summary = Analyzer::new().analyze_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(summary.total_messages, 1);
        assert_eq!(summary.longest_message, "caf\u{e9} ok");
    }

    #[test]
    fn test_lossy_lines() {
        let lines: Vec<String> = LossyLines::new(Cursor::new(b"a\nb\xff\r\n\nlast".to_vec()))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, ["a", "b", "", "last"]);
    }

    #[test]
    fn test_lossy_lines_lone_carriage_return() {
        let lines: Vec<String> = LossyLines::new(Cursor::new(b"a\rb\r\rc\r\nd\r".to_vec()))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, ["a", "b", "", "c", "d"]);
    }

    #[test]
    fn test_lossy_lines_crlf_split_across_reads() {
        let reader = io::BufReader::with_capacity(2, Cursor::new(b"a\r\nbc\r\n".to_vec()));
        let lines: Vec<String> = LossyLines::new(reader).map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["a", "bc"]);
    }

    #[test]
    fn test_carriage_return_only_chat() {
        let text = CHAT.replace('\n', "\r");
        let from_str = Analyzer::new().analyze_str(&text).unwrap();
        let from_reader = Analyzer::new()
            .analyze_reader(Cursor::new(text.into_bytes()))
            .unwrap();

        assert_eq!(from_str.total_messages, 3);
        assert_eq!(from_str, from_reader);
        assert_eq!(from_str.per_user.get("Bob"), 1);
    }

    #[test]
    fn test_image_with_extractor() {
        let analyzer = Analyzer::new().with_extractor(|_: &Path| {
            Ok::<_, ImageErrorKind>(CHAT.to_string())
        });
        let summary = analyzer
            .analyze(&ContentSource::Image("shot.png".into()))
            .unwrap();
        assert_eq!(summary.total_messages, 3);
    }

    #[test]
    fn test_image_insufficient_text() {
        let analyzer =
            Analyzer::new().with_extractor(|_: &Path| Ok::<String, ImageErrorKind>("  short  ".to_string()));
        let err = analyzer.analyze_path("shot.jpg").unwrap_err();
        assert!(err.is_image_extraction());
        assert!(err.to_string().contains("5 characters, need at least 10"));
    }

    #[test]
    fn test_image_engine_failure_keeps_path() {
        let analyzer = Analyzer::new().with_extractor(|_: &Path| {
            Err::<String, _>(ImageErrorKind::EngineNotFound)
        });
        let err = analyzer
            .analyze(&ContentSource::Image("/tmp/shot.png".into()))
            .unwrap_err();
        assert!(err.to_string().contains("/tmp/shot.png"));
        assert!(err.to_string().contains("Tesseract OCR not found"));
    }

    #[test]
    fn test_content_source_from_path() {
        assert!(ContentSource::from_path("a/b.PNG").is_image());
        assert!(!ContentSource::from_path("chat.txt").is_image());
        assert_eq!(
            ContentSource::from_path("chat.txt").path(),
            Some(Path::new("chat.txt"))
        );
        assert!(ContentSource::Text("x".into()).path().is_none());
    }

    #[test]
    fn test_text_source() {
        let summary = Analyzer::new()
            .analyze(&ContentSource::Text(CHAT.into()))
            .unwrap();
        assert_eq!(summary.total_messages, 3);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let analyzer = Analyzer::new();
        assert_eq!(
            analyzer.analyze_str(CHAT).unwrap(),
            analyzer.analyze_str(CHAT).unwrap()
        );
    }
}
