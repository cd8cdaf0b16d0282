//! Splitting the text after a timestamp into author and message.

/// Longest plausible author name, in characters.
pub const MAX_AUTHOR_CHARS: usize = 100;

/// Prefixes that mark the text before `": "` as a system notice rather than a
/// display name.
pub const SYSTEM_PREFIXES: &[&str] = &["Messages and calls", "You "];

/// Author/message pair derived from a classified line's `rest` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSplit {
    /// Display name, absent for system text
    pub author: Option<String>,
    /// Message body
    pub message: String,
}

/// Splits `rest` on the first `": "`.
///
/// The left side becomes the author unless it is longer than
/// [`MAX_AUTHOR_CHARS`] or starts with one of [`SYSTEM_PREFIXES`], in which
/// case the whole text is kept as an author-less message. An empty left side
/// yields no author but still strips it from the message.
///
/// ```rust
/// use chatstat::parsing::split_author;
///
/// let split = split_author("Alice: see you at 5: ok?");
/// assert_eq!(split.author.as_deref(), Some("Alice"));
/// assert_eq!(split.message, "see you at 5: ok?");
///
/// let system = split_author("Alice added Bob");
/// assert!(system.author.is_none());
/// ```
pub fn split_author(rest: &str) -> AuthorSplit {
    let Some((candidate, message)) = rest.split_once(": ") else {
        return AuthorSplit {
            author: None,
            message: rest.to_string(),
        };
    };

    let candidate = candidate.trim();
    if is_system_author(candidate) {
        return AuthorSplit {
            author: None,
            message: rest.to_string(),
        };
    }

    AuthorSplit {
        author: (!candidate.is_empty()).then(|| candidate.to_string()),
        message: message.trim().to_string(),
    }
}

/// Returns `true` if a candidate author is really system text.
pub fn is_system_author(candidate: &str) -> bool {
    candidate.chars().count() > MAX_AUTHOR_CHARS
        || SYSTEM_PREFIXES.iter().any(|p| candidate.starts_with(p))
}
