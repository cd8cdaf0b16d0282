//! JSON report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::summary::Summary;
use crate::error::Result;

/// Writes the full summary to `path` as pretty-printed JSON.
///
/// # Format
/// ```json
/// {
///   "total_messages": 3,
///   "per_user": {"Alice": 2, "Bob": 1},
///   "per_hour": [0, 0, ...],
///   "top_words": [{"word": "pizza", "count": 2}],
///   ...
/// }
/// ```
pub fn write_json(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(summary)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the summary to a pretty-printed JSON string.
///
/// Counters keep their first-seen key order.
pub fn to_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
