//! Self-contained HTML report writer.

use std::fs;
use std::path::Path;

use crate::core::summary::Summary;
use crate::error::Result;

const TITLE: &str = "WhatsApp Chat Analysis";

const STYLE: &str = "<style>body{font-family:Segoe UI,Roboto,Arial;margin:20px;background:#f7f7f7;color:#111}h1{color:#0b5}table{border-collapse:collapse;margin-top:10px;width:100%;max-width:800px}th,td{border:1px solid #ddd;padding:8px;text-align:left}th{background:#eee}</style>";

/// Renders a summary as a standalone HTML page.
///
/// The page has no external assets: inline CSS, three headline figures,
/// a messages-per-user table (busiest first) and a top-words table. User
/// names and words are HTML-escaped.
pub fn to_html(summary: &Summary) -> String {
    let mut lines: Vec<String> = vec![
        "<!doctype html>".into(),
        "<html lang=\"en\">".into(),
        "<head>".into(),
        "<meta charset=\"utf-8\">".into(),
        "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">".into(),
        format!("<title>{TITLE}</title>"),
        STYLE.into(),
        "</head>".into(),
        "<body>".into(),
        format!("<h1>{TITLE}</h1>"),
        format!(
            "<p><strong>Total messages:</strong> {}</p>",
            summary.total_messages
        ),
        format!(
            "<p><strong>Media messages:</strong> {}</p>",
            summary.media_count
        ),
        format!(
            "<p><strong>Emoji count (approx):</strong> {}</p>",
            summary.emoji_count
        ),
    ];

    lines.push("<h2>Messages per user</h2>".into());
    lines.push("<table>".into());
    lines.push("<tr><th>User</th><th>Count</th></tr>".into());
    for (user, count) in summary.ranked_users() {
        lines.push(table_row(user, count));
    }
    lines.push("</table>".into());

    lines.push("<h2>Top words</h2>".into());
    lines.push("<table>".into());
    lines.push("<tr><th>Word</th><th>Count</th></tr>".into());
    for word in &summary.top_words {
        lines.push(table_row(&word.word, word.count));
    }
    lines.push("</table>".into());

    lines.push("</body></html>".into());
    lines.join("\n")
}

/// Writes the HTML report to `path`, replacing any existing file.
pub fn write_html(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, to_html(summary))?;
    Ok(())
}

fn table_row(label: &str, count: usize) -> String {
    format!("<tr><td>{}</td><td>{}</td></tr>", escape_html(label), count)
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
