//! HTML rendering of a list of readings for embedding in a generated page.

use crate::record::Record;

const HEADER: &str =
    "<tr><th>Id</th><th>Email</th><th>Blood Sugar</th><th>Date</th><th>Time</th><th>Notes</th></tr>\n";

/// Render `records` as a complete `<table>`, one row per reading, in the
/// order given.
pub fn html_table(records: &[Record]) -> String {
    let mut html = String::from("<table>\n");
    html.push_str(HEADER);
    for record in records {
        html.push_str(&record.to_html_row());
    }
    html.push_str("</table>\n");
    html
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
