//! Streaming record parser for the line-delimited JSON search response
//!
//! The response body arrives in arbitrary chunks. The parser is invoked with
//! the entire accumulated body and a cursor marking how far it has already
//! consumed; it extracts every fully newline-terminated record past the
//! cursor and leaves incomplete trailing data untouched for the next chunk.

use crate::error::SearchError;
use crate::record::SearchRecord;

/// Drain all complete records from `buf` starting at `*cursor`.
///
/// Advances the cursor past every record it consumes. A record only exists
/// once its terminating `\n` has arrived; a partial trailing line leaves the
/// cursor where it was so the caller retries on the next chunk. The newline
/// itself is reconsumed by the whitespace skip on the following iteration,
/// which is a no-op overlap.
///
/// Malformed lines (bad UTF-8 or bad JSON) are logged and skipped; the cursor
/// still advances so one bad record never stalls the rest of the stream.
pub fn drain_records(buf: &[u8], cursor: &mut usize) -> Vec<SearchRecord> {
    let mut out = Vec::new();

    loop {
        // Skip whitespace and newlines already consumed or padding the stream
        while *cursor < buf.len() && (buf[*cursor] == b' ' || buf[*cursor] == b'\n') {
            *cursor += 1;
        }

        // A record exists only once its newline has arrived
        let Some(rel) = memchr_newline(&buf[*cursor..]) else {
            break;
        };
        let end = *cursor + rel;

        match parse_line(&buf[*cursor..end]) {
            Ok(record) => out.push(record),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed search record");
            }
        }

        *cursor = end;
    }

    out
}

/// Parse one complete response line into a record.
fn parse_line(line: &[u8]) -> Result<SearchRecord, SearchError> {
    let text = std::str::from_utf8(line).map_err(|e| SearchError::MalformedRecord {
        line: String::from_utf8_lossy(line).into_owned(),
        message: e.to_string(),
    })?;

    serde_json::from_str(text).map_err(|e| SearchError::MalformedRecord {
        line: text.to_string(),
        message: e.to_string(),
    })
}

#[inline]
fn memchr_newline(haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(source: &str, title: &str, link: &str) -> String {
        format!(r#"{{"source":"{source}","title":"{title}","link":"{link}"}}"#) + "\n"
    }

    #[test]
    fn drains_complete_lines() {
        let body = format!("{}{}", line("wiki", "Alpha", "/a"), line("file", "Beta", "/b"));
        let mut cursor = 0;

        let records = drain_records(body.as_bytes(), &mut cursor);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Alpha");
        assert_eq!(records[1].title, "Beta");
    }

    #[test]
    fn holds_back_incomplete_trailing_line() {
        let mut body = line("wiki", "Alpha", "/a");
        body.push_str(r#"{"source":"file","title":"Be"#); // cut mid-object
        let mut cursor = 0;

        let records = drain_records(body.as_bytes(), &mut cursor);
        assert_eq!(records.len(), 1);
        let held = cursor;

        // Same buffer, no new data: nothing more is produced, cursor stays put
        let again = drain_records(body.as_bytes(), &mut cursor);
        assert!(again.is_empty());
        assert_eq!(cursor, held);
    }

    #[test]
    fn completing_the_line_later_yields_the_record() {
        let first = line("wiki", "Alpha", "/a");
        let full = format!("{}{}", first, line("file", "Beta", "/b"));
        let cut = first.len() + 10; // mid second line

        let mut cursor = 0;
        let mut got = drain_records(&full.as_bytes()[..cut], &mut cursor);
        got.extend(drain_records(full.as_bytes(), &mut cursor));

        assert_eq!(got.len(), 2);
        assert_eq!(got[1].source, "file");
    }

    #[test]
    fn cursor_is_monotonic_and_reinvocation_is_idempotent() {
        let body = line("wiki", "Alpha", "/a");
        let mut cursor = 0;

        assert_eq!(drain_records(body.as_bytes(), &mut cursor).len(), 1);
        let after_first = cursor;
        assert!(drain_records(body.as_bytes(), &mut cursor).is_empty());
        assert!(cursor >= after_first);
    }

    #[test]
    fn malformed_line_is_skipped_and_stream_continues() {
        let body = format!("{}not json at all\n{}", line("wiki", "Alpha", "/a"), line("ml", "Gamma", "/g"));
        let mut cursor = 0;

        let records = drain_records(body.as_bytes(), &mut cursor);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Alpha");
        assert_eq!(records[1].title, "Gamma");
    }

    #[test]
    fn leading_whitespace_between_records_is_tolerated() {
        let body = format!("\n {}\n\n{}", line("wiki", "Alpha", "/a"), line("file", "Beta", "/b"));
        let mut cursor = 0;

        let records = drain_records(body.as_bytes(), &mut cursor);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_buffer_produces_nothing() {
        let mut cursor = 0;
        assert!(drain_records(b"", &mut cursor).is_empty());
        assert_eq!(cursor, 0);
    }
}
