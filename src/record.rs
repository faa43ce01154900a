//! The wire-level search result record
//!
//! The search endpoint answers with `application/json-seq`: zero or more
//! newline-terminated JSON objects, one per match, streamed as they are found.

use serde::{Deserialize, Serialize};

/// One parsed match from the search response.
///
/// Ephemeral by design: a record is constructed from one response line, handed
/// to the surface once, and discarded. Nothing in the crate retains a
/// collection of records beyond what the surface chooses to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Which searcher module produced this match
    pub source: String,
    /// Display text for the match
    pub title: String,
    /// Destination URL for the match
    pub link: String,
    /// Optional one-line summary; the server always sends it but surfaces
    /// may ignore it
    #[serde(default)]
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record_without_summary() {
        let rec: SearchRecord =
            serde_json::from_str(r#"{"source":"wiki","title":"Home","link":"/wiki/"}"#)
                .expect("record should parse");
        assert_eq!(rec.source, "wiki");
        assert_eq!(rec.title, "Home");
        assert_eq!(rec.link, "/wiki/");
        assert_eq!(rec.summary, "");
    }

    #[test]
    fn parses_record_with_summary() {
        let rec: SearchRecord = serde_json::from_str(
            r#"{"source":"file","title":"notes.txt","link":"/file/notes.txt","summary":"meeting notes"}"#,
        )
        .expect("record should parse");
        assert_eq!(rec.summary, "meeting notes");
    }
}
