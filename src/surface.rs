//! Result surface: the rendering collaborator contract
//!
//! The original client rendered into a DOM subtree. The crate keeps that
//! collaborator at arm's length behind a trait so the lifecycle logic can be
//! exercised against an in-memory panel in tests and a console panel in the
//! demo binary.

use url::Url;

use crate::record::SearchRecord;

/// Rendering contract for a search widget's results panel.
///
/// Implementations must treat each `append_rows` call as one atomic batch
/// (the buffered-commit behavior that avoids visible partial state) and must
/// keep `open_panel`/`close_panel` idempotent. Nothing but `clear_panel` may
/// remove rows that were appended for the current request.
pub trait ResultSurface: Send + 'static {
    /// Create the results panel if it does not exist yet
    fn open_panel(&mut self);

    /// Recreate an empty results body, discarding rows from a prior request
    fn clear_panel(&mut self);

    /// Append one batch of parsed records; earlier rows stay untouched
    fn append_rows(&mut self, records: &[SearchRecord]);

    /// Show the single "(no matches found)" row; only called when zero rows
    /// were appended for this request
    fn show_no_results(&mut self);

    /// Remove the results panel entirely
    fn close_panel(&mut self);

    /// Navigate away, used for the session-expiry login redirect
    fn navigate(&mut self, target: Url);
}

/// One rendered row of the results panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    /// A real match: source cell plus a link cell (text = title, href = link)
    Match { source: String, title: String, link: String },
    /// The "(no matches found)" row
    NoResults,
}

/// In-memory results panel.
///
/// Mirrors the structure the original built in the DOM: an optional panel
/// node holding a list of rows. Records the last navigation target so tests
/// can assert on the login redirect.
#[derive(Debug, Default)]
pub struct TablePanel {
    rows: Option<Vec<PanelRow>>,
    navigated: Option<Url>,
}

impl TablePanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the results panel currently exists
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.rows.is_some()
    }

    /// Rows currently visible, empty when the panel is closed
    #[must_use]
    pub fn rows(&self) -> &[PanelRow] {
        self.rows.as_deref().unwrap_or(&[])
    }

    /// Where the surface was last told to navigate, if anywhere
    #[must_use]
    pub fn navigation_target(&self) -> Option<&Url> {
        self.navigated.as_ref()
    }
}

impl ResultSurface for TablePanel {
    fn open_panel(&mut self) {
        if self.rows.is_none() {
            self.rows = Some(Vec::new());
        }
    }

    fn clear_panel(&mut self) {
        self.rows = Some(Vec::new());
    }

    fn append_rows(&mut self, records: &[SearchRecord]) {
        let body = self.rows.get_or_insert_with(Vec::new);
        body.extend(records.iter().map(|r| PanelRow::Match {
            source: r.source.clone(),
            title: r.title.clone(),
            link: r.link.clone(),
        }));
    }

    fn show_no_results(&mut self) {
        self.rows.get_or_insert_with(Vec::new).push(PanelRow::NoResults);
    }

    fn close_panel(&mut self) {
        self.rows = None;
    }

    fn navigate(&mut self, target: Url) {
        self.navigated = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, title: &str, link: &str) -> SearchRecord {
        SearchRecord {
            source: source.to_string(),
            title: title.to_string(),
            link: link.to_string(),
            summary: String::new(),
        }
    }

    #[test]
    fn round_trip_single_record() {
        let mut panel = TablePanel::new();
        panel.open_panel();
        panel.append_rows(&[record("a", "b", "c")]);

        assert_eq!(
            panel.rows(),
            &[PanelRow::Match {
                source: "a".to_string(),
                title: "b".to_string(),
                link: "c".to_string(),
            }]
        );
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut panel = TablePanel::new();
        panel.open_panel();
        panel.append_rows(&[record("a", "b", "c")]);
        panel.open_panel();
        assert_eq!(panel.rows().len(), 1, "re-opening must not clear rows");

        panel.close_panel();
        panel.close_panel();
        assert!(!panel.is_open());
    }

    #[test]
    fn clear_recreates_an_empty_body() {
        let mut panel = TablePanel::new();
        panel.open_panel();
        panel.append_rows(&[record("a", "b", "c")]);
        panel.clear_panel();
        assert!(panel.is_open());
        assert!(panel.rows().is_empty());
    }

    #[test]
    fn batches_append_without_disturbing_earlier_rows() {
        let mut panel = TablePanel::new();
        panel.open_panel();
        panel.append_rows(&[record("a", "1", "/1")]);
        panel.append_rows(&[record("b", "2", "/2"), record("c", "3", "/3")]);
        assert_eq!(panel.rows().len(), 3);
        assert!(matches!(&panel.rows()[0], PanelRow::Match { title, .. } if title == "1"));
    }
}
