///! In-memory list surface with live search

use strsim::jaro_winkler;

use super::sort::compare_by_name;
use super::surface::DisplaySurface;
use crate::types::{CatalogNumber, Column, SatelliteRecord};

/// Minimum similarity for a "did you mean" suggestion
pub const SUGGEST_THRESHOLD: f64 = 0.8;

/// One rendered line of the list
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub highlighted: bool,
    pub cells: Vec<String>,
}

/// List view over a snapshot of a category table.
///
/// Rows are kept in backing order; `order` holds the sorted view and
/// `visible` the subset matching the search text.
#[derive(Debug, Clone)]
pub struct ListView {
    rows: Vec<SatelliteRecord>,
    order: Vec<usize>,
    visible: Vec<usize>,
    search: String,
    highlight: Option<usize>,
    columns: Vec<(Column, bool)>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            order: Vec::new(),
            visible: Vec::new(),
            search: String::new(),
            highlight: None,
            columns: Column::ALL.iter().map(|c| (*c, true)).collect(),
        }
    }

    /// Number of backing rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows currently shown, in view order
    pub fn visible_rows(&self) -> impl Iterator<Item = &SatelliteRecord> + '_ {
        self.visible.iter().map(|&i| &self.rows[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Update the live search text.
    ///
    /// Only rows whose name contains `text` (ignoring case) stay visible.
    /// The highlight moves to the first visible name starting with `text`,
    /// otherwise to the first visible row. An empty text shows every row
    /// and keeps the current highlight.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_string();
        self.refilter();

        if self.search.is_empty() {
            return;
        }

        let needle = self.search.to_lowercase();
        self.highlight = self
            .visible
            .iter()
            .copied()
            .find(|&i| self.rows[i].name.to_lowercase().starts_with(&needle))
            .or_else(|| self.visible.first().copied());
    }

    /// Highlight the row at `position` in the visible list
    pub fn highlight(&mut self, position: usize) -> Option<&SatelliteRecord> {
        let row = *self.visible.get(position)?;
        self.highlight = Some(row);
        Some(&self.rows[row])
    }

    /// Highlight the first visible row with this catalog number
    pub fn highlight_catalog_number(&mut self, catalog_number: CatalogNumber) -> bool {
        match self
            .visible
            .iter()
            .copied()
            .find(|&i| self.rows[i].catalog_number == catalog_number)
        {
            Some(row) => {
                self.highlight = Some(row);
                true
            }
            None => false,
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn highlighted(&self) -> Option<&SatelliteRecord> {
        self.highlight.map(|i| &self.rows[i])
    }

    /// Closest name to `text` when a search finds nothing
    pub fn suggest(&self, text: &str) -> Option<&str> {
        let query = text.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.rows
            .iter()
            .map(|r| (jaro_winkler(&query, &r.name.to_lowercase()), r.name.as_str()))
            .filter(|(score, _)| *score >= SUGGEST_THRESHOLD)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, name)| name)
    }

    pub fn visible_columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(c, _)| *c)
            .collect()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.visible_columns().iter().map(|c| c.title()).collect()
    }

    /// Cells of the visible rows, hidden columns left out
    pub fn render(&self) -> Vec<RenderedRow> {
        let columns = self.visible_columns();
        self.visible
            .iter()
            .map(|&i| {
                let record = &self.rows[i];
                RenderedRow {
                    highlighted: self.highlight == Some(i),
                    cells: columns.iter().map(|c| cell(record, *c)).collect(),
                }
            })
            .collect()
    }

    fn refilter(&mut self) {
        let needle = self.search.to_lowercase();
        self.visible = self
            .order
            .iter()
            .copied()
            .filter(|&i| needle.is_empty() || self.rows[i].name.to_lowercase().contains(&needle))
            .collect();
    }
}

fn cell(record: &SatelliteRecord, column: Column) -> String {
    match column {
        Column::Name => record.name.clone(),
        Column::CatalogNumber => record.catalog_number.to_string(),
        Column::Epoch => format!("{:.4}", record.epoch),
    }
}

impl DisplaySurface for ListView {
    /// The search text survives a model swap and is re-applied
    fn set_model(&mut self, records: &[SatelliteRecord]) {
        self.rows = records.to_vec();
        self.order = (0..self.rows.len()).collect();
        self.highlight = None;
        self.refilter();
    }

    fn sort_by_name(&mut self) {
        let rows = &self.rows;
        self.order.sort_by(|&a, &b| compare_by_name(&rows[a], &rows[b]));
        self.refilter();
    }

    fn set_column_visible(&mut self, column: Column, visible: bool) {
        if let Some(entry) = self.columns.iter_mut().find(|(c, _)| *c == column) {
            entry.1 = visible;
        }
    }

    fn highlighted_row(&self) -> Option<usize> {
        self.highlight
    }
}
