use crate::types::{Column, SatelliteRecord};

/// The list widget the selector drives.
///
/// Implementations keep their own copy of the rows they show; the
/// selector only ever reads records from its own tables, using the row
/// index reported by [`highlighted_row`](DisplaySurface::highlighted_row).
pub trait DisplaySurface {
    /// Replace the backing rows. Any previous ordering and highlight are lost.
    fn set_model(&mut self, records: &[SatelliteRecord]);

    /// Order rows ascending by name, ignoring ASCII case
    fn sort_by_name(&mut self);

    fn set_column_visible(&mut self, column: Column, visible: bool);

    /// Index, in the backing rows, of the highlighted row
    fn highlighted_row(&self) -> Option<usize>;
}
