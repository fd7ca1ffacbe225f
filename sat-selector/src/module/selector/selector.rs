///! Satellite selector facade
///!
///! Owns the category tables, tracks the active one and keeps the display
///! surface in sync with it. Activation is forwarded to subscribers as a
///! catalog number.

use crate::error::SelectorError;
use crate::module::satdata::{CatalogLoader, LoadReport, SatDataStore};
use crate::types::{
    ALL_SATELLITES, CatalogNumber, CategoryTable, Column, ColumnFlags, SatelliteRecord,
};

use super::list_view::ListView;
use super::surface::DisplaySurface;

/// Handle returned by [`SatSelector::connect_activated`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ActivatedCallback = Box<dyn FnMut(CatalogNumber)>;

pub struct SatSelector<D: DisplaySurface = ListView> {
    tables: Vec<CategoryTable>,
    active: usize,
    flags: ColumnFlags,
    surface: D,
    subscribers: Vec<(SubscriptionId, ActivatedCallback)>,
    next_subscription: u64,
}

impl SatSelector<ListView> {
    /// Load every table through `loader` and show "All satellites"
    /// in a fresh [`ListView`]
    pub fn initialize<S: SatDataStore>(flags: ColumnFlags, loader: &CatalogLoader<S>) -> Self {
        Self::initialize_with_surface(flags, loader, ListView::new()).0
    }
}

impl<D: DisplaySurface> SatSelector<D> {
    /// Load every table through `loader` and attach `surface`
    pub fn initialize_with_surface<S: SatDataStore>(
        flags: ColumnFlags,
        loader: &CatalogLoader<S>,
        surface: D,
    ) -> (Self, LoadReport) {
        let (tables, report) = loader.load_all_with_report();
        (Self::from_tables(flags, tables, surface), report)
    }

    /// Build a selector from tables that are already loaded.
    ///
    /// Index 0 is always "All satellites". If the list does not start with
    /// it, an empty one is put in front.
    pub fn from_tables(flags: ColumnFlags, mut tables: Vec<CategoryTable>, surface: D) -> Self {
        if tables.first().map(|t| t.name()) != Some(ALL_SATELLITES) {
            tables.insert(0, CategoryTable::all_satellites());
        }

        // zero means "default" just like ColumnFlags::from_bits
        let flags = ColumnFlags::from_bits(flags.bits());

        let mut selector = Self {
            tables,
            active: 0,
            flags,
            surface,
            subscribers: Vec::new(),
            next_subscription: 0,
        };

        for column in Column::ALL {
            selector
                .surface
                .set_column_visible(column, flags.is_visible(column));
        }
        selector.show_active();

        tracing::debug!(
            "Satellite selector ready with {} categories",
            selector.tables.len()
        );
        selector
    }

    /// Category labels in table order, as shown in the group chooser
    pub fn category_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name()).collect()
    }

    pub fn tables(&self) -> &[CategoryTable] {
        &self.tables
    }

    pub fn category_count(&self) -> usize {
        self.tables.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_category(&self) -> &CategoryTable {
        &self.tables[self.active]
    }

    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }

    /// Visible columns in display order
    pub fn columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| self.flags.is_visible(*c))
            .collect()
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Switch the displayed category.
    ///
    /// The surface gets the new table's rows and the name sort is applied
    /// again. Tables themselves never change.
    pub fn select_category(&mut self, index: usize) -> Result<(), SelectorError> {
        if index >= self.tables.len() {
            return Err(SelectorError::CategoryOutOfRange {
                index,
                count: self.tables.len(),
            });
        }

        self.active = index;
        self.show_active();

        tracing::debug!(
            "Selected category {} ({} satellites)",
            self.tables[index].name(),
            self.tables[index].len()
        );
        Ok(())
    }

    /// Register a callback for activated satellites
    pub fn connect_activated(
        &mut self,
        callback: impl FnMut(CatalogNumber) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Confirm the highlighted row (e.g. double click).
    ///
    /// Notifies every subscriber with the row's catalog number and returns
    /// it. Does nothing when no row is highlighted.
    pub fn activate_record(&mut self) -> Option<CatalogNumber> {
        let catalog_number = self.get_selected()?.catalog_number;

        tracing::debug!("Satellite {} activated", catalog_number);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(catalog_number);
        }
        Some(catalog_number)
    }

    /// The highlighted record of the active category.
    ///
    /// `None` means nothing is highlighted, which is a normal state.
    pub fn get_selected(&self) -> Option<&SatelliteRecord> {
        let row = self.surface.highlighted_row()?;
        self.active_category().get(row)
    }

    fn show_active(&mut self) {
        let table = &self.tables[self.active];
        self.surface.set_model(table.records());
        // a new model has no sort order
        self.surface.sort_by_name();
    }
}
