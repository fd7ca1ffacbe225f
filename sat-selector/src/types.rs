use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};
use std::path::{Path, PathBuf};

/// NORAD catalog number. Also the base name of the record file on disk.
pub type CatalogNumber = u32;

/// Label of the table that holds every satellite found in the data directory
pub const ALL_SATELLITES: &str = "All satellites";

/// One row of a category table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteRecord {
    /// Display label (nickname if the record file has one)
    pub name: String,
    /// Catalog number
    pub catalog_number: CatalogNumber,
    /// TLE epoch as Julian date
    pub epoch: f64,
}

impl SatelliteRecord {
    pub fn new(name: impl Into<String>, catalog_number: CatalogNumber, epoch: f64) -> Self {
        Self {
            name: name.into(),
            catalog_number,
            epoch,
        }
    }
}

/// A named, ordered collection of satellites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    name: String,
    /// Category file this table was built from (`None` for "All satellites")
    #[serde(default)]
    source: Option<PathBuf>,
    records: Vec<SatelliteRecord>,
}

impl CategoryTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            records: Vec::new(),
        }
    }

    /// Empty "All satellites" table
    pub fn all_satellites() -> Self {
        Self::new(ALL_SATELLITES)
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&SatelliteRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, catalog_number: CatalogNumber) -> bool {
        self.records
            .iter()
            .any(|r| r.catalog_number == catalog_number)
    }

    /// Tables are only filled while loading
    pub(crate) fn push(&mut self, record: SatelliteRecord) {
        self.records.push(record);
    }
}

impl FromIterator<SatelliteRecord> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = SatelliteRecord>>(iter: I) -> Self {
        Self {
            name: ALL_SATELLITES.to_string(),
            source: None,
            records: iter.into_iter().collect(),
        }
    }
}

/// Record fields presented by the selector, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    CatalogNumber,
    Epoch,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Name, Column::CatalogNumber, Column::Epoch];

    /// Column header
    pub fn title(&self) -> &'static str {
        match self {
            Column::Name => "Available Satellites",
            Column::CatalogNumber => "Catnum",
            Column::Epoch => "Epoch",
        }
    }

    /// Flag that makes this column visible
    pub fn flag(&self) -> ColumnFlags {
        match self {
            Column::Name => ColumnFlags::SHOW_NAME,
            Column::CatalogNumber => ColumnFlags::SHOW_CATNUM,
            Column::Epoch => ColumnFlags::SHOW_EPOCH,
        }
    }
}

/// Bit set selecting the visible columns.
///
/// Hidden columns are still stored and returned by queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnFlags(u32);

impl ColumnFlags {
    pub const SHOW_NAME: ColumnFlags = ColumnFlags(1 << 0);
    pub const SHOW_CATNUM: ColumnFlags = ColumnFlags(1 << 1);
    pub const SHOW_EPOCH: ColumnFlags = ColumnFlags(1 << 2);
    pub const DEFAULT: ColumnFlags = ColumnFlags(0b111);

    /// Unknown bits are dropped; an empty set means `DEFAULT`
    pub fn from_bits(bits: u32) -> Self {
        let bits = bits & Self::DEFAULT.0;
        if bits == 0 { Self::DEFAULT } else { ColumnFlags(bits) }
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: ColumnFlags) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_visible(&self, column: Column) -> bool {
        self.contains(column.flag())
    }
}

impl Default for ColumnFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for ColumnFlags {
    type Output = ColumnFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        ColumnFlags(self.0 | rhs.0)
    }
}

impl BitAnd for ColumnFlags {
    type Output = ColumnFlags;

    fn bitand(self, rhs: Self) -> Self::Output {
        ColumnFlags(self.0 & rhs.0)
    }
}
