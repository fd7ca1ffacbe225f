///! Catalog loader - builds category tables from a data directory
///!
///! Two passes over the directory:
///! 1. every `.sat` file goes into "All satellites"
///! 2. every `.cat` file becomes its own table; its first line is the
///!    category name, the remaining lines are catalog numbers

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::store::{SAT_FILE_EXTENSION, SatDataStore, catalog_number_from_file_name};
use crate::error::CategoryError;
use crate::types::{CatalogNumber, CategoryTable, SatelliteRecord};

/// Extension of category files
pub const CAT_FILE_EXTENSION: &str = "cat";

/// Outcome of one load pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Records in "All satellites"
    pub satellites_loaded: usize,
    /// `.sat` files that could not be resolved
    pub satellites_failed: usize,
    /// Category tables built
    pub categories_loaded: usize,
    /// Category files skipped entirely
    pub categories_skipped: usize,
    /// Category entries that could not be resolved
    pub category_entries_failed: usize,
    /// Records per category, in table order
    pub category_counts: Vec<(String, usize)>,
    pub duration_seconds: f64,
}

/// Loads "All satellites" plus one table per category file
pub struct CatalogLoader<S> {
    data_dir: PathBuf,
    store: S,
}

impl<S: SatDataStore> CatalogLoader<S> {
    pub fn new(data_dir: impl AsRef<Path>, store: S) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            store,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build every table. Never fails: problems are logged and skipped.
    pub fn load_all(&self) -> Vec<CategoryTable> {
        self.load_all_with_report().0
    }

    /// Same as [`load_all`](Self::load_all), also returning the counts
    pub fn load_all_with_report(&self) -> (Vec<CategoryTable>, LoadReport) {
        let start_time = Instant::now();
        let mut report = LoadReport::default();

        let mut all = CategoryTable::all_satellites();
        let mut tables = Vec::new();

        match list_files(&self.data_dir) {
            Ok(files) => {
                for path in files.iter().filter(|p| has_extension(p, SAT_FILE_EXTENSION)) {
                    match self.resolve_sat_file(path) {
                        Some(record) => all.push(record),
                        None => report.satellites_failed += 1,
                    }
                }
                report.satellites_loaded = all.len();
                tracing::info!(
                    "Read {} satellites into {} group",
                    all.len(),
                    all.name()
                );

                for path in files.iter().filter(|p| has_extension(p, CAT_FILE_EXTENSION)) {
                    match self.load_category_file(path) {
                        Ok((table, failed)) => {
                            report.category_entries_failed += failed;
                            tables.push(table);
                        }
                        Err(e) => {
                            tracing::error!("{}", e);
                            report.categories_skipped += 1;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to open satdata directory {:?}: {}",
                    self.data_dir,
                    e
                );
            }
        }

        report.categories_loaded = tables.len();
        report.category_counts = std::iter::once(&all)
            .chain(tables.iter())
            .map(|t| (t.name().to_string(), t.len()))
            .collect();
        report.duration_seconds = start_time.elapsed().as_secs_f64();

        tracing::info!(
            "Catalog load complete: {} satellites ({} failed), {} categories ({} skipped) in {:.3}s",
            report.satellites_loaded,
            report.satellites_failed,
            report.categories_loaded,
            report.categories_skipped,
            report.duration_seconds
        );

        let mut result = Vec::with_capacity(tables.len() + 1);
        result.push(all);
        result.extend(tables);
        (result, report)
    }

    fn resolve_sat_file(&self, path: &Path) -> Option<SatelliteRecord> {
        let file_name = path.file_name()?.to_string_lossy();
        let catalog_number = match catalog_number_from_file_name(&file_name) {
            Ok(n) => n,
            Err(e) => {
                tracing::error!("Skipping {:?}: {}", path, e);
                return None;
            }
        };
        self.resolve(catalog_number)
    }

    fn resolve(&self, catalog_number: CatalogNumber) -> Option<SatelliteRecord> {
        match self.store.read_record(catalog_number) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!("Error reading satellite {}: {}", catalog_number, e);
                None
            }
        }
    }

    /// Read one category file.
    ///
    /// Returns the table and the number of entries that could not be
    /// resolved. Blank lines are ignored. Reading stops at the first line
    /// that is not valid UTF-8; that line and every non-blank line after it
    /// count as failed.
    pub fn load_category_file(
        &self,
        path: &Path,
    ) -> Result<(CategoryTable, usize), CategoryError> {
        let file = std::fs::File::open(path).map_err(|source| CategoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let mut header = String::new();
        let name = match reader.read_line(&mut header) {
            Ok(_) if !header.trim().is_empty() => header.trim().to_string(),
            Ok(_) => return Err(CategoryError::Empty(path.to_path_buf())),
            Err(source) => {
                return Err(CategoryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut table = CategoryTable::new(name).with_source(path);
        let mut failed = 0;
        let mut abandoned = false;

        // line 1 was the header
        for (line_no, chunk) in (2..).zip(reader.split(b'\n')) {
            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!("Failed to read {:?} at line {}: {}", path, line_no, e);
                    break;
                }
            };
            if abandoned {
                if !bytes.trim_ascii().is_empty() {
                    failed += 1;
                }
                continue;
            }

            let line = match std::str::from_utf8(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(
                        "Failed to read {:?} at line {}: {}, ignoring the rest of the file",
                        path,
                        line_no,
                        e
                    );
                    abandoned = true;
                    failed += 1;
                    continue;
                }
            };
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }

            let catalog_number = match entry.parse::<CatalogNumber>() {
                Ok(n) => n,
                Err(_) => {
                    tracing::error!("Invalid catalog number {:?} in {:?}", entry, path);
                    failed += 1;
                    continue;
                }
            };

            match self.resolve(catalog_number) {
                Some(record) => table.push(record),
                None => failed += 1,
            }
        }

        tracing::info!("Read {} satellites from {:?}", table.len(), path);
        Ok((table, failed))
    }
}

/// Regular files in `dir`, sorted by file name
fn list_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!("Found {} files in {:?}", files.len(), dir);
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map_or(false, |ext| ext == extension)
}
