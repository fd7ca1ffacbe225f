///! Satellite data access
///!
///! - `SatDataStore`: resolves a catalog number to a record
///! - `FsSatStore`: reads gpredict style `<catnum>.sat` key files
///! - `CatalogLoader`: builds "All satellites" and one table per `.cat` file

mod keyfile;
pub use keyfile::KeyFile;

pub mod tle;
pub use tle::{julian_date, julian_to_datetime, tle_epoch};

mod store;
pub use store::{FsSatStore, SAT_FILE_EXTENSION, SatDataStore, catalog_number_from_file_name};

mod loader;
pub use loader::{CAT_FILE_EXTENSION, CatalogLoader, LoadReport};
