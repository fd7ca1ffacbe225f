///! Satellite data store - resolves a catalog number to a record

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::keyfile::KeyFile;
use super::tle;
use crate::error::SatDataError;
use crate::types::{CatalogNumber, SatelliteRecord};

/// Extension of per-satellite record files
pub const SAT_FILE_EXTENSION: &str = "sat";

const SATELLITE_GROUP: &str = "Satellite";

/// Per-satellite lookup used by the catalog loader
pub trait SatDataStore {
    fn read_record(&self, catalog_number: CatalogNumber) -> Result<SatelliteRecord, SatDataError>;
}

impl<S: SatDataStore + ?Sized> SatDataStore for &S {
    fn read_record(&self, catalog_number: CatalogNumber) -> Result<SatelliteRecord, SatDataError> {
        (**self).read_record(catalog_number)
    }
}

/// Records already held in memory
impl SatDataStore for HashMap<CatalogNumber, SatelliteRecord> {
    fn read_record(&self, catalog_number: CatalogNumber) -> Result<SatelliteRecord, SatDataError> {
        self.get(&catalog_number)
            .cloned()
            .ok_or(SatDataError::NotFound(catalog_number))
    }
}

/// Reads `<catnum>.sat` key files from a data directory
#[derive(Debug, Clone)]
pub struct FsSatStore {
    data_dir: PathBuf,
}

impl FsSatStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the record file for a catalog number
    pub fn record_path(&self, catalog_number: CatalogNumber) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", catalog_number, SAT_FILE_EXTENSION))
    }

    /// Build a record from key file content
    pub fn parse_record(
        path: &Path,
        catalog_number: CatalogNumber,
        content: &str,
    ) -> Result<SatelliteRecord, SatDataError> {
        let keyfile = KeyFile::parse(content);
        if !keyfile.has_group(SATELLITE_GROUP) {
            return Err(SatDataError::MissingGroup {
                path: path.to_path_buf(),
                group: SATELLITE_GROUP.to_string(),
            });
        }

        let required = |key: &str| {
            keyfile
                .get(SATELLITE_GROUP, key)
                .ok_or_else(|| SatDataError::MissingKey {
                    path: path.to_path_buf(),
                    key: key.to_string(),
                })
        };
        let line1 = required("TLE1")?;
        let line2 = required("TLE2")?;
        let epoch = tle::tle_epoch(catalog_number, line1, line2)?;

        // Nickname is what the user sees; fall back to the full name
        let name = keyfile
            .get(SATELLITE_GROUP, "NICKNAME")
            .or_else(|| keyfile.get(SATELLITE_GROUP, "NAME"))
            .map(str::to_string)
            .unwrap_or_else(|| catalog_number.to_string());

        Ok(SatelliteRecord::new(name, catalog_number, epoch))
    }
}

impl SatDataStore for FsSatStore {
    fn read_record(&self, catalog_number: CatalogNumber) -> Result<SatelliteRecord, SatDataError> {
        let path = self.record_path(catalog_number);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SatDataError::NotFound(catalog_number)
            } else {
                SatDataError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        Self::parse_record(&path, catalog_number, &content)
    }
}

/// Parse the catalog number from a record file name such as `25544.sat`
pub fn catalog_number_from_file_name(file_name: &str) -> Result<CatalogNumber, SatDataError> {
    let stem = file_name.split('.').next().unwrap_or_default().trim();
    stem.parse::<CatalogNumber>()
        .map_err(|_| SatDataError::InvalidFileName {
            name: file_name.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const ISS_TLE1: &str = "1 25544U 98067A   20152.00000000 -.00002182  00000-0 -11606-4 0  2929";
    pub const ISS_TLE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
    pub const NOAA_TLE1: &str = "1 33591U 98067A   20150.50000000 -.00002182  00000-0 -11606-4 0  2923";
    pub const NOAA_TLE2: &str = "2 33591  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563538";

    /// Key file content in the layout gpredict writes
    pub fn sat_file(name: &str, nickname: Option<&str>, tle1: &str, tle2: &str) -> String {
        let mut content = format!("[Satellite]\nVERSION=1.1\nNAME={}\n", name);
        if let Some(nickname) = nickname {
            content.push_str(&format!("NICKNAME={}\n", nickname));
        }
        content.push_str(&format!("TLE1={}\nTLE2={}\n", tle1, tle2));
        content
    }

    #[test]
    fn test_read_record_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("25544.sat"),
            sat_file("ISS (ZARYA)", Some("ISS"), ISS_TLE1, ISS_TLE2),
        )
        .unwrap();

        let store = FsSatStore::new(dir.path());
        let record = store.read_record(25544).unwrap();
        assert_eq!(record.name, "ISS");
        assert_eq!(record.catalog_number, 25544);
        assert!((record.epoch - 2459000.5).abs() < 1e-6);
    }

    #[test]
    fn test_name_falls_back_when_nickname_missing() {
        let path = Path::new("33591.sat");
        let content = sat_file("NOAA 19", None, NOAA_TLE1, NOAA_TLE2);
        let record = FsSatStore::parse_record(path, 33591, &content).unwrap();
        assert_eq!(record.name, "NOAA 19");
        assert!((record.epoch - 2458999.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSatStore::new(dir.path());
        assert!(matches!(store.read_record(99999), Err(SatDataError::NotFound(99999))));
    }

    #[test]
    fn test_missing_tle_is_reported() {
        let path = Path::new("25544.sat");
        let err = FsSatStore::parse_record(path, 25544, "[Satellite]\nNAME=ISS\nTLE1=x\n").unwrap_err();
        assert!(matches!(err, SatDataError::MissingKey { ref key, .. } if key == "TLE2"));

        let err = FsSatStore::parse_record(path, 25544, "NAME=ISS\n").unwrap_err();
        assert!(matches!(err, SatDataError::MissingGroup { .. }));
    }

    #[test]
    fn test_record_holding_another_satellite_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        // NOAA 19 elements stored under the ISS file name
        std::fs::write(
            dir.path().join("25544.sat"),
            sat_file("NOAA 19", None, NOAA_TLE1, NOAA_TLE2),
        )
        .unwrap();

        let store = FsSatStore::new(dir.path());
        assert!(matches!(
            store.read_record(25544),
            Err(SatDataError::CatalogMismatch { requested: 25544, found: 33591 })
        ));
    }

    #[test]
    fn test_catalog_number_from_file_name() {
        assert_eq!(catalog_number_from_file_name("25544.sat").unwrap(), 25544);
        assert_eq!(catalog_number_from_file_name("00900.sat").unwrap(), 900);
        assert!(catalog_number_from_file_name("iss.sat").is_err());
        assert!(catalog_number_from_file_name(".sat").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = HashMap::new();
        store.insert(25544, SatelliteRecord::new("ISS", 25544, 2459000.5));
        assert_eq!(store.read_record(25544).unwrap().name, "ISS");
        assert!(matches!(store.read_record(1), Err(SatDataError::NotFound(1))));
    }
}
