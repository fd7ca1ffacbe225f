///! Row ordering

use std::cmp::Ordering;

use crate::types::SatelliteRecord;

/// Case-insensitive comparison with ASCII folding, byte by byte.
///
/// Non-ASCII bytes compare by value, so "Ärm" sorts after every ASCII name.
pub fn ascii_casecmp(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Ascending order by display name
pub fn compare_by_name(a: &SatelliteRecord, b: &SatelliteRecord) -> Ordering {
    ascii_casecmp(&a.name, &b.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_is_ignored() {
        assert_eq!(ascii_casecmp("alpha", "Alpha"), Ordering::Equal);
        assert_eq!(ascii_casecmp("Alpha", "beta"), Ordering::Less);
        assert_eq!(ascii_casecmp("beta", "Alpha"), Ordering::Greater);
        // plain byte order would put "Zeta" before "alpha"
        assert_eq!(ascii_casecmp("Zeta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(ascii_casecmp("NOAA", "noaa 19"), Ordering::Less);
        assert_eq!(ascii_casecmp("", "a"), Ordering::Less);
    }

    #[test]
    fn test_sort_records() {
        let mut records = vec![
            SatelliteRecord::new("beta", 2, 0.0),
            SatelliteRecord::new("Gamma", 3, 0.0),
            SatelliteRecord::new("Alpha", 1, 0.0),
        ];
        records.sort_by(compare_by_name);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);
    }
}
