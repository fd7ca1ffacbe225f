///! Key file reader for `.sat` records
///!
///! The format is the one gpredict writes:
///!   [Satellite]
///!   NAME=ISS (ZARYA)
///!   NICKNAME=ISS
///!   TLE1=1 25544U ...
///!   TLE2=2 25544  ...

use std::collections::HashMap;

/// Parsed key file: group name -> (key -> value)
#[derive(Debug, Clone, Default)]
pub struct KeyFile {
    groups: HashMap<String, HashMap<String, String>>,
}

impl KeyFile {
    /// Parse key file content.
    ///
    /// Lines outside any group, lines without `=`, and comment lines
    /// (`#` or `;`) are ignored. Later assignments overwrite earlier ones.
    pub fn parse(content: &str) -> Self {
        let mut groups: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(group) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let group = group.trim().to_string();
                groups.entry(group.clone()).or_default();
                current = Some(group);
                continue;
            }

            let Some(group) = current.as_ref() else {
                tracing::trace!("Ignoring key file line outside of a group: {}", line);
                continue;
            };

            if let Some((key, value)) = line.split_once('=') {
                groups
                    .entry(group.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { groups }
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Value of `key` in `group`, if present and non-empty
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .get(group)
            .and_then(|g| g.get(key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_and_keys() {
        let kf = KeyFile::parse(
            "# written by gpredict\n\
             [Satellite]\n\
             VERSION=1.1\n\
             NAME = ISS (ZARYA)\n\
             NICKNAME=ISS\n\
             ; comment\n\
             [Other]\n\
             NAME=other\n",
        );

        assert!(kf.has_group("Satellite"));
        assert!(kf.has_group("Other"));
        assert_eq!(kf.get("Satellite", "NAME"), Some("ISS (ZARYA)"));
        assert_eq!(kf.get("Satellite", "NICKNAME"), Some("ISS"));
        assert_eq!(kf.get("Other", "NAME"), Some("other"));
        assert_eq!(kf.get("Satellite", "TLE1"), None);
    }

    #[test]
    fn test_lines_outside_group_are_ignored() {
        let kf = KeyFile::parse("NAME=orphan\n[Satellite]\nNICKNAME=\n");
        assert_eq!(kf.get("Satellite", "NAME"), None);
        // empty values read as absent
        assert_eq!(kf.get("Satellite", "NICKNAME"), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let kf = KeyFile::parse("[Satellite]\nNAME=A=B\n");
        assert_eq!(kf.get("Satellite", "NAME"), Some("A=B"));
    }
}
