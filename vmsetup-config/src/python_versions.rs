//! The `python_versions.yaml` list of interpreter versions to install.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};
use vmsetup_core::error::{Result, VmSetupError};

use crate::yaml_utils::read_optional_yaml_file;

pub const DEFAULT_VERSIONS_FILE: &str = "python_versions.yaml";

/// A version suffix such as `3.10`, installed as the `python3.10` package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawVersion")]
pub struct PythonVersion(String);

/// Entries may be written as strings or bare YAML numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Text(String),
    Number(serde_yaml_ng::Number),
}

impl TryFrom<RawVersion> for PythonVersion {
    type Error = String;

    fn try_from(raw: RawVersion) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawVersion::Text(text) => PythonVersion::new(text),
            RawVersion::Number(number) => PythonVersion::new(number.to_string()),
        }
    }
}

impl PythonVersion {
    /// Validate a version suffix. It becomes part of an apt package name, so
    /// it must be non-empty and free of whitespace and path separators.
    pub fn new(version: impl Into<String>) -> std::result::Result<Self, String> {
        let version = version.into();
        if version.is_empty() {
            return Err("Python version cannot be empty".to_string());
        }
        if version.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(format!(
                "Python version '{}' cannot contain whitespace or '/'",
                version
            ));
        }
        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The apt package providing this interpreter.
    pub fn package_name(&self) -> String {
        format!("python{}", self.0)
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Load the version list, preserving file order and duplicates.
///
/// An empty document yields an empty list.
pub fn load_python_versions(path: &Path) -> Result<Vec<PythonVersion>> {
    let versions: Option<Vec<PythonVersion>> =
        read_optional_yaml_file(path).map_err(|e| VmSetupError::Config(format!("{:#}", e)))?;

    let versions = versions.unwrap_or_else(|| {
        warn!(path = %path.display(), "versions file is empty, no Python versions will be installed");
        Vec::new()
    });

    debug!(count = versions.len(), path = %path.display(), "loaded Python versions");
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml_utils::parse_yaml_str;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_string_entries_keep_order_and_duplicates() {
        let versions: Vec<PythonVersion> =
            parse_yaml_str("- '3.12'\n- '3.9'\n- '3.10'\n- '3.9'\n").unwrap();
        let names: Vec<&str> = versions.iter().map(PythonVersion::as_str).collect();
        assert_eq!(names, vec!["3.12", "3.9", "3.10", "3.9"]);
    }

    #[test]
    fn test_numeric_entries_follow_yaml_values() {
        let versions: Vec<PythonVersion> = parse_yaml_str("[3.9, 3.10, 3]").unwrap();
        let names: Vec<&str> = versions.iter().map(PythonVersion::as_str).collect();
        // An unquoted 3.10 is the float 3.1.
        assert_eq!(names, vec!["3.9", "3.1", "3"]);
    }

    #[test]
    fn test_package_name() {
        let version = PythonVersion::new("3.11").unwrap();
        assert_eq!(version.package_name(), "python3.11");
        assert_eq!(version.to_string(), "3.11");
    }

    #[test]
    fn test_rejects_malformed_entries() {
        assert!(PythonVersion::new("").is_err());
        assert!(PythonVersion::new("3.10 -y").is_err());
        assert!(PythonVersion::new("../3.10").is_err());

        let result: anyhow::Result<Vec<PythonVersion>> = parse_yaml_str("- '3.9 evil'\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(DEFAULT_VERSIONS_FILE);
        fs::write(&path, "- \"3.8\"\n- \"3.11\"\n").unwrap();

        let versions = load_python_versions(&path).unwrap();
        assert_eq!(
            versions,
            vec![
                PythonVersion::new("3.8").unwrap(),
                PythonVersion::new("3.11").unwrap()
            ]
        );
    }

    #[test]
    fn test_empty_file_is_empty_list() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(DEFAULT_VERSIONS_FILE);
        fs::write(&path, "").unwrap();

        assert!(load_python_versions(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let temp = tempdir().unwrap();
        let result = load_python_versions(&temp.path().join("missing.yaml"));
        assert!(matches!(result, Err(VmSetupError::Config(msg)) if msg.contains("missing.yaml")));
    }

    #[test]
    fn test_mapping_is_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(DEFAULT_VERSIONS_FILE);
        fs::write(&path, "versions:\n  - '3.9'\n").unwrap();

        assert!(load_python_versions(&path).is_err());
    }
}
