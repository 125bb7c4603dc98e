//! Shared YAML processing utilities
//!
//! Keeps file reading and parsing errors consistent across the config
//! loaders: every failure names the file involved.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Read a YAML file that may be blank.
///
/// Returns `None` when the file holds nothing but whitespace, comments or an
/// explicit null document.
///
/// # Example
/// ```rust,no_run
/// use std::path::Path;
/// use vmsetup_config::yaml_utils::read_optional_yaml_file;
///
/// let versions: Option<Vec<String>> =
///     read_optional_yaml_file(Path::new("python_versions.yaml")).unwrap();
/// ```
pub fn read_optional_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read YAML file: {}", path.display()))?;

    if is_blank_document(&content) {
        return Ok(None);
    }

    serde_yaml_ng::from_str(&content)
        .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
}

/// True when a document has no content besides comments and whitespace.
pub fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Parse YAML content from a string
///
/// # Example
/// ```rust
/// use vmsetup_config::yaml_utils::parse_yaml_str;
///
/// let versions: Vec<String> = parse_yaml_str("['3.9', '3.10']").unwrap();
/// assert_eq!(versions, vec!["3.9", "3.10"]);
/// ```
pub fn parse_yaml_str<T: DeserializeOwned>(content: &str) -> Result<T> {
    serde_yaml_ng::from_str(content).with_context(|| "Failed to parse YAML content")
}
