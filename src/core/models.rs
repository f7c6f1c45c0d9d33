// src/core/models.rs
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{VegaParallelError, VegaResult};

/// One model key to run through the wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem(String);

impl WorkItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a model key, or a file of model keys, into work items.
///
/// An existing regular file is read line by line and the first tab-delimited
/// column of every non-blank line becomes a work item, in file order and
/// without deduplication. Anything else is taken verbatim as a single model key.
pub fn load_models(model_key: &str) -> VegaResult<Vec<WorkItem>> {
    let path = Path::new(model_key);

    if !path.is_file() {
        debug!(model = model_key, "Treating model argument as a single model key");
        return Ok(vec![WorkItem::new(model_key)]);
    }

    debug!("Loading model keys from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| VegaParallelError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let models = parse_models(&content);
    if models.is_empty() {
        warn!("No model keys found in {}", path.display());
    }

    Ok(models)
}

fn parse_models(content: &str) -> Vec<WorkItem> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(WorkItem::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ids(models: &[WorkItem]) -> Vec<&str> {
        models.iter().map(WorkItem::id).collect()
    }

    fn write_models(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("models.txt");
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_first_column_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_models(&dir, "modelA\tNote1\n\nmodelB\n");

        let models = load_models(&path).unwrap();
        assert_eq!(ids(&models), vec!["modelA", "modelB"]);
    }

    #[test]
    fn test_whitespace_lines_and_padding() {
        let dir = TempDir::new().unwrap();
        let path = write_models(
            &dir,
            "  \t \n MELTING_POINT \tDescription 1\tTRUE\r\n\n\nBCF\tDescription 2\n   \n",
        );

        let models = load_models(&path).unwrap();
        assert_eq!(ids(&models), vec!["MELTING_POINT", "BCF"]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = write_models(&dir, "BCF\nBCF\tagain\nMUTAGENICITY\n");

        let models = load_models(&path).unwrap();
        assert_eq!(ids(&models), vec!["BCF", "BCF", "MUTAGENICITY"]);
    }

    #[test]
    fn test_empty_leading_column_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_models(&dir, "\tonly a note\nMODEL1\n");

        let models = load_models(&path).unwrap();
        assert_eq!(ids(&models), vec!["MODEL1"]);
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_models(&dir, "");

        assert!(load_models(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_path_is_literal_key() {
        let dir = TempDir::new().unwrap();
        let key = dir.path().join("nonexistent.txt").to_string_lossy().into_owned();

        let models = load_models(&key).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id(), key);
    }

    #[test]
    fn test_plain_key_is_literal() {
        let models = load_models("CAESAR_MUTAGENICITY").unwrap();
        assert_eq!(ids(&models), vec!["CAESAR_MUTAGENICITY"]);
    }

    #[test]
    fn test_directory_is_literal_key() {
        let dir = TempDir::new().unwrap();
        let key = dir.path().to_string_lossy().into_owned();

        let models = load_models(&key).unwrap();
        assert_eq!(ids(&models), vec![key.as_str()]);
    }

    #[test]
    fn test_unreadable_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models.bin");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let err = load_models(&path.to_string_lossy()).unwrap_err();
        assert!(matches!(err, VegaParallelError::Load { .. }));
    }
}
