//! UDB document loading.
//!
//! Reads YAML documents from disk and hands validated [`Record`]s to the
//! rest of the converter. Directory discovery is flat and sorted by file name
//! so batch output is deterministic.

use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ConvertError, ConvertResult};
use crate::core::record::Record;

/// Decode and validate one YAML document.
pub fn parse_document(text: &str) -> ConvertResult<Record> {
    if text.trim().is_empty() {
        return Err(ConvertError::EmptyDocument);
    }
    let value: Value = serde_yaml::from_str(text).map_err(|source| ConvertError::Parse { source })?;
    Record::from_value(value)
}

/// Read, decode and validate the document at `path`.
pub fn load_document(path: &Path) -> ConvertResult<Record> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text)
}

/// Files directly inside `dir` with the given extension, sorted by name.
pub fn discover_documents(dir: &Path, extension: &str) -> ConvertResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(extension))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    log::debug!("found {} *.{} documents in {}", files.len(), extension, dir.display());
    Ok(files)
}

/// Name used for a document in origin markers and diagnostics.
pub fn origin_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
