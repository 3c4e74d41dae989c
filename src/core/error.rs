// This module defines the error types for the UDB to TableGen converter using the thiserror
// crate. ConvertError covers every way a document can fail to become a rendered block:
// unreadable files, YAML parse failures, documents that are empty or not a mapping,
// unrecognized record kinds, records whose fields do not match their kind, and format
// references that name more than one encoding family when strict classification is on.
// It also covers the fatal run-level failures (missing input, unwritable output). Each
// variant carries the context needed for a useful diagnostic line.

//! Error types for the converter.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::record::RecordKind;
use crate::tablegen::FormatFamily;

/// Main error type for document loading and rendering.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid format (document is empty)")]
    EmptyDocument,

    #[error("invalid format (document is not a mapping)")]
    NotAMapping,

    #[error("unknown kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("invalid {kind} record: {source}")]
    InvalidRecord {
        kind: RecordKind,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("format reference '{reference}' is ambiguous between {}", join_families(.candidates))]
    AmbiguousFormat {
        reference: String,
        candidates: Vec<FormatFamily>,
    },

    #[error("{} not found", .path.display())]
    InputNotFound { path: PathBuf },
}

fn join_families(families: &[FormatFamily]) -> String {
    families
        .iter()
        .map(|f| f.letter())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_message() {
        let err = ConvertError::UnknownKind {
            kind: "unknown_kind".to_string(),
        };
        assert_eq!(err.to_string(), "unknown kind 'unknown_kind'");
    }

    #[test]
    fn test_ambiguous_format_lists_candidates() {
        let err = ConvertError::AmbiguousFormat {
            reference: "R-/I/".to_string(),
            candidates: vec![FormatFamily::R, FormatFamily::I],
        };
        assert_eq!(
            err.to_string(),
            "format reference 'R-/I/' is ambiguous between R, I"
        );
    }
}
