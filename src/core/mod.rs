// This module gathers the infrastructure shared by every stage of the converter: the
// typed record model produced at the loader boundary, the error type used across the
// crate, and the statistics collected over a conversion run. Records are validated once
// (empty documents, non-mapping documents, unknown kinds and malformed fields are all
// rejected here) so the classification, extraction and rendering stages only ever see
// well-formed instruction, CSR and extension records.

//! Core converter infrastructure.
//!
//! # Key Components
//!
//! ## Records (`record`)
//! - Tagged union over instruction, CSR and extension records
//! - Shape and `kind` validation of decoded YAML documents
//!
//! ## Errors (`error`)
//! - `ConvertError` covering per-document and run-level failures
//!
//! ## Statistics (`stats`)
//! - Per-kind rendered counts, skipped documents, ambiguous classifications

pub mod error;
pub mod record;
pub mod stats;

pub use error::{ConvertError, ConvertResult};
pub use record::{CsrRecord, ExtensionRecord, InstructionRecord, Record, RecordKind};
pub use stats::ConversionStats;
