//! udb-tablegen - RISC-V UDB to LLVM TableGen conversion.
//!
//! Converts instruction, CSR and extension records of the RISC-V Unified
//! Database (YAML) into TableGen definitions for a compiler backend.
//!
//! # Primary Usage
//!
//! ```ignore
//! use udb_tablegen::{loader, Aggregator, ConverterOptions, Preamble};
//!
//! let mut aggregator = Aggregator::new(Preamble::RISCV, ConverterOptions::default());
//! aggregator.push("add.yaml", loader::load_document(Path::new("add.yaml")));
//! let text = aggregator.single_artifact();
//! ```
//!
//! # Architecture
//!
//! - [`core`] - Records, errors and run statistics
//! - [`tablegen`] - Format classification, encoding extraction, operand parsing, rendering
//! - [`loader`] - YAML documents to validated records
//! - [`aggregate`] - Preamble plus rendered blocks in input order
//! - [`driver`] - Single-document and directory runs

pub mod aggregate;
pub mod config;
pub mod core;
pub mod driver;
pub mod loader;
pub mod tablegen;

pub use aggregate::{Aggregator, Diagnostic, RenderedItem};
pub use config::{ConverterOptions, FormatPolicy};
pub use crate::core::{ConversionStats, ConvertError, ConvertResult, Record, RecordKind};
pub use driver::{run, RunOutcome, RunReport};
pub use tablegen::{FormatFamily, Preamble, RenderedBlock, Renderer};
