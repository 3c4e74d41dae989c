//! Converter options.
//!
//! The defaults reproduce the conventional UDB layout: `*.yaml` inputs, a
//! single `RISCVGenerated.td` artifact in directory mode, and first-match
//! format classification. The `udb2td` binary fills these from its flags.

use std::fmt;

/// How to treat inheritance references that name more than one format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Use the first family in R, I, S, B, U, J order and log a warning.
    #[default]
    FirstMatch,
    /// Skip the record with a diagnostic.
    Strict,
}

impl fmt::Display for FormatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatPolicy::FirstMatch => f.write_str("first-match"),
            FormatPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Options shared by the renderer, the aggregator and the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    /// File extension of input documents in directory mode, without the dot.
    pub extension: String,
    /// Name of the aggregated artifact written in directory mode.
    pub output_file_name: String,
    /// Address rendered for CSRs that carry none.
    pub placeholder_address: String,
    /// Maximum rendered description length for instructions and CSRs.
    pub description_limit: usize,
    pub format_policy: FormatPolicy,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            extension: "yaml".to_string(),
            output_file_name: "RISCVGenerated.td".to_string(),
            placeholder_address: "0x000".to_string(),
            description_limit: 100,
            format_policy: FormatPolicy::FirstMatch,
        }
    }
}
