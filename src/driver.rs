//! Single-document and directory conversion runs.
//!
//! ```ignore
//! use udb_tablegen::{driver, ConverterOptions};
//!
//! let report = driver::run(Path::new("spec/std/isa"), Path::new("out"), &ConverterOptions::default())?;
//! println!("{}", report.outcome);
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::{Aggregator, Diagnostic};
use crate::config::ConverterOptions;
use crate::core::error::{ConvertError, ConvertResult};
use crate::core::stats::ConversionStats;
use crate::loader;
use crate::tablegen::Preamble;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Single-document mode wrote `path`.
    GeneratedFile { path: PathBuf },
    /// Directory mode wrote `path` holding `items` rendered blocks.
    GeneratedBatch { path: PathBuf, items: usize },
    /// Single-document mode rendered nothing; no file was written.
    NoContentGenerated,
    /// Directory mode rendered nothing; no file was written.
    NoContentFound,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::GeneratedFile { path } => write!(f, "Generated {}", path.display()),
            RunOutcome::GeneratedBatch { path, items } => {
                write!(f, "Generated {} with {} items", path.display(), items)
            }
            RunOutcome::NoContentGenerated => f.write_str("No content generated"),
            RunOutcome::NoContentFound => f.write_str("No content found"),
        }
    }
}

/// Outcome plus everything collected along the way.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ConversionStats,
}

impl RunReport {
    /// Close a run, logging its statistics.
    fn finish(outcome: RunOutcome, aggregator: &Aggregator) -> Self {
        log::info!("{}", aggregator.stats());
        Self {
            outcome,
            diagnostics: aggregator.diagnostics().to_vec(),
            stats: aggregator.stats().clone(),
        }
    }
}

/// Convert `input` (a document or a directory of documents) into `output`.
pub fn run(input: &Path, output: &Path, options: &ConverterOptions) -> ConvertResult<RunReport> {
    if input.is_file() {
        convert_file(input, output, options)
    } else if input.is_dir() {
        convert_directory(input, output, options)
    } else {
        Err(ConvertError::InputNotFound {
            path: input.to_path_buf(),
        })
    }
}

/// Render one document into the file `output`.
pub fn convert_file(input: &Path, output: &Path, options: &ConverterOptions) -> ConvertResult<RunReport> {
    let mut aggregator = Aggregator::new(Preamble::RISCV, options.clone());
    aggregator.push(&loader::origin_name(input), loader::load_document(input));

    let outcome = match aggregator.single_artifact() {
        Some(text) => {
            write_artifact(output, &text)?;
            RunOutcome::GeneratedFile {
                path: output.to_path_buf(),
            }
        }
        None => RunOutcome::NoContentGenerated,
    };
    Ok(RunReport::finish(outcome, &aggregator))
}

/// Render every document of `input` into one artifact inside the directory
/// `output`.
pub fn convert_directory(input: &Path, output: &Path, options: &ConverterOptions) -> ConvertResult<RunReport> {
    fs::create_dir_all(output).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    let mut aggregator = Aggregator::new(Preamble::RISCV, options.clone());
    for path in loader::discover_documents(input, &options.extension)? {
        let origin = loader::origin_name(&path);
        log::info!("Processing {origin}...");
        aggregator.push(&origin, loader::load_document(&path));
    }

    let outcome = match aggregator.batch_artifact() {
        Some(text) => {
            let path = output.join(&options.output_file_name);
            write_artifact(&path, &text)?;
            RunOutcome::GeneratedBatch {
                path,
                items: aggregator.rendered_count(),
            }
        }
        None => RunOutcome::NoContentFound,
    };
    Ok(RunReport::finish(outcome, &aggregator))
}

fn write_artifact(path: &Path, text: &str) -> ConvertResult<()> {
    fs::write(path, text).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        let path = PathBuf::from("out/RISCVGenerated.td");
        assert_eq!(
            RunOutcome::GeneratedBatch {
                path: path.clone(),
                items: 3
            }
            .to_string(),
            "Generated out/RISCVGenerated.td with 3 items"
        );
        assert_eq!(
            RunOutcome::GeneratedFile { path }.to_string(),
            "Generated out/RISCVGenerated.td"
        );
        assert_eq!(RunOutcome::NoContentGenerated.to_string(), "No content generated");
        assert_eq!(RunOutcome::NoContentFound.to_string(), "No content found");
    }

    #[test]
    fn test_single_document_reports_stats() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mstatus.yaml");
        fs::write(&input, "kind: csr\nname: mstatus\naddress: \"0x300\"\n").unwrap();

        let report = run(&input, &dir.path().join("mstatus.td"), &ConverterOptions::default()).unwrap();
        assert_eq!(report.stats.documents_seen, 1);
        assert_eq!(report.stats.csrs_rendered, 1);
        assert_eq!(report.stats.rendered(), 1);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        let err = run(&missing, &dir.path().join("out.td"), &ConverterOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound { .. }));
    }
}
