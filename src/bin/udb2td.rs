//! UDB to TableGen converter binary.
//!
//! `udb2td input.yaml output.td` converts one document;
//! `udb2td input_dir/ output_dir/` converts every document of a directory into
//! a single aggregated file.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use udb_tablegen::{driver, ConverterOptions, FormatPolicy, RecordKind};

#[derive(Parser, Debug)]
#[command(
    name = "udb2td",
    version,
    about = "Convert RISC-V UDB YAML records into LLVM TableGen definitions",
    after_help = supported_kinds()
)]
struct Cli {
    /// Input YAML document, or a directory of documents.
    input: PathBuf,

    /// Output .td file, or output directory when INPUT is a directory.
    output: PathBuf,

    /// Extension of the documents picked up in directory mode.
    #[arg(long, env = "UDB2TD_EXTENSION")]
    extension: Option<String>,

    /// File name of the aggregated output in directory mode.
    #[arg(long, env = "UDB2TD_OUTPUT_NAME")]
    output_name: Option<String>,

    /// Skip instructions whose format reference names several families.
    #[arg(long, env = "UDB2TD_STRICT_FORMATS")]
    strict_formats: bool,
}

impl Cli {
    fn options(&self) -> ConverterOptions {
        let defaults = ConverterOptions::default();
        ConverterOptions {
            extension: self.extension.clone().unwrap_or(defaults.extension),
            output_file_name: self.output_name.clone().unwrap_or(defaults.output_file_name),
            format_policy: if self.strict_formats {
                FormatPolicy::Strict
            } else {
                FormatPolicy::FirstMatch
            },
            ..defaults
        }
    }
}

fn supported_kinds() -> String {
    let mut text = String::from("Supports all UDB YAML types:");
    for kind in RecordKind::ALL {
        let label = match kind {
            RecordKind::Instruction => "Instructions",
            RecordKind::Csr => "CSRs",
            RecordKind::Extension => "Extensions",
        };
        text.push_str(&format!("\n  - {label} (kind: {kind})"));
    }
    text
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            println!("\n{}", supported_kinds());
            return ExitCode::FAILURE;
        }
    };

    let options = cli.options();
    log::debug!("format policy: {}", options.format_policy);

    match driver::run(&cli.input, &cli.output, &options) {
        Ok(report) => {
            println!("{}", report.outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
