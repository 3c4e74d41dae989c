// This module renders validated UDB records as TableGen text. Instructions become
// RISCVInst definitions whose outs/ins dags and assembly string come from the operand
// parser, tagged with the classified format family and followed by the encoding
// constraints (match pattern, binary opcode fields, and the variable bit locations as
// plain comments). CSRs become RISCVReg definitions carrying their address, and
// extensions become banner comments. Identifiers are upper-cased record names with '.'
// and '-' mapped to '_', and descriptions are flattened to a single line, truncated for
// instructions and CSRs. Rendering is a pure function of one record and the options.

//! TableGen rendering of UDB records.

use crate::config::{ConverterOptions, FormatPolicy};
use crate::core::error::{ConvertError, ConvertResult};
use crate::core::record::{scalar_text, CsrRecord, InstructionRecord, Record, RecordKind};

use super::encoding::{self, Encoding};
use super::format::{self, Classification, FormatFamily};
use super::operands;
use super::preamble::RULE;

const ELLIPSIS: &str = "...";

/// The rendered text of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub kind: RecordKind,
    pub identifier: String,
    /// Format family, for instructions.
    pub family: Option<FormatFamily>,
    /// Set when the family was picked from an ambiguous reference.
    pub ambiguous: bool,
    pub text: String,
}

/// TableGen identifier of a record name: `fence.i` becomes `FENCE_I`.
pub fn identifier(name: &str) -> String {
    name.to_uppercase().replace(['.', '-'], "_")
}

/// Flatten a description to one line.
pub fn normalize_description(description: &str) -> String {
    description
        .trim()
        .replace('\n', " ")
        .replace("  ", " ")
        .trim()
        .to_string()
}

/// Cut a flattened description down to `limit` characters, ellipsis included.
pub fn truncate_description(description: String, limit: usize) -> String {
    if description.chars().count() <= limit {
        return description;
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Renders records according to a set of options.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: ConverterOptions,
}

impl Renderer {
    pub fn new(options: ConverterOptions) -> Self {
        Self { options }
    }

    /// Render one record.
    ///
    /// Fails only for ambiguous format references under [`FormatPolicy::Strict`].
    pub fn render(&self, record: &Record) -> ConvertResult<RenderedBlock> {
        match record {
            Record::Instruction(inst) => self.render_instruction(record, inst),
            Record::Csr(csr) => Ok(self.render_csr(record, csr)),
            Record::Extension(_) => Ok(self.render_extension(record)),
        }
    }

    fn short_description(&self, record: &Record) -> String {
        truncate_description(
            normalize_description(record.description()),
            self.options.description_limit,
        )
    }

    fn check_classification(&self, name: &str, classification: &Classification) -> ConvertResult<()> {
        if !classification.is_ambiguous() {
            return Ok(());
        }
        let reference = classification.reference.clone().unwrap_or_default();
        match self.options.format_policy {
            FormatPolicy::Strict => Err(ConvertError::AmbiguousFormat {
                reference,
                candidates: classification.candidates.clone(),
            }),
            FormatPolicy::FirstMatch => {
                log::warn!(
                    "{name}: format reference '{reference}' names {} families, using {}",
                    classification.candidates.len(),
                    classification.family
                );
                Ok(())
            }
        }
    }

    fn render_instruction(&self, record: &Record, inst: &InstructionRecord) -> ConvertResult<RenderedBlock> {
        let classification = format::classify(inst);
        self.check_classification(&inst.name, &classification)?;

        let family = classification.family;
        let encoding = encoding::extract(inst);
        let operands = operands::parse(inst.assembly(), family);
        let identifier = identifier(&inst.name);

        let text = format!(
            "\ndef {identifier} : RISCVInst<\n    (outs {outs}),\n    (ins {ins}),\n    \"{name}\", \"{asm}\",\n    []> {{\n  // {long_name}: {description}\n  let Format = {tag};{constraints}\n}}",
            outs = operands.outs_dag(),
            ins = operands.ins_dag(),
            name = inst.name,
            asm = operands.asm_format(),
            long_name = record.long_name(),
            description = self.short_description(record),
            tag = family.tag(),
            constraints = constraints_block(&encoding),
        );

        Ok(RenderedBlock {
            kind: RecordKind::Instruction,
            identifier,
            family: Some(family),
            ambiguous: classification.is_ambiguous(),
            text,
        })
    }

    fn render_csr(&self, record: &Record, csr: &CsrRecord) -> RenderedBlock {
        let identifier = identifier(&csr.name);
        let address = csr
            .address
            .as_ref()
            .and_then(scalar_text)
            .unwrap_or_else(|| self.options.placeholder_address.clone());

        let text = format!(
            "\ndef {identifier} : RISCVReg<{address}, \"{name}\"> {{\n  // {long_name}: {description}\n}}",
            name = csr.name,
            long_name = record.long_name(),
            description = self.short_description(record),
        );

        RenderedBlock {
            kind: RecordKind::Csr,
            identifier,
            family: None,
            ambiguous: false,
            text,
        }
    }

    fn render_extension(&self, record: &Record) -> RenderedBlock {
        let text = format!(
            "\n{RULE}\n// Extension: {name} - {long_name}\n// {description}\n{RULE}\n",
            name = record.name(),
            long_name = record.long_name(),
            description = normalize_description(record.description()),
        );

        RenderedBlock {
            kind: RecordKind::Extension,
            identifier: identifier(record.name()),
            family: None,
            ambiguous: false,
            text,
        }
    }
}

/// Constraint lines of an instruction, each prefixed by a newline; empty when
/// the encoding carries nothing renderable.
fn constraints_block(encoding: &Encoding) -> String {
    if encoding.is_empty() {
        return String::new();
    }
    let mut lines = Vec::new();

    if let Some(pattern) = &encoding.match_pattern {
        lines.push(format!("  let EncodingPattern = \"{pattern}\";"));
    }
    for (field, value) in encoding.binary_fields() {
        lines.push(format!("  let {} = {value};", field.let_name()));
    }
    // Variable locations stay comments: they are not checked against the pattern.
    for variable in &encoding.variables {
        lines.push(format!("  // Variable {} at bits {}", variable.name, variable.location));
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("\n{}", lines.join("\n"))
    }
}
