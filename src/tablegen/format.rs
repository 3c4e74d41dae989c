// This module infers the encoding format family of a UDB instruction. UDB records
// either inherit their format from a shared layout file (e.g. "inst_subtype/R/R-x.yaml"),
// carry a raw match pattern, or only an assembly syntax string. The classifier checks
// these sources in a fixed priority order: the inheritance reference (scanning for the
// "/X/" and "X-" markers of R, I, S, B, U and J in that order), a 16-bit match pattern
// for compressed instructions, vector operand names in the assembly string, and finally
// the R-type default. Because marker scanning is substring based, a reference can name
// several families; the classification keeps every candidate so callers can decide how
// to treat ambiguous references.

//! Instruction format family classification.

use serde_yaml::{Mapping, Value};
use std::fmt;

use crate::core::record::{scalar_text, InstructionRecord};

/// Characters ignored when measuring the width of a match pattern.
pub const MATCH_SEPARATORS: &[char] = &['-'];

/// Width of a compressed (RVC) instruction encoding.
pub const COMPRESSED_WIDTH: usize = 16;

/// Encoding format family of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatFamily {
    R,
    I,
    S,
    B,
    U,
    J,
    /// Compressed, 16-bit encodings.
    C,
    /// Vector instructions.
    V,
}

impl FormatFamily {
    /// Families that can be named by an inheritance reference, in check order.
    pub const INHERITABLE: [FormatFamily; 6] = [
        FormatFamily::R,
        FormatFamily::I,
        FormatFamily::S,
        FormatFamily::B,
        FormatFamily::U,
        FormatFamily::J,
    ];

    pub fn letter(self) -> &'static str {
        match self {
            FormatFamily::R => "R",
            FormatFamily::I => "I",
            FormatFamily::S => "S",
            FormatFamily::B => "B",
            FormatFamily::U => "U",
            FormatFamily::J => "J",
            FormatFamily::C => "C",
            FormatFamily::V => "V",
        }
    }

    /// Name of the TableGen format record, e.g. `RFormat`.
    pub fn tag(self) -> &'static str {
        match self {
            FormatFamily::R => "RFormat",
            FormatFamily::I => "IFormat",
            FormatFamily::S => "SFormat",
            FormatFamily::B => "BFormat",
            FormatFamily::U => "UFormat",
            FormatFamily::J => "JFormat",
            FormatFamily::C => "CFormat",
            FormatFamily::V => "VFormat",
        }
    }

    fn named_by(self, reference: &str) -> bool {
        let letter = self.letter();
        reference.contains(&format!("/{letter}/")) || reference.contains(&format!("{letter}-"))
    }
}

impl fmt::Display for FormatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Which piece of the record decided the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    Inheritance,
    CompressedPattern,
    VectorOperands,
    Default,
}

/// Result of classifying one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub family: FormatFamily,
    pub source: ClassificationSource,
    /// Every family named by the inheritance reference, in check order.
    pub candidates: Vec<FormatFamily>,
    /// The inheritance reference that was scanned, if any.
    pub reference: Option<String>,
}

impl Classification {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// The `$inherits` reference of a format section: a single string or the
/// first entry of a list.
pub fn inheritance_reference(format: &Mapping) -> Option<&str> {
    match format.get("$inherits")? {
        Value::String(reference) => Some(reference.as_str()),
        Value::Sequence(references) => references.first().and_then(Value::as_str),
        _ => None,
    }
}

/// All families whose marker occurs in `reference`, in check order.
pub fn families_in_reference(reference: &str) -> Vec<FormatFamily> {
    FormatFamily::INHERITABLE
        .into_iter()
        .filter(|family| family.named_by(reference))
        .collect()
}

/// Whether a match pattern has exactly the width of a compressed encoding.
pub fn is_compressed_pattern(pattern: &str) -> bool {
    pattern.chars().filter(|c| !MATCH_SEPARATORS.contains(c)).count() == COMPRESSED_WIDTH
}

/// Whether the assembly syntax names a vector mask and a vector source.
pub fn is_vector_syntax(assembly: &str) -> bool {
    assembly.contains("vm") && (assembly.contains("vs1") || assembly.contains("vs2"))
}

/// Classify from the individual inputs.
///
/// `match_pattern` must come from the top-level `encoding` section only.
pub fn classify_parts(
    reference: Option<&str>,
    match_pattern: Option<&str>,
    assembly: &str,
) -> Classification {
    let candidates = reference.map(families_in_reference).unwrap_or_default();
    let reference = reference.map(str::to_string);

    let (family, source) = if let Some(&first) = candidates.first() {
        (first, ClassificationSource::Inheritance)
    } else if match_pattern.is_some_and(is_compressed_pattern) {
        (FormatFamily::C, ClassificationSource::CompressedPattern)
    } else if is_vector_syntax(assembly) {
        (FormatFamily::V, ClassificationSource::VectorOperands)
    } else {
        (FormatFamily::R, ClassificationSource::Default)
    };

    Classification {
        family,
        source,
        candidates,
        reference,
    }
}

/// Classify an instruction record.
pub fn classify(record: &InstructionRecord) -> Classification {
    let reference = record.format.as_ref().and_then(inheritance_reference);
    let match_pattern = record
        .encoding
        .as_ref()
        .and_then(|encoding| encoding.get("match"))
        .and_then(scalar_text);

    let classification = classify_parts(reference, match_pattern.as_deref(), record.assembly());
    log::trace!(
        "{}: {} format via {:?}",
        record.name,
        classification.family,
        classification.source
    );
    classification
}
