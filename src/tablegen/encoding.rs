//! Encoding extraction.
//!
//! Opcode and funct values come from `format.opcodes`. The match pattern and
//! the variable annotations come from `format.encoding` and then from the
//! top-level `encoding` section, which replaces whatever `format` provided.
//! Variable locations are carried as text and never interpreted.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use crate::core::record::{mapping_field, scalar_text, InstructionRecord};

/// Prefix of a binary literal, the only form rendered as a `let` constraint.
pub const BINARY_PREFIX: &str = "0b";

/// Fixed-position opcode fields, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpcodeField {
    Opcode,
    Funct3,
    Funct7,
    Funct6,
    Funct2,
}

impl OpcodeField {
    pub const ALL: [OpcodeField; 5] = [
        OpcodeField::Opcode,
        OpcodeField::Funct3,
        OpcodeField::Funct7,
        OpcodeField::Funct6,
        OpcodeField::Funct2,
    ];

    /// Key used in UDB `opcodes` sections.
    pub fn key(self) -> &'static str {
        match self {
            OpcodeField::Opcode => "opcode",
            OpcodeField::Funct3 => "funct3",
            OpcodeField::Funct7 => "funct7",
            OpcodeField::Funct6 => "funct6",
            OpcodeField::Funct2 => "funct2",
        }
    }

    /// Capitalized field name used on the TableGen side.
    pub fn let_name(self) -> &'static str {
        match self {
            OpcodeField::Opcode => "Opcode",
            OpcodeField::Funct3 => "Funct3",
            OpcodeField::Funct7 => "Funct7",
            OpcodeField::Funct6 => "Funct6",
            OpcodeField::Funct2 => "Funct2",
        }
    }
}

/// A named bit-range annotation. `location` is documentation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub location: String,
}

/// Merged encoding information of one instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    pub fields: BTreeMap<OpcodeField, String>,
    pub match_pattern: Option<String>,
    pub variables: Vec<Variable>,
}

impl Encoding {
    /// Opcode fields whose value is a binary literal, in rendering order.
    pub fn binary_fields(&self) -> impl Iterator<Item = (OpcodeField, &str)> + '_ {
        self.fields
            .iter()
            .filter(|(_, value)| value.starts_with(BINARY_PREFIX))
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.match_pattern.is_none() && self.variables.is_empty()
    }

    /// Take `match` and `variables` from an encoding section, replacing
    /// anything set earlier.
    fn merge_section(&mut self, section: &Mapping) {
        if let Some(pattern) = section.get("match").and_then(scalar_text) {
            self.match_pattern = Some(pattern);
        }
        if let Some(variables) = section.get("variables") {
            self.variables = extract_variables(variables);
        }
    }
}

/// Read the known opcode fields of an `opcodes` section.
pub fn extract_opcodes(opcodes: &Mapping) -> BTreeMap<OpcodeField, String> {
    let mut fields = BTreeMap::new();
    for field in OpcodeField::ALL {
        let Some(entry) = opcodes.get(field.key()) else {
            continue;
        };
        let value = match entry {
            Value::Mapping(m) => m.get("value").and_then(scalar_text),
            other => scalar_text(other),
        };
        if let Some(value) = value {
            fields.insert(field, value);
        }
    }
    fields
}

fn extract_variables(variables: &Value) -> Vec<Variable> {
    let Some(entries) = variables.as_sequence() else {
        log::debug!("ignoring non-list variables section");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_mapping()?;
            let name = entry.get("name").and_then(scalar_text)?;
            let location = entry.get("location").and_then(scalar_text)?;
            (!name.is_empty() && !location.is_empty()).then_some(Variable { name, location })
        })
        .collect()
}

/// Merge the `format` section and the top-level `encoding` section.
pub fn extract_sections(format: Option<&Mapping>, encoding: Option<&Mapping>) -> Encoding {
    let mut result = Encoding::default();

    if let Some(format) = format {
        if let Some(opcodes) = mapping_field(format, "opcodes") {
            result.fields = extract_opcodes(opcodes);
        }
        if let Some(nested) = mapping_field(format, "encoding") {
            result.merge_section(nested);
        }
    }
    if let Some(encoding) = encoding {
        result.merge_section(encoding);
    }

    result
}

/// Extract the encoding of an instruction record.
pub fn extract(record: &InstructionRecord) -> Encoding {
    let encoding = extract_sections(record.format.as_ref(), record.encoding.as_ref());
    log::trace!(
        "{}: {} opcode fields, {} variables",
        record.name,
        encoding.fields.len(),
        encoding.variables.len()
    );
    encoding
}
