//! Typed UDB records.
//!
//! A UDB document is decoded into a [`serde_yaml::Value`] first. The shape
//! checks (empty, not a mapping, unknown `kind`) happen once here, and the
//! mapping is then deserialized into the record type of its kind. Everything
//! downstream works on [`Record`] and never sees a half-validated document.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fmt;

use super::error::{ConvertError, ConvertResult};

/// The record kinds the converter knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Instruction,
    Csr,
    Extension,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Instruction, RecordKind::Csr, RecordKind::Extension];

    /// Resolve the `kind:` tag of a document.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "instruction" => Some(RecordKind::Instruction),
            "csr" => Some(RecordKind::Csr),
            "extension" => Some(RecordKind::Extension),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            RecordKind::Instruction => "instruction",
            RecordKind::Csr => "csr",
            RecordKind::Extension => "extension",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An instruction record (`kind: instruction`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstructionRecord {
    pub name: String,
    pub long_name: Option<String>,
    pub description: Option<String>,
    pub assembly: Option<String>,
    /// `format:` section, possibly holding `$inherits`, `opcodes` and `encoding`.
    pub format: Option<Mapping>,
    /// Top-level `encoding:` section.
    pub encoding: Option<Mapping>,
}

impl InstructionRecord {
    pub fn assembly(&self) -> &str {
        self.assembly.as_deref().unwrap_or("")
    }
}

/// A control/status register record (`kind: csr`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsrRecord {
    pub name: String,
    pub long_name: Option<String>,
    pub description: Option<String>,
    pub address: Option<Value>,
}

/// An ISA extension record (`kind: extension`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionRecord {
    pub name: String,
    pub long_name: Option<String>,
    pub description: Option<String>,
}

/// One validated UDB record.
#[derive(Debug, Clone)]
pub enum Record {
    Instruction(InstructionRecord),
    Csr(CsrRecord),
    Extension(ExtensionRecord),
}

impl Record {
    /// Validate a decoded document and convert it into a typed record.
    pub fn from_value(value: Value) -> ConvertResult<Self> {
        let mapping = match value {
            Value::Null => return Err(ConvertError::EmptyDocument),
            Value::Mapping(m) if m.is_empty() => return Err(ConvertError::EmptyDocument),
            Value::Mapping(m) => m,
            _ => return Err(ConvertError::NotAMapping),
        };

        let tag = mapping
            .get("kind")
            .and_then(scalar_text)
            .unwrap_or_else(|| "unknown".to_string());
        let kind = RecordKind::from_tag(&tag).ok_or(ConvertError::UnknownKind { kind: tag })?;

        let value = Value::Mapping(mapping);
        let invalid = |source: serde_yaml::Error| ConvertError::InvalidRecord { kind, source };
        let record = match kind {
            RecordKind::Instruction => Record::Instruction(serde_yaml::from_value(value).map_err(invalid)?),
            RecordKind::Csr => Record::Csr(serde_yaml::from_value(value).map_err(invalid)?),
            RecordKind::Extension => Record::Extension(serde_yaml::from_value(value).map_err(invalid)?),
        };
        Ok(record)
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Instruction(_) => RecordKind::Instruction,
            Record::Csr(_) => RecordKind::Csr,
            Record::Extension(_) => RecordKind::Extension,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Record::Instruction(r) => &r.name,
            Record::Csr(r) => &r.name,
            Record::Extension(r) => &r.name,
        }
    }

    /// `long_name`, falling back to `name`.
    pub fn long_name(&self) -> &str {
        let long_name = match self {
            Record::Instruction(r) => r.long_name.as_deref(),
            Record::Csr(r) => r.long_name.as_deref(),
            Record::Extension(r) => r.long_name.as_deref(),
        };
        long_name.unwrap_or_else(|| self.name())
    }

    pub fn description(&self) -> &str {
        let description = match self {
            Record::Instruction(r) => r.description.as_deref(),
            Record::Csr(r) => r.description.as_deref(),
            Record::Extension(r) => r.description.as_deref(),
        };
        description.unwrap_or("")
    }
}

/// Text of a YAML scalar. Numbers and booleans use their YAML spelling.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Look up a mapping-valued key in a mapping.
pub fn mapping_field<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Mapping> {
    mapping.get(key).and_then(Value::as_mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ConvertResult<Record> {
        Record::from_value(serde_yaml::from_str(text).unwrap())
    }

    #[test]
    fn test_instruction_record() {
        let record = parse(
            "kind: instruction\nname: add\nlong_name: Integer add\nassembly: xd, xs1, xs2\n",
        )
        .unwrap();
        assert_eq!(record.kind(), RecordKind::Instruction);
        assert_eq!(record.name(), "add");
        assert_eq!(record.long_name(), "Integer add");
        assert_eq!(record.description(), "");
        match record {
            Record::Instruction(inst) => assert_eq!(inst.assembly(), "xd, xs1, xs2"),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn test_long_name_falls_back_to_name() {
        let record = parse("kind: csr\nname: mstatus\naddress: \"0x300\"\n").unwrap();
        assert_eq!(record.long_name(), "mstatus");
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(parse("~"), Err(ConvertError::EmptyDocument)));
        assert!(matches!(parse("{}"), Err(ConvertError::EmptyDocument)));
    }

    #[test]
    fn test_not_a_mapping() {
        assert!(matches!(parse("- a\n- b\n"), Err(ConvertError::NotAMapping)));
        assert!(matches!(parse("just text"), Err(ConvertError::NotAMapping)));
    }

    #[test]
    fn test_unknown_and_missing_kind() {
        match parse("kind: unknown_kind\nname: x\n") {
            Err(ConvertError::UnknownKind { kind }) => assert_eq!(kind, "unknown_kind"),
            other => panic!("unexpected result {other:?}"),
        }
        match parse("name: x\n") {
            Err(ConvertError::UnknownKind { kind }) => assert_eq!(kind, "unknown"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_is_rejected() {
        match parse("kind: extension\nlong_name: Nameless\n") {
            Err(ConvertError::InvalidRecord { kind, source }) => {
                assert_eq!(kind, RecordKind::Extension);
                assert!(source.to_string().contains("name"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&Value::String("0x300".into())), Some("0x300".to_string()));
        assert_eq!(scalar_text(&Value::Number(768.into())), Some("768".to_string()));
        assert_eq!(scalar_text(&Value::Bool(true)), Some("true".to_string()));
        assert_eq!(scalar_text(&Value::Null), None);
    }
}
