//! Fixed TableGen preamble emitted at the top of every generated file.
//!
//! It declares the register classes and operand types that rendered
//! instruction definitions refer to (see [`OperandType`](super::OperandType)).

/// Horizontal rule used by TableGen banner comments.
pub const RULE: &str =
    "//===----------------------------------------------------------------------===//";

const RISCV_PREAMBLE: &str = r#"//===-- Generated from RISC-V UDB --------*- tablegen -*-===//
// Auto-generated from RISC-V Unified Database
//===----------------------------------------------------------------------===//

include "RISCVInstrFormats.td"

// Register Classes
def GPR : RegisterClass<"RISCV", [i32], 32, (add
  (sequence "X%u", 0, 31)
)>;

def VR : RegisterClass<"RISCV", [v64i1, v128i1, v256i1, v512i1, v1024i1], 32, (add
  (sequence "V%u", 0, 31)
)>;

// Operand Types
def simm12 : Operand<i32>;
def simm13_lsb0 : Operand<i32>;
def simm21_lsb0 : Operand<i32>;
def uimm20 : Operand<i32>;
def VMaskOp : Operand<i32>;

//===----------------------------------------------------------------------===//
// Generated Content
//===----------------------------------------------------------------------===//
"#;

/// Immutable header text handed to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preamble {
    text: &'static str,
}

impl Preamble {
    /// RISC-V register classes and operand types.
    pub const RISCV: Preamble = Preamble::new(RISCV_PREAMBLE);

    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tablegen::OperandType;

    #[test]
    fn test_declares_every_operand_type() {
        let text = Preamble::RISCV.text();
        for ty in OperandType::ALL {
            let decl = if ty.is_register_class() {
                format!("def {} : RegisterClass<", ty.name())
            } else {
                format!("def {} : Operand<i32>;", ty.name())
            };
            assert!(text.contains(&decl), "missing declaration of {}", ty.name());
        }
    }

    #[test]
    fn test_layout() {
        let text = Preamble::RISCV.text();
        assert!(text.starts_with("//===-- Generated from RISC-V UDB"));
        assert!(text.contains("include \"RISCVInstrFormats.td\""));
        assert!(text.ends_with(&format!("// Generated Content\n{RULE}\n")));
    }
}
