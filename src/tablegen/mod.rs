//! TableGen generation pipeline.
//!
//! Each instruction goes through the same steps, all pure functions of the
//! record:
//!
//! 1. [`format::classify`] picks the [`FormatFamily`]
//! 2. [`encoding::extract`] collects opcode fields, match pattern and variables
//! 3. [`operands::parse`] types the assembly operands for that family
//! 4. [`Renderer`] writes the `RISCVInst` definition
//!
//! CSRs and extensions skip straight to rendering.

pub mod encoding;
pub mod format;
pub mod operands;
pub mod preamble;
pub mod render;

pub use encoding::{Encoding, OpcodeField, Variable};
pub use format::{classify, Classification, ClassificationSource, FormatFamily};
pub use operands::{Operand, OperandList, OperandRole, OperandType};
pub use preamble::Preamble;
pub use render::{identifier, RenderedBlock, Renderer};
