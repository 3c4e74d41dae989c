// This module turns the free-form assembly syntax of a UDB instruction ("xd, xs1, imm")
// into the typed operand lists of a TableGen instruction definition. Each comma separated
// token is classified in priority order: vector registers (only for V-format
// instructions), general purpose registers and their aliases, then immediates, whose
// operand type depends on the format family (simm12, simm13_lsb0, uimm20, simm21_lsb0).
// Unrecognized tokens are dropped. When nothing is recognized at all, a fixed operand
// shape for the family is substituted so every R/I/S/B/U/J instruction still gets a
// usable signature. Outputs always precede inputs in the rendered assembly string.

//! Assembly syntax operand parsing.

use std::fmt;

use super::format::FormatFamily;

/// General purpose register aliases accepted without an `x` prefix.
const GPR_ALIASES: [&str; 5] = ["rd", "rs1", "rs2", "xs1", "xd"];

/// Whether the instruction reads or writes the operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRole {
    Output,
    Input,
}

/// Register classes and operand types declared by the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandType {
    Gpr,
    Vr,
    VMask,
    Simm12,
    Simm13Lsb0,
    Uimm20,
    Simm21Lsb0,
}

impl OperandType {
    pub const ALL: [OperandType; 7] = [
        OperandType::Gpr,
        OperandType::Vr,
        OperandType::VMask,
        OperandType::Simm12,
        OperandType::Simm13Lsb0,
        OperandType::Uimm20,
        OperandType::Simm21Lsb0,
    ];

    /// TableGen name of the register class or operand type.
    pub fn name(self) -> &'static str {
        match self {
            OperandType::Gpr => "GPR",
            OperandType::Vr => "VR",
            OperandType::VMask => "VMaskOp",
            OperandType::Simm12 => "simm12",
            OperandType::Simm13Lsb0 => "simm13_lsb0",
            OperandType::Uimm20 => "uimm20",
            OperandType::Simm21Lsb0 => "simm21_lsb0",
        }
    }

    #[cfg(test)]
    pub fn is_register_class(self) -> bool {
        matches!(self, OperandType::Gpr | OperandType::Vr)
    }

    /// Immediate operand type for a format family.
    pub fn immediate_for(family: FormatFamily) -> Self {
        match family {
            FormatFamily::I | FormatFamily::S => OperandType::Simm12,
            FormatFamily::B => OperandType::Simm13Lsb0,
            FormatFamily::U => OperandType::Uimm20,
            FormatFamily::J => OperandType::Simm21Lsb0,
            _ => OperandType::Simm12,
        }
    }
}

/// One typed operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub role: OperandRole,
    pub ty: OperandType,
    pub name: String,
}

impl Operand {
    pub fn output(ty: OperandType, name: &str) -> Self {
        Self {
            role: OperandRole::Output,
            ty,
            name: name.to_string(),
        }
    }

    pub fn input(ty: OperandType, name: &str) -> Self {
        Self {
            role: OperandRole::Input,
            ty,
            name: name.to_string(),
        }
    }

    /// Reference used in the assembly format string, e.g. `$rd`.
    pub fn asm_ref(&self) -> String {
        format!("${}", self.name)
    }
}

/// Renders the dag entry, e.g. `GPR:$rd`.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:${}", self.ty.name(), self.name)
    }
}

/// Output and input operands of one instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandList {
    pub outputs: Vec<Operand>,
    pub inputs: Vec<Operand>,
}

impl OperandList {
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.inputs.is_empty()
    }

    fn push(&mut self, operand: Operand) {
        match operand.role {
            OperandRole::Output => self.outputs.push(operand),
            OperandRole::Input => self.inputs.push(operand),
        }
    }

    /// Fixed operand shape used when the assembly string yields nothing.
    pub fn default_for(family: FormatFamily) -> Self {
        let gpr_out = |name| Operand::output(OperandType::Gpr, name);
        let gpr_in = |name| Operand::input(OperandType::Gpr, name);
        let imm = Operand::input(OperandType::Simm12, "imm");

        match family {
            FormatFamily::R => Self {
                outputs: vec![gpr_out("rd")],
                inputs: vec![gpr_in("rs1"), gpr_in("rs2")],
            },
            FormatFamily::I => Self {
                outputs: vec![gpr_out("rd")],
                inputs: vec![gpr_in("rs1"), imm],
            },
            FormatFamily::U | FormatFamily::J => Self {
                outputs: vec![gpr_out("rd")],
                inputs: Vec::new(),
            },
            FormatFamily::S | FormatFamily::B => Self {
                outputs: Vec::new(),
                inputs: vec![gpr_in("rs1"), gpr_in("rs2"), imm],
            },
            FormatFamily::C | FormatFamily::V => Self::default(),
        }
    }

    /// `outs` dag body, e.g. `GPR:$rd`.
    pub fn outs_dag(&self) -> String {
        join(&self.outputs)
    }

    /// `ins` dag body, e.g. `GPR:$rs1, GPR:$rs2`.
    pub fn ins_dag(&self) -> String {
        join(&self.inputs)
    }

    /// Assembly format string, outputs first, e.g. `$rd, $rs1, $rs2`.
    pub fn asm_format(&self) -> String {
        self.outputs
            .iter()
            .chain(&self.inputs)
            .map(Operand::asm_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn join(operands: &[Operand]) -> String {
    operands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classify a single trimmed token.
fn classify_token(token: &str, family: FormatFamily) -> Option<Operand> {
    if family == FormatFamily::V && token.starts_with('v') {
        return match token {
            "vd" => Some(Operand::output(OperandType::Vr, "vd")),
            "vm" => Some(Operand::input(OperandType::VMask, "vm")),
            _ if token.starts_with("vs") => Some(Operand::input(OperandType::Vr, token)),
            _ => None,
        };
    }

    if token.starts_with('x') || GPR_ALIASES.contains(&token) {
        return Some(match token {
            "xd" | "rd" => Operand::output(OperandType::Gpr, "rd"),
            "xs1" | "rs1" => Operand::input(OperandType::Gpr, "rs1"),
            "xs2" | "rs2" => Operand::input(OperandType::Gpr, "rs2"),
            _ => Operand::input(OperandType::Gpr, token),
        });
    }

    let is_number = !token.is_empty() && token.chars().all(|c| c.is_ascii_digit());
    if token.to_lowercase().contains("imm") || is_number {
        return Some(Operand::input(OperandType::immediate_for(family), "imm"));
    }

    None
}

/// Parse the assembly string without applying the family fallback.
pub fn parse_tokens(assembly: &str, family: FormatFamily) -> OperandList {
    let mut operands = OperandList::default();
    if assembly.is_empty() {
        return operands;
    }

    for token in assembly.split(',').map(str::trim) {
        match classify_token(token, family) {
            Some(operand) => operands.push(operand),
            None => log::trace!("dropping assembly token '{token}'"),
        }
    }
    operands
}

/// Parse the assembly string, substituting the family's default shape when
/// no operand was recognized.
pub fn parse(assembly: &str, family: FormatFamily) -> OperandList {
    let operands = parse_tokens(assembly, family);
    if operands.is_empty() {
        OperandList::default_for(family)
    } else {
        operands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dags(list: &OperandList) -> (String, String) {
        (list.outs_dag(), list.ins_dag())
    }

    #[test]
    fn test_r_type_registers() {
        let ops = parse("rd, rs1, rs2", FormatFamily::R);
        assert_eq!(dags(&ops), ("GPR:$rd".to_string(), "GPR:$rs1, GPR:$rs2".to_string()));
        assert_eq!(ops.asm_format(), "$rd, $rs1, $rs2");
    }

    #[test]
    fn test_udb_register_names() {
        let ops = parse("xd, xs1, xs2", FormatFamily::R);
        assert_eq!(dags(&ops), ("GPR:$rd".to_string(), "GPR:$rs1, GPR:$rs2".to_string()));

        let ops = parse("xs3, x0", FormatFamily::R);
        assert_eq!(ops.ins_dag(), "GPR:$xs3, GPR:$x0");
    }

    #[test]
    fn test_outputs_render_before_inputs() {
        let ops = parse("xs1, xd", FormatFamily::R);
        assert_eq!(ops.asm_format(), "$rd, $rs1");
    }

    #[test]
    fn test_immediate_types_follow_family() {
        for (family, ty) in [
            (FormatFamily::I, "simm12"),
            (FormatFamily::S, "simm12"),
            (FormatFamily::B, "simm13_lsb0"),
            (FormatFamily::U, "uimm20"),
            (FormatFamily::J, "simm21_lsb0"),
            (FormatFamily::R, "simm12"),
            (FormatFamily::C, "simm12"),
        ] {
            let ops = parse("xs1, IMM", family);
            assert_eq!(ops.ins_dag(), format!("GPR:$rs1, {ty}:$imm"), "{family}");
        }
    }

    #[test]
    fn test_numeric_token_is_immediate() {
        let ops = parse("xd, 4", FormatFamily::U);
        assert_eq!(dags(&ops), ("GPR:$rd".to_string(), "uimm20:$imm".to_string()));
    }

    #[test]
    fn test_immediate_with_base_register() {
        let ops = parse("xd, imm(xs1)", FormatFamily::I);
        assert_eq!(ops.ins_dag(), "simm12:$imm");
    }

    #[test]
    fn test_vector_operands() {
        let ops = parse("vd, vs2, vs1, vm", FormatFamily::V);
        assert_eq!(ops.outs_dag(), "VR:$vd");
        assert_eq!(ops.ins_dag(), "VR:$vs2, VR:$vs1, VMaskOp:$vm");
        assert_eq!(ops.asm_format(), "$vd, $vs2, $vs1, $vm");
    }

    #[test]
    fn test_vector_tokens_outside_v_family_are_dropped() {
        let ops = parse_tokens("vd, vs2", FormatFamily::R);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_unknown_vector_token_is_dropped() {
        let ops = parse_tokens("vd, v0.t", FormatFamily::V);
        assert_eq!(ops.outs_dag(), "VR:$vd");
        assert!(ops.inputs.is_empty());
    }

    #[test]
    fn test_unrecognized_tokens_are_dropped() {
        let ops = parse_tokens("fd, fs1, rm", FormatFamily::R);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_fallback_shapes() {
        let shape = |family| dags(&parse("", family));
        assert_eq!(shape(FormatFamily::R), ("GPR:$rd".to_string(), "GPR:$rs1, GPR:$rs2".to_string()));
        assert_eq!(shape(FormatFamily::I), ("GPR:$rd".to_string(), "GPR:$rs1, simm12:$imm".to_string()));
        assert_eq!(shape(FormatFamily::U), ("GPR:$rd".to_string(), String::new()));
        assert_eq!(shape(FormatFamily::J), ("GPR:$rd".to_string(), String::new()));
        assert_eq!(
            shape(FormatFamily::S),
            (String::new(), "GPR:$rs1, GPR:$rs2, simm12:$imm".to_string())
        );
        assert_eq!(
            shape(FormatFamily::B),
            (String::new(), "GPR:$rs1, GPR:$rs2, simm12:$imm".to_string())
        );
        assert!(parse("", FormatFamily::C).is_empty());
        assert!(parse("", FormatFamily::V).is_empty());
    }

    #[test]
    fn test_fallback_applies_when_every_token_is_dropped() {
        let ops = parse("fd, fs1", FormatFamily::I);
        assert_eq!(ops, OperandList::default_for(FormatFamily::I));
    }
}
