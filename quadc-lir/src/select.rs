//! Instruction selection: one `quadc_mir::Instr` becomes one or more
//! Quad mnemonic lines (spec.md §4.4), `<label>` placeholders left for
//! `quadc-gen` to resolve. Grounded directly on `original_source/quad.py`'s
//! `Quad.map_instruction`.

use quadc_mir::{BasicBlock, Instr, Operand};
use quadc_par::{BinaryOp, UnaryOp};
use quadc_sem::Type;

fn prefix(ty: Type) -> char {
    match ty {
        Type::Int => 'I',
        Type::Float => 'R',
    }
}

fn render(operand: &Operand) -> String {
    match operand {
        Operand::Int(i) => i.to_string(),
        Operand::Float(f) => format_float(*f),
        Operand::Name(name) => name.clone(),
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// `Or`/`And` normalise each operand to a 0/1 "is this truthy" flag
/// before combining them (see DESIGN.md Open Question resolution 5:
/// this uses `!= 0`, not the source's `== 0`).
fn normalize_boolean(operand: &Operand, ty: Type, lines: &mut Vec<String>) -> String {
    match operand {
        Operand::Int(i) => if *i != 0 { "1" } else { "0" }.to_string(),
        Operand::Float(f) => if *f != 0.0 { "1" } else { "0" }.to_string(),
        Operand::Name(name) => {
            let normalized = format!("_{name}");
            lines.push(format!("{}NQL {normalized} {name} 0", prefix(ty)));
            normalized
        }
    }
}

fn select_binary(op: BinaryOp, ty: Type, dst: &str, lhs: &Operand, rhs: &Operand) -> Vec<String> {
    let p = prefix(ty);
    let a = render(lhs);
    let b = render(rhs);
    match op {
        BinaryOp::Assign => unreachable!("Assign never reaches instruction selection as a Binary instr"),
        BinaryOp::Add => vec![format!("{p}ADD {dst} {a} {b}")],
        BinaryOp::Sub => vec![format!("{p}SUB {dst} {a} {b}")],
        BinaryOp::Mul => vec![format!("{p}MLT {dst} {a} {b}")],
        BinaryOp::Div => vec![format!("{p}DIV {dst} {a} {b}")],
        BinaryOp::Equal => vec![format!("{p}EQL {dst} {a} {b}")],
        BinaryOp::NotEqual => vec![format!("{p}NQL {dst} {a} {b}")],
        BinaryOp::Less => vec![format!("{p}LSS {dst} {a} {b}")],
        BinaryOp::Greater => vec![format!("{p}GRT {dst} {a} {b}")],
        BinaryOp::LessOrEqual => {
            let tmp = format!("_{dst}");
            vec![format!("{p}EQL {dst} {a} {b}"), format!("{p}LSS {tmp} {a} {b}"), format!("{p}ADD {dst} {dst} {tmp}")]
        }
        BinaryOp::GreaterOrEqual => {
            let tmp = format!("_{dst}");
            vec![format!("{p}EQL {dst} {a} {b}"), format!("{p}GRT {tmp} {a} {b}"), format!("{p}ADD {dst} {dst} {tmp}")]
        }
        BinaryOp::Or => {
            let mut lines = Vec::new();
            let n1 = normalize_boolean(lhs, ty, &mut lines);
            let n2 = normalize_boolean(rhs, ty, &mut lines);
            lines.push(format!("{p}ADD {dst} {n1} {n2}"));
            lines
        }
        BinaryOp::And => {
            let mut lines = Vec::new();
            let n1 = normalize_boolean(lhs, ty, &mut lines);
            let n2 = normalize_boolean(rhs, ty, &mut lines);
            lines.push(format!("{p}MLT {dst} {n1} {n2}"));
            lines
        }
    }
}

fn select_instr(instr: &Instr) -> Vec<String> {
    match instr {
        Instr::Input { ty, var } => vec![format!("{}INP {var}", prefix(*ty))],
        Instr::Output { ty, value } => vec![format!("{}PRT {}", prefix(*ty), render(value))],
        Instr::StaticCast { dst_ty, dst, arg } => match dst_ty {
            Type::Int => vec![format!("RTOI {dst} {}", render(arg))],
            Type::Float => vec![format!("ITOR {dst} {}", render(arg))],
        },
        Instr::Unary { op, ty, dst, arg } => {
            let p = prefix(*ty);
            let a = render(arg);
            match op {
                UnaryOp::UnaryAdd => vec![format!("{p}ADD {dst} 0 {a}")],
                UnaryOp::Negate => vec![format!("{p}SUB {dst} 0 {a}")],
                UnaryOp::Not => vec![format!("{p}EQL {dst} {a} 0")],
            }
        }
        Instr::Assign { ty, dst, src } => vec![format!("{}ASN {dst} {}", prefix(*ty), render(src))],
        Instr::Binary { op, ty, dst, lhs, rhs } => select_binary(*op, *ty, dst, lhs, rhs),
        Instr::Jump { label } => vec![format!("JUMP <{label}>")],
        Instr::CondBr { cond, true_label, false_label } => {
            vec![format!("JMPZ <{false_label}> {}", render(cond)), format!("JUMP <{true_label}>")]
        }
        Instr::Halt => vec!["HALT".to_string()],
    }
}

/// A basic block after instruction selection: still carries its
/// labels, but its instructions are now target mnemonic lines with
/// unresolved `<label>` references.
pub struct SelectedBlock {
    pub labels: Vec<String>,
    pub lines: Vec<String>,
}

pub fn select_program(blocks: &[BasicBlock]) -> Vec<SelectedBlock> {
    blocks
        .iter()
        .map(|block| SelectedBlock { labels: block.labels.clone(), lines: block.instrs.iter().flat_map(select_instr).collect() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadc_mir::Operand;

    #[test]
    fn add_selects_a_single_typed_line() {
        let lines = select_binary(BinaryOp::Add, Type::Int, "c", &Operand::Name("a".into()), &Operand::Name("b".into()));
        assert_eq!(lines, vec!["IADD c a b".to_string()]);
    }

    #[test]
    fn less_or_equal_expands_to_three_lines() {
        let lines =
            select_binary(BinaryOp::LessOrEqual, Type::Int, "d", &Operand::Name("a".into()), &Operand::Name("b".into()));
        assert_eq!(lines, vec!["IEQL d a b".to_string(), "ILSS _d a b".to_string(), "IADD d d _d".to_string()]);
    }

    #[test]
    fn static_cast_to_int_emits_rtoi() {
        let lines = select_instr(&Instr::StaticCast { dst_ty: Type::Int, dst: "t1".to_string(), arg: Operand::Name("y".into()) });
        assert_eq!(lines, vec!["RTOI t1 y".to_string()]);
    }

    #[test]
    fn halt_has_no_operands() {
        assert_eq!(select_instr(&Instr::Halt), vec!["HALT".to_string()]);
    }

    #[test]
    fn or_normalises_variable_operands_with_not_equal() {
        let lines = select_binary(BinaryOp::Or, Type::Int, "d", &Operand::Name("a".into()), &Operand::Name("b".into()));
        assert_eq!(lines, vec!["INQL _a a 0".to_string(), "INQL _b b 0".to_string(), "IADD d _a _b".to_string()]);
    }

    #[test]
    fn and_folds_a_literal_operand_at_selection_time() {
        let lines = select_binary(BinaryOp::And, Type::Int, "d", &Operand::Name("a".into()), &Operand::Int(0));
        assert_eq!(lines, vec!["INQL _a a 0".to_string(), "IMLT d _a 0".to_string()]);
    }

    #[test]
    fn cond_br_expands_to_jmpz_then_jump() {
        let lines = select_instr(&Instr::CondBr {
            cond: Operand::Name("t1".into()),
            true_label: "L1".to_string(),
            false_label: "L2".to_string(),
        });
        assert_eq!(lines, vec!["JMPZ <L2> t1".to_string(), "JUMP <L1>".to_string()]);
    }
}
