//! Constant-expression evaluator, used exclusively for switch case
//! labels (spec.md §4.2, §9 "do not generalise"). A pure recursive walk
//! over `Value`: `Immediate` and any operator whose operands
//! recursively const-evaluate. `Use` is never constant.

use crate::ast::{BinaryOp, Literal, UnaryOp, Value};

fn as_f64(lit: Literal) -> f64 {
    match lit {
        Literal::Int(i) => i as f64,
        Literal::Float(f) => f,
    }
}

fn int_lit(b: bool) -> Literal {
    Literal::Int(b as i64)
}

/// Evaluates `value` to a constant `Literal`, or `None` if it contains
/// a `Use` or any other non-constant construct.
pub fn eval_const(value: &Value) -> Option<Literal> {
    match value {
        Value::Immediate(lit, ..) => Some(*lit),
        Value::Use(..) => None,
        Value::StaticCast(inner, ty, _) => {
            let v = eval_const(inner)?;
            Some(match ty {
                quadc_sem::Type::Int => Literal::Int(as_f64(v) as i64),
                quadc_sem::Type::Float => Literal::Float(as_f64(v)),
            })
        }
        Value::Unary(op, inner, _, _) => {
            let v = eval_const(inner)?;
            Some(match op {
                UnaryOp::UnaryAdd => v,
                UnaryOp::Negate => match v {
                    Literal::Int(i) => Literal::Int(-i),
                    Literal::Float(f) => Literal::Float(-f),
                },
                UnaryOp::Not => int_lit(as_f64(v) == 0.0),
            })
        }
        Value::Binary(op, lhs, rhs, _, _) => {
            if matches!(op, BinaryOp::Assign) {
                return None;
            }
            let lhs_ty = lhs.ty();
            let lit_a = eval_const(lhs)?;
            let lit_b = eval_const(rhs)?;
            let a = as_f64(lit_a);
            let b = as_f64(lit_b);
            // Operands already have matching types by the time this
            // node exists (implicit casts are inserted at parse time),
            // so arithmetic results stay in that type instead of
            // always promoting to float.
            let arith = |f: fn(f64, f64) -> f64| -> Literal {
                let r = f(a, b);
                if lhs_ty == quadc_sem::Type::Int {
                    Literal::Int(r as i64)
                } else {
                    Literal::Float(r)
                }
            };
            Some(match op {
                BinaryOp::Assign => unreachable!(),
                BinaryOp::Add => arith(|x, y| x + y),
                BinaryOp::Sub => arith(|x, y| x - y),
                BinaryOp::Mul => arith(|x, y| x * y),
                BinaryOp::Div => arith(|x, y| x / y),
                BinaryOp::Or => int_lit(a != 0.0 || b != 0.0),
                BinaryOp::And => int_lit(a != 0.0 && b != 0.0),
                BinaryOp::Equal => int_lit(a == b),
                BinaryOp::NotEqual => int_lit(a != b),
                BinaryOp::Less => int_lit(a < b),
                BinaryOp::Greater => int_lit(a > b),
                BinaryOp::LessOrEqual => int_lit(a <= b),
                BinaryOp::GreaterOrEqual => int_lit(a >= b),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadc_sem::Type;
    use quadc_util::Span;

    fn imm(i: i64) -> Value {
        Value::Immediate(Literal::Int(i), Type::Int, Span::dummy())
    }

    #[test]
    fn immediate_is_its_own_value() {
        assert_eq!(eval_const(&imm(5)), Some(Literal::Int(5)));
    }

    #[test]
    fn binary_add_folds_operands() {
        let expr = Value::Binary(BinaryOp::Add, Box::new(imm(2)), Box::new(imm(3)), Type::Int, Span::dummy());
        assert_eq!(eval_const(&expr), Some(Literal::Int(5)));
    }

    #[test]
    fn a_use_is_never_constant() {
        let mut decls = quadc_sem::DeclTable::new();
        let id = decls.declare(quadc_util::Symbol::intern("x"), Type::Int).unwrap();
        let value = Value::Use(id, Type::Int, Span::dummy());
        assert_eq!(eval_const(&value), None);
    }
}
