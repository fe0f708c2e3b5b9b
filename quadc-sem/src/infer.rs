//! Implicit-cast rule for binary operators (spec.md §4.2).
//!
//! When operand types differ, the `int` operand widens to `float`.
//! `Assign` is the one exception: narrowing (`int = float`) is a
//! semantic error rather than a silent truncation, while widening
//! (`float = int`) still widens the rhs as usual.

use crate::types::Type;

/// Which operand (if either) needs a `StaticCast` wrapped around it
/// before the operator's types line up.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CastPlan {
    NoCast,
    CastLhs,
    CastRhs,
}

/// A narrowing assignment (`int = float`) was requested; this is a
/// semantic error (spec.md §7), not a cast this function can plan.
#[derive(Copy, Clone, Debug)]
pub struct NarrowingAssignment;

pub fn plan_cast(lhs: Type, rhs: Type, is_assign: bool) -> Result<(Type, CastPlan), NarrowingAssignment> {
    match (lhs, rhs) {
        (Type::Int, Type::Int) | (Type::Float, Type::Float) => {
            let result_ty = if is_assign { lhs } else { lhs };
            Ok((result_ty, CastPlan::NoCast))
        }
        (Type::Int, Type::Float) => {
            if is_assign {
                Err(NarrowingAssignment)
            } else {
                // Both operands widen to float: the result type of a
                // non-assign binary op is "the type after casting", so
                // the lhs (currently int) is the one that gets wrapped.
                Ok((Type::Float, CastPlan::CastLhs))
            }
        }
        (Type::Float, Type::Int) => {
            // `Assign`'s result type is the lhs's type (float), and the
            // rhs (int) widens into it. For a plain binary operator the
            // same cast direction also equalises the operand types.
            Ok((Type::Float, CastPlan::CastRhs))
        }
    }
}
