//! The two primitive types. Compared by identity (there is no
//! subtyping or coercion represented in the type itself — every
//! widening is a real `StaticCast` node inserted by the parser).

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Type {
    Int,
    Float,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
        }
    }
}
