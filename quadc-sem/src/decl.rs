//! The flat declaration table: every variable in a program is declared
//! exactly once, at the top, and lives for the program's whole run.
//! Insertion order is irrelevant (spec.md §3) — lookup is by name.

use rustc_hash::FxHashMap;
use quadc_util::{define_idx, IndexVec, Symbol};

use crate::types::Type;

define_idx!(VarId);

#[derive(Clone, Debug)]
pub struct Variable {
    pub name: Symbol,
    pub ty: Type,
}

#[derive(Default)]
pub struct DeclTable {
    vars: IndexVec<VarId, Variable>,
    by_name: FxHashMap<Symbol, VarId>,
}

impl DeclTable {
    pub fn new() -> Self {
        DeclTable { vars: IndexVec::new(), by_name: FxHashMap::default() }
    }

    /// Registers a new variable. `None` if `name` was already declared
    /// (the caller turns that into a `SyntaxError::DuplicateDeclaration`,
    /// spec.md §7 — duplicate declaration is a syntax error, not a
    /// semantic one, since it's detected purely from the declaration
    /// list shape).
    pub fn declare(&mut self, name: Symbol, ty: Type) -> Option<VarId> {
        if self.by_name.contains_key(&name) {
            return None;
        }
        let id = self.vars.push(Variable { name, ty });
        self.by_name.insert(name, id);
        Some(id)
    }

    pub fn lookup(&self, name: Symbol) -> Option<VarId> {
        self.by_name.get(&name).copied()
    }

    pub fn get(&self, id: VarId) -> &Variable {
        &self.vars[id]
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaring_the_same_name_fails() {
        let mut table = DeclTable::new();
        let x = Symbol::intern("x");
        assert!(table.declare(x, Type::Int).is_some());
        assert!(table.declare(x, Type::Float).is_none());
    }

    #[test]
    fn lookup_finds_declared_variables_by_name() {
        let mut table = DeclTable::new();
        let x = Symbol::intern("x");
        let id = table.declare(x, Type::Int).unwrap();
        assert_eq!(table.lookup(x), Some(id));
        assert_eq!(table.get(id).ty, Type::Int);
    }
}
