//! Interned identifiers.
//!
//! Every `IDENTIFIER` token becomes a `Symbol`, a cheap `Copy` handle
//! into a per-compilation string table, instead of an owned `String`
//! on every token and every declaration-table entry. The compiler is
//! single-threaded and batch (§5: no parallelism), so the interner is a
//! plain `RefCell`-guarded table rather than the teacher's
//! concurrent `dashmap`-backed one.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        INTERNER.with(|i| write!(f, "{:?}", i.borrow().resolve(*self)))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        INTERNER.with(|i| write!(f, "{}", i.borrow().resolve(*self)))
    }
}

impl Symbol {
    pub fn intern(text: &str) -> Symbol {
        INTERNER.with(|i| i.borrow_mut().intern(text))
    }

    pub fn as_str(self) -> String {
        INTERNER.with(|i| i.borrow().resolve(self).to_string())
    }
}

struct Interner {
    map: FxHashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        Interner { map: FxHashMap::default(), strings: Vec::new() }
    }

    fn intern(&mut self, text: &str) -> Symbol {
        if let Some(sym) = self.map.get(text) {
            return *sym;
        }
        // Leaked once per distinct spelling for the life of the process;
        // a batch compiler never needs to reclaim this.
        let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(leaked);
        self.map.insert(leaked, sym);
        sym
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }
}

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn equal_spellings_intern_to_the_same_symbol() {
        let a = Symbol::intern("count");
        let b = Symbol::intern("count");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "count");
    }

    #[test]
    fn distinct_spellings_intern_to_distinct_symbols() {
        let a = Symbol::intern("x");
        let b = Symbol::intern("y");
        assert_ne!(a, b);
    }

    #[quickcheck]
    fn interning_any_string_round_trips_through_as_str(text: String) -> bool {
        Symbol::intern(&text).as_str() == text
    }

    #[quickcheck]
    fn interning_the_same_string_twice_yields_the_same_symbol(text: String) -> bool {
        Symbol::intern(&text) == Symbol::intern(&text)
    }
}
