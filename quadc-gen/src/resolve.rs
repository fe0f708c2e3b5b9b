//! Label resolution (spec.md §4.3 pass 3, second half): textual
//! `<label>` occurrences become the numeric address registered for
//! that label. Grounded on `original_source/codegen.py`'s
//! `_translate_labels`, which does the same substitution with a regex;
//! the instruction text here only ever contains the one `<...>` shape
//! `quadc-lir` writes, so a hand-rolled scan avoids pulling in `regex`
//! for a single fixed pattern.

use crate::error::GenError;
use rustc_hash::FxHashMap;

/// Replaces every `<label>` substring in `line` with the address
/// registered for `label` in `table`.
pub fn resolve_line(line: &str, table: &FxHashMap<String, usize>) -> Result<String, GenError> {
    let mut resolved = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find('<') {
        let Some(end) = rest[start..].find('>') else {
            resolved.push_str(rest);
            rest = "";
            break;
        };
        let end = start + end;
        let label = &rest[start + 1..end];
        let address = table.get(label).ok_or_else(|| GenError::UnknownLabel { label: label.to_string() })?;
        resolved.push_str(&rest[..start]);
        resolved.push_str(&address.to_string());
        rest = &rest[end + 1..];
    }
    resolved.push_str(rest);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FxHashMap<String, usize> {
        let mut t = FxHashMap::default();
        t.insert("L1".to_string(), 4);
        t.insert("L2".to_string(), 7);
        t
    }

    #[test]
    fn a_single_label_reference_is_replaced_with_its_address() {
        assert_eq!(resolve_line("JUMP <L1>", &table()).unwrap(), "JUMP 4");
    }

    #[test]
    fn two_label_references_in_one_line_both_resolve() {
        assert_eq!(resolve_line("JMPZ <L2> t1", &table()).unwrap(), "JMPZ 7 t1");
    }

    #[test]
    fn a_line_with_no_label_reference_passes_through_unchanged() {
        assert_eq!(resolve_line("IADD c a b", &table()).unwrap(), "IADD c a b");
    }

    #[test]
    fn an_unknown_label_is_an_error() {
        assert!(resolve_line("JUMP <Lmissing>", &table()).is_err());
    }
}
