//! Final emission (spec.md §4.3 pass 4): one resolved instruction per
//! line. `original_source/codegen.py`'s `_print_instructions` always
//! writes to stdout via a bare `print`; this writes through a `Write`
//! so `quadc-drv` can honor the `-o` flag (spec.md §6).

use std::io::{self, Write};

pub fn emit<W: Write>(lines: &[String], out: &mut W) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
