//! Label resolution and final emission (spec.md §4.3 passes 3-4):
//! the last two stages of the pipeline, turning a backend's selected
//! blocks into the flat, fully-resolved instruction text `quadc-drv`
//! writes out.

pub mod addr;
pub mod emit;
pub mod error;
pub mod resolve;

pub use error::GenError;

use quadc_lir::SelectedBlock;
use std::io::Write;

/// Resolves every block's instructions into the final flat line list,
/// in block order, addresses and `<label>` references fully resolved.
pub fn resolve_program(blocks: &[SelectedBlock]) -> Result<Vec<String>, GenError> {
    let table = addr::assign_addresses(blocks);
    blocks.iter().flat_map(|block| &block.lines).map(|line| resolve::resolve_line(line, &table)).collect()
}

/// Resolves `blocks` and writes the result to `out`, one instruction
/// per line.
pub fn generate<W: Write>(blocks: &[SelectedBlock], out: &mut W) -> Result<(), GenError> {
    let lines = resolve_program(blocks)?;
    emit::emit(&lines, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(labels: &[&str], lines: &[&str]) -> SelectedBlock {
        SelectedBlock { labels: labels.iter().map(|s| s.to_string()).collect(), lines: lines.iter().map(|s| s.to_string()).collect() }
    }

    #[test]
    fn minimal_program_resolves_to_just_halt() {
        let blocks = vec![block(&[], &["HALT"])];
        assert_eq!(resolve_program(&blocks).unwrap(), vec!["HALT".to_string()]);
    }

    #[test]
    fn forward_jump_resolves_to_the_target_blocks_address() {
        let blocks = vec![block(&[], &["JUMP <Lend>"]), block(&["Lend"], &["HALT"])];
        assert_eq!(resolve_program(&blocks).unwrap(), vec!["JUMP 2".to_string(), "HALT".to_string()]);
    }

    #[test]
    fn generate_writes_through_to_the_given_sink() {
        let blocks = vec![block(&[], &["HALT"])];
        let mut buf = Vec::new();
        generate(&blocks, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "HALT\n");
    }
}
