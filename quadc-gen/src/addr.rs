//! Address assignment (spec.md §4.3 pass 3, first half): every block
//! starts where the previous one's last instruction left off, the
//! first real instruction address being 1.

use quadc_lir::SelectedBlock;
use rustc_hash::FxHashMap;

/// Maps every label registered on any block to that block's start
/// address. A block can carry more than one label after empty-block
/// removal folded dropped blocks' labels onto it (`quadc_mir::block`).
pub fn assign_addresses(blocks: &[SelectedBlock]) -> FxHashMap<String, usize> {
    let mut table = FxHashMap::default();
    let mut address = 1usize;
    for block in blocks {
        for label in &block.labels {
            table.insert(label.clone(), address);
        }
        address += block.lines.len();
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(labels: &[&str], line_count: usize) -> SelectedBlock {
        SelectedBlock {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            lines: (0..line_count).map(|i| format!("NOP{i}")).collect(),
        }
    }

    #[test]
    fn first_block_starts_at_address_one() {
        let table = assign_addresses(&[block(&["L1"], 2)]);
        assert_eq!(table.get("L1"), Some(&1));
    }

    #[test]
    fn later_blocks_start_after_preceding_instruction_counts() {
        let table = assign_addresses(&[block(&[], 3), block(&["L2"], 1)]);
        assert_eq!(table.get("L2"), Some(&4));
    }

    #[test]
    fn a_block_can_carry_more_than_one_label() {
        let table = assign_addresses(&[block(&["L1", "L2"], 1)]);
        assert_eq!(table.get("L1"), Some(&1));
        assert_eq!(table.get("L2"), Some(&1));
    }
}
