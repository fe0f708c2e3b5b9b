//! Basic blocks and the empty-block removal pass (spec.md §4.3, pass 1).

use crate::operand::Instr;

#[derive(Debug, Default)]
pub struct BasicBlock {
    /// Every label that now resolves to this block's start address.
    /// Usually at most one (the label it was created with); empty-block
    /// removal can merge several in when intervening blocks are dropped.
    pub labels: Vec<String>,
    pub instrs: Vec<Instr>,
}

impl BasicBlock {
    pub fn new() -> Self {
        BasicBlock::default()
    }
}

/// Walks blocks from last to first. A block with no instructions
/// contributes nothing to the output; any label it owned is handed to
/// the nearest surviving block that follows it, so jumps aimed at the
/// dropped block still land in the right place. The final block always
/// survives (lowering appends `Halt` before this pass runs), so there
/// is always a surviving block to redirect onto.
pub fn remove_empty_blocks(blocks: Vec<BasicBlock>) -> Vec<BasicBlock> {
    let mut result: Vec<BasicBlock> = Vec::with_capacity(blocks.len());
    for block in blocks.into_iter().rev() {
        if block.instrs.is_empty() {
            if let Some(surviving) = result.last_mut() {
                surviving.labels.extend(block.labels);
            }
            continue;
        }
        result.push(block);
    }
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Operand;
    use quadc_sem::Type;

    fn halt_block() -> BasicBlock {
        BasicBlock { labels: vec![], instrs: vec![Instr::Halt] }
    }

    #[test]
    fn an_empty_trailing_block_is_dropped() {
        let blocks = vec![halt_block(), BasicBlock::new()];
        let result = remove_empty_blocks(blocks);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn an_empty_labelled_block_hands_its_label_to_the_next_survivor() {
        let mut empty = BasicBlock::new();
        empty.labels.push("L1".to_string());
        let blocks = vec![
            empty,
            BasicBlock { labels: vec![], instrs: vec![Instr::Input { ty: Type::Int, var: "x".to_string() }] },
        ];
        let result = remove_empty_blocks(blocks);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].labels, vec!["L1".to_string()]);
    }

    #[test]
    fn a_nonempty_block_keeps_its_own_instructions() {
        let blocks = vec![BasicBlock {
            labels: vec![],
            instrs: vec![Instr::Output { ty: Type::Int, value: Operand::Name("x".to_string()) }],
        }];
        let result = remove_empty_blocks(blocks);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].instrs.len(), 1);
    }
}
