//! Instruction selection: basic-block three-address IR → Quad mnemonic
//! text with unresolved `<label>` placeholders (spec.md §4.4). Label
//! resolution and final emission belong to `quadc-gen`.

pub mod error;
pub mod select;

pub use error::BackendError;
pub use select::{select_program, SelectedBlock};

use quadc_mir::BasicBlock;

/// Selects Quad mnemonics for every block in `blocks`, in order.
pub fn select(blocks: &[BasicBlock]) -> Vec<SelectedBlock> {
    select_program(blocks)
}
