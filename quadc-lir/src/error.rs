use thiserror::Error;

/// Instruction selection is total over every `Instr` variant `quadc-mir`
/// can produce, so this exists for the single case spec.md §7 still
/// calls out: an operand combination the Quad backend has no mapping
/// for (e.g. a future backend swap producing an opcode this one doesn't
/// know).
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("Quad back-end has no mapping for opcode '{opcode}'")]
    UnsupportedOpcode { opcode: String },
}
