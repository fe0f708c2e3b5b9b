use thiserror::Error;

/// Label resolution walks exactly the labels `quadc-mir` registered
/// when it emitted each `Jump`/`CondBr`, so `UnknownLabel` should never
/// actually fire; it exists for the same taxonomic reason as
/// `quadc_lir::BackendError` — spec.md §7 names a fixed error kind per
/// stage and this is `quadc-gen`'s. `Io` covers the output stream
/// itself failing (a full disk, a closed pipe), which is not one of
/// spec.md §7's four compile-error kinds but still needs a place to
/// live on this crate's fallible `generate`.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("reference to undefined label '{label}'")]
    UnknownLabel { label: String },
    #[error("writing output: {0}")]
    Io(#[from] std::io::Error),
}
