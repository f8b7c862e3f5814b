// ============================================================
// Layer 3 — Precondition Errors
// ============================================================
// Failures that stop a stage before it produces anything.
// I/O and parse errors are not listed here; they travel as
// anyhow errors with file context attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    /// Tokenizer training needs the corpus written by selection.
    #[error("corpus file '{}' does not exist; run selection first", .0.display())]
    MissingCorpus(PathBuf),

    /// Special tokens come from the config file.
    #[error("config file '{}' does not exist", .0.display())]
    MissingConfig(PathBuf),

    /// Tail slicing needs room for the valid and test slices plus a
    /// minimum training slice.
    #[error("cannot split {have} pairs: at least {need} are required (valid + test + minimum train)")]
    InsufficientPairs { have: usize, need: usize },

    /// A trained tokenizer does not know one of the configured special tokens.
    #[error("special token '{0}' is not in the tokenizer vocabulary")]
    MissingSpecialToken(String),
}
