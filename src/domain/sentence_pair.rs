// ============================================================
// Layer 3 — Sentence Pair Domain Types
// ============================================================
// Two shapes of the same thing:
//
//   RawPair      — one record of the parallel corpus as it
//                  arrives from the source stream (`en`, `de`)
//
//   SentencePair — a pair that passed selection, lower-cased,
//                  stored as `{x, y}` in every split file
//
// The split files and the sample source share SentencePair,
// so the schema written is the schema read. Older split files
// that used `src`/`trg` still load through the serde aliases.

use serde::{Deserialize, Serialize};

/// One untouched record from the raw translation stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    pub en: String,
    pub de: String,
}

impl RawPair {
    pub fn new(en: impl Into<String>, de: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            de: de.into(),
        }
    }
}

/// A selected, lower-cased source/target pair.
///
/// `x` is the English source, `y` the German target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    #[serde(alias = "src")]
    pub x: String,

    #[serde(alias = "trg")]
    pub y: String,
}

impl SentencePair {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Lower-case both sides of a raw record.
    pub fn from_raw(raw: &RawPair) -> Self {
        Self::new(raw.en.to_lowercase(), raw.de.to_lowercase())
    }

    /// Character lengths of `(x, y)`, counted in Unicode scalar values.
    pub fn char_lens(&self) -> (usize, usize) {
        (self.x.chars().count(), self.y.chars().count())
    }
}
