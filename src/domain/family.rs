// ============================================================
// Layer 3 — Tokenizer Families, Vocabulary Sizes, Splits
// ============================================================
// Closed sets of values that the rest of the pipeline matches
// on exhaustively. A family or size that is not listed here
// cannot be asked for, so there is no "unsupported family"
// branch anywhere downstream.
//
// The short tags (WL, BPE, WP, UNI) and size labels (10k ...)
// are part of the on-disk artifact names:
//
//   tokenizer/BPE/BPE_10k.json

use std::fmt;

/// One of the four tokenizer algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    WordLevel,
    WordPiece,
    Bpe,
    Unigram,
}

impl Family {
    /// Every family, in the order `all` trains them.
    pub const ALL: [Family; 4] = [
        Family::WordLevel,
        Family::WordPiece,
        Family::Bpe,
        Family::Unigram,
    ];

    /// Short tag used in directory and file names.
    pub fn tag(self) -> &'static str {
        match self {
            Family::WordLevel => "WL",
            Family::WordPiece => "WP",
            Family::Bpe       => "BPE",
            Family::Unigram   => "UNI",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Target vocabulary size of a trained tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabSize {
    K10,
    K20,
    K30,
}

impl VocabSize {
    pub const ALL: [VocabSize; 3] = [VocabSize::K10, VocabSize::K20, VocabSize::K30];

    /// Label used in artifact file names, e.g. `10k`.
    pub fn label(self) -> &'static str {
        match self {
            VocabSize::K10 => "10k",
            VocabSize::K20 => "20k",
            VocabSize::K30 => "30k",
        }
    }

    /// Number of vocabulary entries the trainer aims for.
    pub fn tokens(self) -> usize {
        let thousands = match self {
            VocabSize::K10 => 10,
            VocabSize::K20 => 20,
            VocabSize::K30 => 30,
        };
        thousands * 1000
    }
}

impl fmt::Display for VocabSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named partition of the selected pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test  => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
