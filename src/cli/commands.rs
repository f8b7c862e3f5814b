// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `setup` and `preview`, and
// their flags.
//
// Choices that have a fixed set of values (tokenizer type,
// vocabulary size, split, mode) are clap ValueEnums, so a
// typo is rejected while parsing, before any work begins.
//
// The `all` choices only exist here; they expand to lists of
// domain values when converted into application configs.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::{preview_use_case::PreviewConfig, setup_use_case::SetupConfig};
use crate::data::batcher::Mode;
use crate::domain::family::{Family, Split, VocabSize};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select pairs, write splits and train tokenizers
    Setup(SetupArgs),

    /// Load a split and walk the batch loader once
    Preview(PreviewArgs),
}

// ─── Value enums ──────────────────────────────────────────────────────────────
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizerArg {
    #[value(name = "all")]
    All,
    #[value(name = "WL")]
    Wl,
    #[value(name = "WP")]
    Wp,
    #[value(name = "BPE")]
    Bpe,
    #[value(name = "UNI")]
    Uni,
}

impl TokenizerArg {
    pub fn families(self) -> Vec<Family> {
        match self {
            TokenizerArg::All => Family::ALL.to_vec(),
            TokenizerArg::Wl  => vec![Family::WordLevel],
            TokenizerArg::Wp  => vec![Family::WordPiece],
            TokenizerArg::Bpe => vec![Family::Bpe],
            TokenizerArg::Uni => vec![Family::Unigram],
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VocabArg {
    #[value(name = "all")]
    All,
    #[value(name = "10k")]
    K10,
    #[value(name = "20k")]
    K20,
    #[value(name = "30k")]
    K30,
}

impl VocabArg {
    pub fn sizes(self) -> Vec<VocabSize> {
        match self {
            VocabArg::All => VocabSize::ALL.to_vec(),
            VocabArg::K10 => vec![VocabSize::K10],
            VocabArg::K20 => vec![VocabSize::K20],
            VocabArg::K30 => vec![VocabSize::K30],
        }
    }
}

/// A single family, for commands that load one artifact.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FamilyArg {
    #[value(name = "WL")]
    Wl,
    #[value(name = "WP")]
    Wp,
    #[value(name = "BPE")]
    Bpe,
    #[value(name = "UNI")]
    Uni,
}

impl From<FamilyArg> for Family {
    fn from(a: FamilyArg) -> Self {
        match a {
            FamilyArg::Wl  => Family::WordLevel,
            FamilyArg::Wp  => Family::WordPiece,
            FamilyArg::Bpe => Family::Bpe,
            FamilyArg::Uni => Family::Unigram,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeArg {
    #[value(name = "10k")]
    K10,
    #[value(name = "20k")]
    K20,
    #[value(name = "30k")]
    K30,
}

impl From<SizeArg> for VocabSize {
    fn from(a: SizeArg) -> Self {
        match a {
            SizeArg::K10 => VocabSize::K10,
            SizeArg::K20 => VocabSize::K20,
            SizeArg::K30 => VocabSize::K30,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitArg {
    Train,
    Valid,
    Test,
}

impl From<SplitArg> for Split {
    fn from(a: SplitArg) -> Self {
        match a {
            SplitArg::Train => Split::Train,
            SplitArg::Valid => Split::Valid,
            SplitArg::Test  => Split::Test,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Train,
    Eval,
}

impl From<ModeArg> for Mode {
    fn from(a: ModeArg) -> Self {
        match a {
            ModeArg::Train => Mode::Train,
            ModeArg::Eval  => Mode::Eval,
        }
    }
}

// ─── setup ────────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Tokenizer family to train, or `all`
    #[arg(long, value_enum, alias = "tokenizer_type")]
    pub tokenizer_type: TokenizerArg,

    /// Vocabulary size to train, or `all`
    #[arg(long, value_enum, alias = "vocab_size")]
    pub vocab_size: VocabArg,

    /// JSON Lines dump of the raw en/de pairs
    #[arg(long, default_value = "raw/wmt14_de_en_train.jsonl")]
    pub raw_pairs: PathBuf,

    /// Directory holding config.yaml, data/ and tokenizer/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Boundary between Layer 1 and Layer 2: the application layer
/// never sees clap types.
impl From<SetupArgs> for SetupConfig {
    fn from(a: SetupArgs) -> Self {
        SetupConfig {
            root:      a.root,
            raw_pairs: a.raw_pairs,
            families:  a.tokenizer_type.families(),
            sizes:     a.vocab_size.sizes(),
        }
    }
}

// ─── preview ──────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[arg(long, value_enum, default_value = "valid")]
    pub split: SplitArg,

    #[arg(long, value_enum, alias = "tokenizer_type")]
    pub tokenizer_type: FamilyArg,

    #[arg(long, value_enum, alias = "vocab_size")]
    pub vocab_size: SizeArg,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// `train` shuffles every epoch, `eval` keeps split order
    #[arg(long, value_enum, default_value = "eval")]
    pub mode: ModeArg,

    /// Pad id; defaults to the id of the configured pad token
    #[arg(long)]
    pub pad_id: Option<u32>,

    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl From<PreviewArgs> for PreviewConfig {
    fn from(a: PreviewArgs) -> Self {
        PreviewConfig {
            root:       a.root,
            split:      a.split.into(),
            family:     a.tokenizer_type.into(),
            size:       a.vocab_size.into(),
            batch_size: a.batch_size,
            mode:       a.mode.into(),
            pad_id:     a.pad_id,
        }
    }
}
