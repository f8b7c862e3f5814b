// ============================================================
// Layer 6 — Configuration
// ============================================================
// `config.yaml` is read once, at the start of a command, and
// the resulting PrepConfig is passed by reference to every
// stage that needs it. Nothing re-reads the file later.
//
// Expected shape (unknown sections are ignored, so the same
// file can also hold model hyperparameters):
//
//   vocab:
//     pad_token: "[PAD]"
//     unk_token: "[UNK]"
//     bos_token: "[BOS]"
//     eos_token: "[EOS]"
//   select:            # optional, defaults shown
//     min_len: 10
//     max_len: 300
//     max_diff: 50
//     volume: 101100  # 0 keeps every qualifying pair

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::data::selector::SelectionConfig;
use crate::domain::error::PrepError;

/// The four reserved vocabulary entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VocabConfig {
    pub pad_token: String,
    pub unk_token: String,
    pub bos_token: String,
    pub eos_token: String,
}

impl VocabConfig {
    /// Special tokens in reserved-id order: pad, unk, bos, eos.
    pub fn special_tokens(&self) -> [&str; 4] {
        [
            self.pad_token.as_str(),
            self.unk_token.as_str(),
            self.bos_token.as_str(),
            self.eos_token.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrepConfig {
    pub vocab: VocabConfig,

    #[serde(default)]
    pub select: SelectionConfig,
}

impl PrepConfig {
    /// Load and parse the config file. A missing file is a
    /// precondition failure, not an I/O error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PrepError::MissingConfig(path.to_path_buf()).into());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        let config: PrepConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))?;

        tracing::debug!("Loaded config from '{}': {:?}", path.display(), config);
        Ok(config)
    }
}
