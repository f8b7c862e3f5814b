// ============================================================
// Layer 4 — Corpus Selector
// ============================================================
// Walks the raw pair stream in order and keeps the pairs that
// make good training material:
//
//   min_len ≤ len(x) ≤ max_len
//   min_len ≤ len(y) ≤ max_len
//   |len(x) - len(y)| < max_diff
//
// Lengths are measured after lower-casing, in characters.
// Selection stops the moment `volume` pairs are kept, so a
// multi-million line dump is never read to the end. A volume
// of 0 disables the cap and keeps every qualifying pair.
//
// Every kept pair contributes two lines to the tokenizer
// corpus, source first:
//
//   x1
//   y1
//   x2
//   y2
//   ...

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::domain::sentence_pair::SentencePair;
use crate::domain::traits::PairStream;

/// Thresholds for pair selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub min_len:  usize,
    pub max_len:  usize,
    pub max_diff: usize,
    pub volume:   usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_len:  10,
            max_len:  300,
            max_diff: 50,
            // 100k train + 1k valid + 100 test
            volume:   101_100,
        }
    }
}

impl SelectionConfig {
    /// Whether a lower-cased pair satisfies every length condition.
    pub fn accepts(&self, pair: &SentencePair) -> bool {
        let (x_len, y_len) = pair.char_lens();
        let in_range = |len: usize| (self.min_len..=self.max_len).contains(&len);

        in_range(x_len) && in_range(y_len) && x_len.abs_diff(y_len) < self.max_diff
    }
}

/// The ordered pairs that survived selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub pairs: Vec<SentencePair>,
}

impl Selection {
    /// Corpus lines in `x1, y1, x2, y2, ...` order.
    pub fn corpus_lines(&self) -> impl Iterator<Item = &str> {
        self.pairs
            .iter()
            .flat_map(|p| [p.x.as_str(), p.y.as_str()])
    }

    /// Write the corpus lines newline-joined, without a trailing newline.
    pub fn write_corpus(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create corpus directory '{}'", dir.display()))?;
        }

        let text = self.corpus_lines().collect::<Vec<_>>().join("\n");
        fs::write(path, text)
            .with_context(|| format!("Cannot write corpus to '{}'", path.display()))?;

        tracing::info!(
            "Wrote {} corpus lines to '{}'",
            self.pairs.len() * 2,
            path.display()
        );
        Ok(())
    }
}

pub struct Selector {
    config: SelectionConfig,
}

impl Selector {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// Pull pairs from `stream` until `volume` are kept or the stream ends.
    /// A read error from the stream aborts selection.
    pub fn select(&self, stream: PairStream<'_>) -> Result<Selection> {
        let mut pairs = Vec::new();
        let mut seen  = 0usize;

        for raw in stream {
            let raw = raw?;
            seen += 1;

            let pair = SentencePair::from_raw(&raw);
            if !self.config.accepts(&pair) {
                continue;
            }

            pairs.push(pair);
            if pairs.len() == self.config.volume {
                break;
            }
        }

        tracing::info!(
            "Selected {} of {} scanned pairs (volume cap {})",
            pairs.len(),
            seen,
            self.config.volume
        );

        if self.config.volume != 0 && pairs.len() < self.config.volume {
            tracing::warn!(
                "Raw stream ended before reaching the volume cap ({} < {})",
                pairs.len(),
                self.config.volume
            );
        }

        Ok(Selection { pairs })
    }
}
