// ============================================================
// Layer 4 — Raw Pair Source
// ============================================================
// Streams raw translation records from a JSON Lines file, one
// record per line. Two record shapes are accepted:
//
//   {"en": "...", "de": "..."}                    — flat
//   {"translation": {"en": "...", "de": "..."}}   — Hugging Face
//                                                   datasets export
//
// The file is read lazily through a BufReader so selection can
// stop early without touching the rest of a large dump.
//
// Blank lines are skipped. A malformed line is an error that
// names the file and line number.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::domain::sentence_pair::RawPair;
use crate::domain::traits::{PairSource, PairStream};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Nested { translation: RawPair },
    Flat(RawPair),
}

impl From<RawRecord> for RawPair {
    fn from(record: RawRecord) -> Self {
        match record {
            RawRecord::Nested { translation } => translation,
            RawRecord::Flat(pair) => pair,
        }
    }
}

/// Reads raw pairs from a `.jsonl` file.
pub struct JsonlPairSource {
    path: PathBuf,
}

impl JsonlPairSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PairSource for JsonlPairSource {
    fn pairs(&self) -> Result<PairStream<'_>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open raw pairs '{}'", self.path.display()))?;

        tracing::info!("Streaming raw pairs from '{}'", self.path.display());

        let lines = BufReader::new(file).lines().enumerate();
        let stream = lines.filter_map(move |(idx, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    return Some(Err(anyhow::Error::new(e).context(format!(
                        "Cannot read line {} of '{}'",
                        idx + 1,
                        self.path.display()
                    ))))
                }
            };
            if line.trim().is_empty() {
                return None;
            }

            Some(
                serde_json::from_str::<RawRecord>(&line)
                    .map(RawPair::from)
                    .with_context(|| {
                        format!("Malformed record on line {} of '{}'", idx + 1, self.path.display())
                    }),
            )
        });

        Ok(Box::new(stream))
    }
}
