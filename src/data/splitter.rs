// ============================================================
// Layer 4 — Train/Valid/Test Splitter
// ============================================================
// Cuts the selected pairs into three slices by position from
// the end of the list:
//
//   [ ........ train ........ | ... valid (1000) ... | test (100) ]
//
// There is no shuffling here. The selection order is the
// order of the raw stream, and each slice keeps it.
//
// Tail slicing only makes sense when there is room for both
// tail slices and some training data. A non-empty selection
// smaller than that is refused instead of producing
// overlapping slices. An empty selection gives three empty
// splits.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::error::PrepError;
use crate::domain::family::Split;
use crate::domain::sentence_pair::SentencePair;

/// Sizes of the tail slices, and the smallest acceptable train slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub valid:     usize,
    pub test:      usize,
    pub min_train: usize,
}

impl Default for SplitSizes {
    fn default() -> Self {
        Self {
            valid:     1000,
            test:      100,
            min_train: 100,
        }
    }
}

impl SplitSizes {
    /// Smallest non-empty selection that can be split.
    pub fn required(&self) -> usize {
        self.valid + self.test + self.min_train
    }

    /// Whether `total` selected pairs can be split: zero, or at
    /// least `required()`.
    pub fn check(&self, total: usize) -> Result<(), PrepError> {
        if total != 0 && total < self.required() {
            return Err(PrepError::InsufficientPairs {
                have: total,
                need: self.required(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Splits {
    pub train: Vec<SentencePair>,
    pub valid: Vec<SentencePair>,
    pub test:  Vec<SentencePair>,
}

impl Splits {
    pub fn get(&self, split: Split) -> &[SentencePair] {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
            Split::Test  => &self.test,
        }
    }

    /// Write every split as a JSON list of `{x, y}` records.
    /// `path_for` maps a split to its file.
    pub fn save(&self, path_for: impl Fn(Split) -> std::path::PathBuf) -> Result<()> {
        for split in Split::ALL {
            save_split(&path_for(split), self.get(split))?;
        }
        Ok(())
    }
}

/// Partition `pairs` into train/valid/test by tail offsets.
pub fn split_pairs(mut pairs: Vec<SentencePair>, sizes: &SplitSizes) -> Result<Splits, PrepError> {
    let total = pairs.len();
    sizes.check(total)?;
    if total == 0 {
        return Ok(Splits::default());
    }

    // split_off(n) leaves [0..n) behind and returns [n..)
    let test  = pairs.split_off(total - sizes.test);
    let valid = pairs.split_off(total - sizes.test - sizes.valid);
    let train = pairs;

    tracing::debug!(
        "Dataset split: {} train, {} valid, {} test",
        train.len(),
        valid.len(),
        test.len(),
    );

    Ok(Splits { train, valid, test })
}

fn save_split(path: &Path, pairs: &[SentencePair]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create split directory '{}'", dir.display()))?;
    }

    let json = serde_json::to_string(pairs)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write split to '{}'", path.display()))?;

    tracing::info!("Saved {} pairs to '{}'", pairs.len(), path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(n: usize) -> Vec<SentencePair> {
        (0..n)
            .map(|i| SentencePair::new(format!("x{i}"), format!("y{i}")))
            .collect()
    }

    #[test]
    fn test_default_tail_sizes() {
        let splits = split_pairs(pairs(1500), &SplitSizes::default()).unwrap();
        assert_eq!(splits.train.len(), 400);
        assert_eq!(splits.valid.len(), 1000);
        assert_eq!(splits.test.len(),  100);
    }

    #[test]
    fn test_slices_partition_in_order() {
        let input  = pairs(1300);
        let splits = split_pairs(input.clone(), &SplitSizes::default()).unwrap();

        // Concatenating the slices gives back the input exactly
        let joined: Vec<SentencePair> = splits
            .train
            .iter()
            .chain(&splits.valid)
            .chain(&splits.test)
            .cloned()
            .collect();
        assert_eq!(joined, input);
        assert_eq!(splits.test[0].x, "x1200");
        assert_eq!(splits.valid[0].x, "x200");
    }

    #[test]
    fn test_empty_selection_gives_empty_splits() {
        let splits = split_pairs(Vec::new(), &SplitSizes::default()).unwrap();
        assert_eq!(splits, Splits::default());
    }

    #[test]
    fn test_too_few_pairs_rejected() {
        let err = split_pairs(pairs(1199), &SplitSizes::default()).unwrap_err();
        assert!(matches!(err, PrepError::InsufficientPairs { have: 1199, need: 1200 }));
    }

    #[test]
    fn test_check_accepts_empty_and_minimum() {
        let sizes = SplitSizes::default();
        assert!(sizes.check(0).is_ok());
        assert!(sizes.check(1200).is_ok());
        assert!(matches!(
            sizes.check(1),
            Err(PrepError::InsufficientPairs { have: 1, need: 1200 })
        ));
    }

    #[test]
    fn test_exact_minimum_accepted() {
        let sizes  = SplitSizes { valid: 3, test: 2, min_train: 1 };
        let splits = split_pairs(pairs(6), &sizes).unwrap();
        assert_eq!(
            (splits.train.len(), splits.valid.len(), splits.test.len()),
            (1, 3, 2)
        );
    }

    #[test]
    fn test_save_writes_each_split() {
        let dir    = tempfile::tempdir().unwrap();
        let sizes  = SplitSizes { valid: 2, test: 1, min_train: 1 };
        let splits = split_pairs(pairs(5), &sizes).unwrap();

        splits.save(|s| dir.path().join(format!("{s}.json"))).unwrap();

        let valid: Vec<SentencePair> = serde_json::from_str(
            &fs::read_to_string(dir.path().join("valid.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(valid, splits.valid);
        assert!(dir.path().join("train.json").exists());
        assert!(dir.path().join("test.json").exists());
    }
}
