// ============================================================
// Layer 6 — Workspace Layout
// ============================================================
// Every stage reads and writes fixed paths under one root:
//
//   {root}/
//     config.yaml
//     data/
//       corpus.txt
//       train.json  valid.json  test.json
//     tokenizer/
//       BPE/
//         BPE_10k.json
//       ...
//
// The relative layout is fixed. Only the root is configurable,
// which keeps tests inside temporary directories.

use std::path::PathBuf;

use crate::domain::family::{Family, Split, VocabSize};

#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn config(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn corpus(&self) -> PathBuf {
        self.data_dir().join("corpus.txt")
    }

    pub fn split(&self, split: Split) -> PathBuf {
        self.data_dir().join(format!("{split}.json"))
    }

    pub fn tokenizer_dir(&self, family: Family) -> PathBuf {
        self.root.join("tokenizer").join(family.tag())
    }

    /// `tokenizer/{family}/{family}_{size}.json`
    pub fn tokenizer(&self, family: Family, size: VocabSize) -> PathBuf {
        self.tokenizer_dir(family)
            .join(format!("{}_{}.json", family.tag(), size.label()))
    }
}
