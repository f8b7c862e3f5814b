// ============================================================
// Layer 2 — SetupUseCase
// ============================================================
// Runs the offline preparation in order:
//
//   Step 1: Load config.yaml          (Layer 6 - infra)
//   Step 2: Select pairs, size check  (Layer 4 - data)
//   Step 3: Write corpus, split, save (Layer 4 - data)
//   Step 4: Train tokenizers          (Layer 6 - infra)
//
// Config is read and the selection size checked before anything
// is written, so a refused run leaves no partial artifacts. Each step writes its artifacts once;
// the first error ends the run.

use anyhow::Result;
use std::path::PathBuf;

use crate::data::{
    selector::Selector,
    source::JsonlPairSource,
    splitter::{split_pairs, SplitSizes},
};
use crate::domain::family::{Family, VocabSize};
use crate::domain::traits::PairSource;
use crate::infra::{config::PrepConfig, layout::Layout, tokenizer_store::TokenizerStore};

#[derive(Debug, Clone)]
pub struct SetupConfig {
    pub root:      PathBuf,
    pub raw_pairs: PathBuf,
    pub families:  Vec<Family>,
    pub sizes:     Vec<VocabSize>,
}

/// What a setup run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub selected:  usize,
    pub artifacts: Vec<PathBuf>,
}

/// Every `(family, size)` combination, family-major.
pub fn training_plan(families: &[Family], sizes: &[VocabSize]) -> Vec<(Family, VocabSize)> {
    families
        .iter()
        .flat_map(|&f| sizes.iter().map(move |&s| (f, s)))
        .collect()
}

pub struct SetupUseCase {
    config: SetupConfig,
}

impl SetupUseCase {
    pub fn new(config: SetupConfig) -> Self {
        Self { config }
    }

    /// Run against the configured JSON Lines dump.
    pub fn execute(&self) -> Result<SetupReport> {
        let source = JsonlPairSource::new(&self.config.raw_pairs);
        self.execute_with(&source)
    }

    /// Run against any pair source.
    pub fn execute_with(&self, source: &dyn PairSource) -> Result<SetupReport> {
        let cfg    = &self.config;
        let layout = Layout::new(&cfg.root);

        // ── Step 1: Config ───────────────────────────────────────────────────
        let prep = PrepConfig::load(&layout.config())?;

        // ── Step 2: Select ───────────────────────────────────────────────────
        let sizes     = SplitSizes::default();
        let selection = Selector::new(prep.select).select(source.pairs()?)?;
        let selected  = selection.pairs.len();
        sizes.check(selected)?;

        // ── Step 3: Corpus and split ─────────────────────────────────────────
        selection.write_corpus(&layout.corpus())?;
        let splits = split_pairs(selection.pairs, &sizes)?;
        splits.save(|split| layout.split(split))?;

        // ── Step 4: Train tokenizers ─────────────────────────────────────────
        let plan = training_plan(&cfg.families, &cfg.sizes);
        tracing::info!("Training {} tokenizer(s)", plan.len());

        let store     = TokenizerStore::new(layout.clone());
        let artifacts = plan
            .into_iter()
            .map(|(family, size)| store.train(family, size, &prep.vocab))
            .collect::<Result<Vec<_>>>()?;

        Ok(SetupReport { selected, artifacts })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PrepError;
    use crate::domain::family::Split;
    use crate::domain::sentence_pair::{RawPair, SentencePair};
    use crate::domain::traits::PairStream;
    use std::fs;

    struct VecSource(Vec<RawPair>);

    impl PairSource for VecSource {
        fn pairs(&self) -> Result<PairStream<'_>> {
            Ok(Box::new(self.0.clone().into_iter().map(Ok::<_, anyhow::Error>)))
        }
    }

    const CONFIG: &str = "\
vocab:
  pad_token: '[PAD]'
  unk_token: '[UNK]'
  bos_token: '[BOS]'
  eos_token: '[EOS]'
";

    fn setup(root: &std::path::Path, families: Vec<Family>, sizes: Vec<VocabSize>) -> SetupUseCase {
        SetupUseCase::new(SetupConfig {
            root:      root.to_path_buf(),
            raw_pairs: root.join("raw.jsonl"),
            families,
            sizes,
        })
    }

    fn read_split(layout: &Layout, split: Split) -> Vec<SentencePair> {
        serde_json::from_str(&fs::read_to_string(layout.split(split)).unwrap()).unwrap()
    }

    #[test]
    fn test_training_plan_is_cartesian() {
        let plan = training_plan(&Family::ALL, &VocabSize::ALL);
        assert_eq!(plan.len(), 12);
        assert_eq!(plan[0], (Family::WordLevel, VocabSize::K10));
        assert_eq!(plan[11], (Family::Unigram, VocabSize::K30));

        let single = training_plan(&[Family::Bpe], &VocabSize::ALL);
        assert_eq!(single.len(), 3);
    }

    #[test]
    fn test_missing_config_stops_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let err = setup(dir.path(), vec![], vec![])
            .execute_with(&VecSource(vec![]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::MissingConfig(_))
        ));
        assert!(!Layout::new(dir.path()).corpus().exists());
    }

    #[test]
    fn test_all_short_pairs_give_empty_outputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), CONFIG).unwrap();

        let report = setup(dir.path(), vec![], vec![])
            .execute_with(&VecSource(vec![RawPair::new("short", "kurz")]))
            .unwrap();
        assert_eq!(report.selected, 0);

        let layout = Layout::new(dir.path());
        assert_eq!(fs::read_to_string(layout.corpus()).unwrap(), "");
        for split in Split::ALL {
            assert!(read_split(&layout, split).is_empty());
        }
    }

    #[test]
    fn test_end_to_end_select_split_train() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), CONFIG).unwrap();

        let raw: Vec<RawPair> = (0..1300)
            .map(|i| RawPair::new(format!("The house number {i}"), format!("Das Haus Nummer {i}")))
            .collect();
        let report = setup(dir.path(), vec![Family::WordLevel], vec![VocabSize::K10])
            .execute_with(&VecSource(raw))
            .unwrap();

        let layout = Layout::new(dir.path());
        assert_eq!(report.selected, 1300);
        assert_eq!(
            report.artifacts,
            vec![layout.tokenizer(Family::WordLevel, VocabSize::K10)]
        );
        assert!(report.artifacts[0].exists());

        let corpus = fs::read_to_string(layout.corpus()).unwrap();
        assert_eq!(corpus.lines().count(), 2600);
        assert_eq!(corpus.lines().next(), Some("the house number 0"));

        assert_eq!(read_split(&layout, Split::Train).len(), 200);
        assert_eq!(read_split(&layout, Split::Valid).len(), 1000);
        let test = read_split(&layout, Split::Test);
        assert_eq!(test.len(), 100);
        assert_eq!(test[0], SentencePair::new("the house number 1200", "das haus nummer 1200"));
    }

    #[test]
    fn test_small_selection_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), CONFIG).unwrap();

        let raw: Vec<RawPair> = (0..50)
            .map(|i| RawPair::new(format!("The house number {i}"), format!("Das Haus Nummer {i}")))
            .collect();
        let err = setup(dir.path(), vec![], vec![])
            .execute_with(&VecSource(raw))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::InsufficientPairs { have: 50, .. })
        ));
        let layout = Layout::new(dir.path());
        assert!(!layout.corpus().exists());
        assert!(!layout.split(Split::Train).exists());
    }
}
