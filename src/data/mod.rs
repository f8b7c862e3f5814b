// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw translation dump to tensor batches.
//
//   raw.jsonl
//       │
//       ▼
//   JsonlPairSource     → streams {en, de} records lazily
//       │
//       ▼
//   Selector            → length filters, volume cap,
//       │                 writes data/corpus.txt
//       ▼
//   split_pairs         → train / valid / test tail slices,
//       │                 writes data/{split}.json
//       ▼
//   (tokenizer training happens in infra::tokenizer_store)
//       │
//       ▼
//   TranslationDataset  → Burn Dataset, encodes on access
//       │
//       ▼
//   BatchChunks         → runs of batch_size samples
//       │
//       ▼
//   TranslationBatcher  → per-batch right padding
//       │
//       ▼
//   TranslationLoader   → shuffled (train) or ordered batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Streams raw pairs from a JSON Lines file
pub mod source;

/// Length-based pair selection and corpus output
pub mod selector;

/// Tail-offset train/valid/test split
pub mod splitter;

/// Burn Dataset over one split
pub mod dataset;

/// Burn Batcher with per-batch padding, and the loader builder
pub mod batcher;
