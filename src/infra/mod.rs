// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting pieces used by more than one stage:
//
//   layout.rs          — The fixed on-disk layout under a root
//                        directory (corpus, splits, artifacts,
//                        config file).
//
//   config.rs          — Reads config.yaml once into PrepConfig
//                        (special tokens, selection thresholds).
//
//   tokenizer_store.rs — Trains the four tokenizer families,
//                        saves them as tokenizers JSON, loads
//                        them back for encoding.

/// Paths of every artifact
pub mod layout;

/// config.yaml parsing
pub mod config;

/// Tokenizer training, saving, and loading
pub mod tokenizer_store;
