// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The selector only needs "something that yields raw pairs in
// order". Today that is a JSON Lines dump of WMT14; a database
// export or an in-memory fixture plug in the same way.

use anyhow::Result;

use crate::domain::sentence_pair::RawPair;

/// Lazy, ordered stream of raw parallel sentence pairs.
pub type PairStream<'a> = Box<dyn Iterator<Item = Result<RawPair>> + 'a>;

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Any component that can stream raw pairs.
///
/// Implementations:
///   - JsonlPairSource → reads a JSON Lines file
///
/// The stream must be lazy: selection stops pulling as soon as
/// it has enough pairs.
pub trait PairSource {
    fn pairs(&self) -> Result<PairStream<'_>>;
}
