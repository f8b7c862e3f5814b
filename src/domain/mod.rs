// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the data
// preparation vocabulary: sentence pairs, splits, tokenizer
// families, vocabulary sizes and the errors a stage can raise.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO tokenizers crate types allowed here
//   - NO file I/O
//
// Everything here can be unit tested without touching disk.

// Raw and selected sentence pairs
pub mod sentence_pair;

// Tokenizer families, vocabulary sizes and dataset splits
pub mod family;

// Precondition failures shared by every stage
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
