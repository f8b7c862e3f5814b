// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one command each.
//
// Rules for this layer:
//   - No clap types (the CLI converts its args first)
//   - No printing (that's Layer 1)
//   - Only workflow coordination

// select → split → train tokenizers
pub mod setup_use_case;

// load a split and walk the data loader once
pub mod preview_use_case;
