// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
//
//   1. `setup`   — select, split, train tokenizers
//   2. `preview` — walk the data loader over one split

pub mod commands;

use anyhow::{ensure, Result};
use clap::Parser;
use commands::{Commands, PreviewArgs, SetupArgs};

#[derive(Parser, Debug)]
#[command(
    name = "nmt-prep",
    version,
    about = "Prepare WMT14 en-de data, train tokenizers and preview batches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Setup(args)   => run_setup(args),
            Commands::Preview(args) => run_preview(args),
        }
    }
}

fn run_setup(args: SetupArgs) -> Result<()> {
    use crate::application::setup_use_case::SetupUseCase;

    tracing::info!("Starting setup from raw pairs in: {}", args.raw_pairs.display());

    let report = SetupUseCase::new(args.into()).execute()?;

    println!("Selected {} pairs.", report.selected);
    for path in &report.artifacts {
        println!("Saved tokenizer: {}", path.display());
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    use crate::application::preview_use_case::PreviewUseCase;

    ensure!(args.batch_size > 0, "--batch-size must be at least 1");

    let report = PreviewUseCase::new(args.into()).execute()?;
    println!(
        "{} batches, {} samples, longest src {}, longest trg {}",
        report.batches, report.samples, report.max_src_len, report.max_trg_len
    );
    Ok(())
}
