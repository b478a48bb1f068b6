//! CLI entry point for the procedural art renderer

use clap::Parser;
use rasterart::io::cli::{Cli, EffectRunner};

fn main() -> rasterart::Result<()> {
    let cli = Cli::parse();
    let runner = EffectRunner::new(cli);
    runner.process()
}
