//! CLI entry point for the annealing tile generator

use annealtile::io::cli::{Cli, TileRunner};
use clap::Parser;

fn main() -> annealtile::Result<()> {
    let cli = Cli::parse();
    TileRunner::new(cli).run()?;
    Ok(())
}
