//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// A drifting starfield for your terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to a config file instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for reproducible star placement.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Frames per second, overriding the config file.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,
}
