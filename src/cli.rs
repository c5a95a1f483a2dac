use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "alien_raid")]
#[command(about = "Shoot down descending alien rows before they slip past you")]
#[command(version)]
pub struct Args {
    /// Seed for a reproducible run (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// World width in game units
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// World height in game units
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Write tracing output to this file (RUST_LOG filters it)
    #[arg(long)]
    pub log: Option<PathBuf>,
}
