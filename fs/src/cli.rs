//! CLI argument parsing for framesched

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fs")]
#[command(author, version, about = "Frame-driven callback scheduler", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the configured timers in a frame loop
    Run {
        /// Frames per second (default: from config)
        #[arg(short, long)]
        fps: Option<f64>,

        /// Seconds to run (default: from config)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Advance a simulated clock instead of sleeping
        #[arg(short, long)]
        simulate: bool,

        /// Max random extra frame time in simulation, in milliseconds
        #[arg(short, long)]
        jitter_ms: Option<f64>,

        /// Sleep until the next due item instead of every frame
        #[arg(long)]
        lazy: bool,
    },

    /// Show where soft scheduling places repeating items
    Plan {
        /// Number of items
        #[arg(short = 'n', long, default_value = "16")]
        count: usize,

        /// Shared interval in seconds
        #[arg(short, long, default_value = "1.0")]
        interval: f64,
    },

    /// Print the effective configuration
    Config,
}
