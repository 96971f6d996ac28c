use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "formforge")]
#[command(author, version, about = "File-format conversion automation tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a batch of files from the uploads directory
    Convert {
        /// File names to convert, relative to the uploads directory
        #[arg(required = true)]
        files: Vec<String>,

        /// Target extension (e.g. pdf, png, mp4)
        #[arg(short, long)]
        to: String,

        /// Force a specific backend instead of automatic selection
        #[arg(long)]
        backend: Option<String>,

        /// Directory holding the input files (overrides config)
        #[arg(long)]
        uploads_dir: Option<PathBuf>,

        /// Directory outputs are written to (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Job ID under which results are recorded (random if omitted)
        #[arg(long)]
        job_id: Option<Uuid>,
    },

    /// List reachable target formats for a source extension
    Targets {
        /// Source extension to query
        from: String,
    },

    /// List every registered backend with its inputs and targets
    Formats,

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
