// ⚙️ CLI Configuration - flags, env overrides and subcommands

use crate::export::ExportFormat;
use crate::speech::DEFAULT_RATE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "vocab_data.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "code-vocab", version, about = "Programming vocabulary study aid")]
pub struct Cli {
    /// Snapshot file holding entries and categories
    #[arg(long, env = "VOCAB_DATA_FILE", default_value = DEFAULT_DATA_FILE, global = true)]
    pub data_file: PathBuf,

    /// Disable text-to-speech even if a synthesizer is installed
    #[arg(long, global = true)]
    pub no_speech: bool,

    /// Speaking rate in words per minute
    #[arg(long, env = "VOCAB_SPEECH_RATE", default_value_t = DEFAULT_RATE, global = true)]
    pub speech_rate: u32,

    /// Log filter (e.g. "warn", "code_vocab=debug"); RUST_LOG takes precedence
    #[arg(long, env = "VOCAB_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive text menu (default)
    Menu,

    /// Full-screen browser
    #[cfg(feature = "tui")]
    Tui,

    /// Write the sample vocabulary to the data file
    Seed {
        /// Overwrite existing entries
        #[arg(long)]
        force: bool,
    },

    /// Export all entries
    Export {
        #[arg(long, short, value_enum, default_value_t = ExportFormat::Md)]
        format: ExportFormat,

        /// Output path; defaults to code_vocab_<date>.<ext>
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace all data with a snapshot file
    Import {
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Entry counts per category
    Stats,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}
