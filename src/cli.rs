use crate::config::{ANALYZE_DELAY_ENV, Config};
use crate::core::Mode;
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bilidown")]
#[command(about = "BiliDown Ultra: turn bilibili links into BBDown commands")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Force CLI mode (skip TUI)
    #[arg(long)]
    pub cli: bool,

    /// Simulated link analysis latency in milliseconds
    #[arg(long, global = true, env = ANALYZE_DELAY_ENV, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the BBDown command for a link
    Command {
        /// bilibili link or BV/av/ep id (omit for the placeholder)
        url: Option<String>,
    },

    /// Analyze a link without the TUI and print the resulting session
    Analyze {
        /// bilibili link or BV/av/ep id
        url: String,

        /// Mode to switch to once analysis completes
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Print the session as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open TUI interface
    Tui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Download,
    Tutorial,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Download => Mode::Download,
            ModeArg::Tutorial => Mode::Tutorial,
        }
    }
}

impl Cli {
    pub fn config(&self) -> Config {
        let config = Config::default();
        match self.delay_ms {
            Some(ms) => config.with_analyze_delay(Duration::from_millis(ms)),
            None => config,
        }
    }

    pub fn wants_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}
