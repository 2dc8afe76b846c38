pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cell-factory")]
#[command(about = "Run encapsulated counters from the command line or a scenario file")]
pub struct CliConfig {
    /// Path to a TOML scenario file; ad-hoc mode is used when omitted
    #[arg(short, long)]
    pub scenario: Option<String>,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub initial: i64,

    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub step: i64,

    #[arg(long, default_value = "1")]
    pub times: usize,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
