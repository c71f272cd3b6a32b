pub mod analyze;
pub mod export;
pub mod init;
pub mod range;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure default range, period and output")]
    Init(init::InitArgs),
    #[command(about = "Compute availability for one asset")]
    Analyze(analyze::AnalyzeArgs),
    #[command(about = "Export an availability report to CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Show the window a preset resolves to")]
    Range(range::RangeArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Analyze(args) => analyze::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Range(args) => range::cmd(args),
        }
    }
}
