use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spotcheck", version, about = "Spotcheck report summaries and mismatch counts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP report API
    Serve(ServeArgs),
    /// Print report summaries
    Summary(SummaryArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Report file or directory of *.json report files [default: ./data/reports]
    #[arg(long)]
    pub reports: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct SummaryArgs {
    /// Report file or directory of *.json report files [default: ./data/reports]
    #[arg(long)]
    pub reports: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Show the report generated at this time (e.g. 2015-03-02T10:15:30)
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub at: Option<String>,

    /// List reports from this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// List reports up to this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
