use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mooring-stats")]
#[command(about = "Current speed, salinity and temperature statistics from ERDDAP mooring data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a dataset from an ERDDAP server and print its statistics
    Fetch {
        #[arg(long, help = "Full tabledap request URL (overrides --dataset/--start/--end)")]
        url: Option<String>,

        #[arg(long, help = "tabledap endpoint [default: NERACOOS]")]
        base_url: Option<String>,

        #[arg(short, long, help = "Dataset id [default: E05_aanderaa_all]")]
        dataset: Option<String>,

        #[arg(long, help = "Start of the time range (RFC 3339)")]
        start: Option<String>,

        #[arg(long, help = "End of the time range (RFC 3339)")]
        end: Option<String>,

        #[arg(short, long, help = "Request timeout in seconds [default: 10]")]
        timeout_secs: Option<u64>,

        #[arg(short, long, help = "Write the JSON summary here instead of stdout")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Pretty-print the JSON summary")]
        pretty: bool,

        #[arg(long, help = "Aggregation policy: legacy or corrected [default: legacy]")]
        policy: Option<String>,
    },

    /// Compute statistics from a tabledap JSON document on disk
    Process {
        #[arg(short, long, help = "Input tabledap JSON file")]
        input_file: PathBuf,

        #[arg(short, long, help = "Write the JSON summary here instead of stdout")]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Pretty-print the JSON summary")]
        pretty: bool,

        #[arg(long, help = "Aggregation policy: legacy or corrected [default: legacy]")]
        policy: Option<String>,
    },

    /// Decode a tabledap JSON document and report QC flag counts
    Validate {
        #[arg(short, long, help = "Input tabledap JSON file")]
        input_file: PathBuf,
    },
}
