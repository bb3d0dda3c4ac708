use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hevl-signals",
    version,
    about = "Hazard, exposure and return-period signal scan over HDX dataset metadata"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Scan(ScanArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    #[arg(long, default_value = "hdx_dataset_metadata_dump/dataset_metadata")]
    pub metadata_dir: PathBuf,

    #[arg(
        long,
        default_value = "hdx_dataset_metadata_dump/analysis/signal_analysis_results.json"
    )]
    pub output: PathBuf,

    /// Emit a progress event every N files; 0 disables progress events.
    #[arg(long, default_value_t = 5000)]
    pub progress_every: usize,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long, default_value_t = false)]
    pub show_text: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
