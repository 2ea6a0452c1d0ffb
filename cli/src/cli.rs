use std::path::PathBuf;

/// Settlement and building risk CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "begrens", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Settlement, inclination and risk for every building in a job
    Buildings(BuildingsArgs),

    /// Total settlement over a regular grid around the sources
    ImpactMap(ImpactMapArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildingsArgs {
    /// Job file (JSON) with sources, buildings, parameters and optional bedrock raster
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub job: PathBuf,

    /// Output records file (JSON), defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ImpactMapArgs {
    /// Job file (JSON) with sources, parameters and optional bedrock raster
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub job: PathBuf,

    /// Output grid file (JSON), defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Cell size in metres, overrides the job file
    #[arg(long)]
    pub cell_size: Option<f64>,

    /// Margin around the sources in metres, overrides the job file
    #[arg(long)]
    pub margin: Option<f64>,
}
