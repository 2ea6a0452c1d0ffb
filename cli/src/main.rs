mod cli;
mod commands;
mod job;

use cli::{Cli, Commands};
use commands::{buildings, impact_map};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Buildings(args) => buildings::run(&cli, args),
        Commands::ImpactMap(args) => impact_map::run(&cli, args),
    }
}

/// Default filter from the verbosity count; `RUST_LOG` still wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> { run() }
