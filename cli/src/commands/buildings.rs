use anyhow::Result;
use begrens::analyze_buildings;
use log::info;

use crate::{commands::write_json, job::Job};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::BuildingsArgs) -> Result<()> {
    info!("[buildings] loading job from {}", args.job.display());
    let job = Job::read(&args.job)?;

    let sources = job.sources()?;
    let buildings = job.buildings();
    let bedrock = job.bedrock()?;
    info!("[buildings] {} {} sources, {} buildings", sources.len(), sources.kind().to_str(), buildings.len());

    let analysis = analyze_buildings(&sources, &buildings, &job.config, bedrock.as_ref())?;

    if let Some(path) = &args.output {
        info!("[buildings] writing records to {}", path.display());
    }
    write_json(&analysis, args.output.as_deref())
}
