use anyhow::Result;
use begrens::{impact_map, ImpactGrid};
use log::info;
use serde::Serialize;

use crate::{commands::write_json, job::Job};

/// Grid as written to disk: rows from the top, values in metres.
#[derive(Serialize)]
struct GridOutput {
    origin: [f64; 2],
    cell_size: f64,
    width: usize,
    height: usize,
    nodata: f64,
    rows: Vec<Vec<f64>>,
}

impl From<&ImpactGrid> for GridOutput {
    fn from(grid: &ImpactGrid) -> Self {
        Self {
            origin: [grid.origin().x, grid.origin().y],
            cell_size: grid.cell_size(),
            width: grid.width(),
            height: grid.height(),
            nodata: grid.nodata(),
            rows: grid.data().rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ImpactMapArgs) -> Result<()> {
    info!("[impact-map] loading job from {}", args.job.display());
    let job = Job::read(&args.job)?;

    let sources = job.sources()?;
    let bedrock = job.bedrock()?;

    let mut grid = job.grid;
    if let Some(cell_size) = args.cell_size { grid.cell_size = cell_size }
    if let Some(margin) = args.margin { grid.margin = margin }

    info!("[impact-map] {} m cells, {} m margin", grid.cell_size, grid.margin);
    let result = impact_map(&sources, &job.config, &grid, bedrock.as_ref())?;

    write_json(&GridOutput::from(&result), args.output.as_deref())
}
