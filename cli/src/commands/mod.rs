pub mod buildings;
pub mod impact_map;

use std::{fs::File, io::{self, BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

/// Write `value` as pretty JSON to `path`, or to stdout when no path is given.
pub(crate) fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush().with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
