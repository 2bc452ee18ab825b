// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::ExportOptions;
use crate::csv::write_row;
use crate::error::ScrapeError;
use crate::store::DataSet;

/// Write the whole dataset to `export.out_path`, replacing any existing file.
/// Returns the path written to.
pub fn write_export(export: &ExportOptions, data: &DataSet) -> Result<PathBuf, ScrapeError> {
    let path = export.out_path.clone();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let io_err = |e| ScrapeError::io(&path, e);
    let file = File::create(&path).map_err(io_err)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    let sep = export.delim();

    if let Some(h) = &data.headers {
        write_row(&mut out, h, sep, export.quote).map_err(io_err)?;
    }
    for row in &data.rows {
        write_row(&mut out, row, sep, export.quote).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    info!(path = %path.display(), rows = data.len(), "export written");
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Config(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
    }
    Ok(())
}
