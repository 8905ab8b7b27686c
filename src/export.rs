//! Stack reports for downstream transport simulations

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::iop::SpectralTables;
use crate::tissue::{TissueModel, TissueStack, assemble};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An assembled stack tagged with the model it was built from
#[derive(Debug, Clone, Serialize)]
pub struct StackReport {
    pub model: TissueModel,
    pub wavelength: f64,
    pub stack: TissueStack,
}

/// Assembles every (model, wavelength) pair requested by `config`, model by model
pub fn build_reports(config: &Config, tables: &SpectralTables) -> Vec<StackReport> {
    for &wl in config.wavelengths() {
        tables.check_coverage(wl);
    }

    config
        .model()
        .models()
        .iter()
        .flat_map(|&model| {
            let catalog = model.catalog(config.catalog(), config.hemangioma());
            config
                .wavelengths()
                .iter()
                .map(|&wavelength| StackReport {
                    model,
                    wavelength,
                    stack: assemble(&catalog, wavelength, config.params(), tables),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn write_json<P: AsRef<Path>>(path: P, reports: &[StackReport]) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, reports)?;
    writer.flush()?;

    info!(
        "Wrote {} stacks to {}",
        reports.len(),
        path.as_ref().display()
    );

    Ok(())
}
