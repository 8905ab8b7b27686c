use std::path::PathBuf;

use clap::Parser;
use log::info;

use tissue_optics::config::{Config, ModelSelection};
use tissue_optics::export::{StackReport, build_reports, write_json};
use tissue_optics::iop::SpectralTables;

#[derive(Parser, Debug)]
#[command(about = "Optical coefficients of layered skin models for Monte Carlo transport")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wavelength in nm, repeatable; overrides the configuration
    #[arg(short, long)]
    wavelength: Vec<f64>,

    /// Tissue model(s) to assemble; overrides the configuration
    #[arg(short, long, value_enum)]
    model: Option<ModelSelection>,

    /// Write the stacks as JSON instead of printing them
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn print_report(report: &StackReport) {
    println!("{} at {} nm", report.model, report.wavelength);
    println!(
        "  {:<20} {:>6} {:>8} {:>10} {:>10} {:>6}",
        "layer", "n", "d [mm]", "mu_a", "mu_s", "g"
    );
    for layer in report.stack.layers() {
        println!(
            "  {:<20} {:>6.3} {:>8.3} {:>10.5} {:>10.4} {:>6.2}",
            layer.name,
            layer.n,
            layer.d,
            layer.mu_a,
            layer.mu_s,
            layer.g()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if !cli.wavelength.is_empty() {
        config = config.with_wavelengths(cli.wavelength.clone())?;
    }
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    let tables = SpectralTables::literature()?;
    info!(
        "Assembling {:?} model(s) at {} wavelength(s)",
        config.model(),
        config.wavelengths().len()
    );

    let reports = build_reports(&config, &tables);

    match &cli.output {
        Some(path) => write_json(path, &reports)?,
        None => reports.iter().for_each(print_report),
    }

    Ok(())
}
