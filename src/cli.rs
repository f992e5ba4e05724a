//! Command line front-end
//!
//! Resolves configuration (built-in defaults, then a config file, then
//! flags), reads the DXF input, and writes the G-code file.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dxf2gcode_camtools::{ConversionReport, DxfImporter, PolylineConverter};
use dxf2gcode_settings::Config;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser, Debug)]
#[command(name = "dxf2gcode")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Convert 3D DXF polylines into extrusion G-code", long_about = None)]
pub struct Cli {
    /// Input DXF file
    pub input: PathBuf,

    /// Extrusion per mm of travel
    #[arg(short = 'E', long = "extrusion")]
    pub extrusion: Option<f64>,

    /// Feed rate (mm/min); omitted from the output unless positive
    #[arg(short = 'F', long = "feed")]
    pub feed: Option<f64>,

    /// X of print area center
    #[arg(long = "center-x", allow_negative_numbers = true)]
    pub center_x: Option<f64>,

    /// Y of print area center
    #[arg(long = "center-y", allow_negative_numbers = true)]
    pub center_y: Option<f64>,

    /// Fraction digits in emitted numbers
    #[arg(long)]
    pub precision: Option<usize>,

    /// Output file (default: <input>.gcode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (.toml or .json); defaults to the platform config file if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Merge the flags over the loaded configuration
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load_default()
                .context("Failed to load default config")?
                .unwrap_or_default(),
        };

        let conversion = &mut config.conversion;
        if let Some(e) = self.extrusion {
            conversion.extrusion_per_unit = e;
        }
        if let Some(f) = self.feed {
            conversion.feed_rate = Some(f);
        }
        if let Some(x) = self.center_x {
            conversion.center_x = x;
        }
        if let Some(y) = self.center_y {
            conversion.center_y = y;
        }
        if let Some(p) = self.precision {
            conversion.precision = p;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Result of a successful run
#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub report: ConversionReport,
    pub config: Config,
}

/// Convert the input file and write the G-code file
///
/// The input is decoded before the output file is created, so a bad input
/// never leaves an empty output behind.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let config = cli.resolve_config()?;

    let entities = DxfImporter::from_file(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| config.output_path_for(&cli.input));
    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    let converter = PolylineConverter::new(config.conversion.clone());
    let report = converter
        .convert(entities, &mut writer)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!("G-code written to {}", output_path.display());

    Ok(RunOutcome {
        output_path,
        report,
        config,
    })
}

/// Render what the binary prints on stdout after a run
pub fn render_summary(cli: &Cli, outcome: &RunOutcome) -> Result<String> {
    let mut out = String::new();
    for notice in &outcome.report.notices {
        out.push_str(&format!("{}\n", notice));
    }
    out.push_str(&format!(
        "G-code written to {}\n",
        outcome.output_path.display()
    ));
    if cli.json {
        out.push_str(&outcome.report.to_json()?);
        out.push('\n');
    } else if outcome.config.output.print_summary {
        out.push_str(&format!("{}\n", outcome.report));
    }
    Ok(out)
}
