//! # dxf2gcode
//!
//! Converts the 3D polylines of a DXF drawing into G-code for an extruding
//! printer, centered on a configurable print area.
//!
//! ## Architecture
//!
//! dxf2gcode is organized as a workspace with multiple crates:
//!
//! 1. **dxf2gcode-core** - Points, polylines, bounding boxes, distance
//! 2. **dxf2gcode-camtools** - DXF import, centering, motion generation, conversion
//! 3. **dxf2gcode-settings** - Configuration files and defaults
//! 4. **dxf2gcode** - Command line binary that integrates all crates

pub mod cli;

pub use dxf2gcode_camtools::{
    ConversionParameters, ConversionReport, CurveKind, DxfImporter, MotionCommand,
    MotionGenerator, PolylineConverter, SourceEntity,
};
pub use dxf2gcode_core::{BoundingBox, Point3, Polyline};
pub use dxf2gcode_settings::Config;

use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only the conversion summary
/// - RUST_LOG environment variable support, taking precedence when set
/// - Otherwise a default level of WARN, raised by each `verbosity` step
/// - Optional JSON lines instead of human readable output
pub fn init_logging(verbosity: u8, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = log_filter(verbosity, rust_log.as_deref());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}

/// Filter from `RUST_LOG` directives when set and valid, else from `verbosity`
fn log_filter(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str()))
}
