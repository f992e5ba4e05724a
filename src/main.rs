use clap::Parser;
use dxf2gcode::cli::{render_summary, run, Cli};
use dxf2gcode::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json)?;

    let outcome = run(&cli)?;
    print!("{}", render_summary(&cli, &outcome)?);

    Ok(())
}
