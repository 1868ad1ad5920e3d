//! CLI entry point for generating, inspecting and editing square grid maps

use clap::Parser;
use squaregrid::io::cli::{Cli, MapCommandProcessor};
use squaregrid::io::logging::init_logging;

fn main() -> squaregrid::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let mut processor = MapCommandProcessor::new(cli);
    processor.process()
}
