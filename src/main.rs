//! CLI entry point for the halftone stamp renderer

use clap::Parser;
use stampgrid::io::cli::{Cli, FileProcessor};
use stampgrid::io::logging;

fn main() -> stampgrid::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
