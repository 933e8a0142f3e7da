//! tree-ai CLI Binary
//!
//! Prints the directory tree for ROOT with a description per entry.

use clap::Parser;
use std::process;
use tree_ai::logging::init_logging;
use tree_ai::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(
        Some(&context.config().logging),
        cli.log_file.clone(),
        Some(context.root()),
    ) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = context.run(&mut out) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
