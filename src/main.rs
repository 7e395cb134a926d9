//! Binary entry point for the `odz` command-line tool.
//!
//! Parses a `c`/`d` subcommand, opens the input/output files, and drives the
//! streaming container codec with a progress callback gated by the display
//! level.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use clap::Parser;

use odz::cli::args::{Cli, Command};
use odz::cli::constants::set_display_level;
use odz::{compress, decompress};

fn print_progress(done: u64, total: u64) {
    let pct = if total > 0 {
        100.0 * done as f64 / total as f64
    } else {
        100.0
    };
    odz::displaylevel!(2, "\r  {} / {} bytes  ({:.1}%)", done, total, pct);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    set_display_level(cli.display_level());

    match cli.command {
        Command::C { input, output } => {
            let r = BufReader::new(File::open(&input)?);
            let w = BufWriter::new(File::create(&output)?);
            compress(r, w, print_progress)?;
        }
        Command::D { input, output } => {
            let r = BufReader::new(File::open(&input)?);
            let w = BufWriter::new(File::create(&output)?);
            decompress(r, w, print_progress)?;
        }
    }

    odz::displaylevel!(2, "\n");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("odz: error: {e}");
        std::process::exit(1);
    }
}
