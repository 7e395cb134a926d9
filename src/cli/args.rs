//! Argument parsing for the `odz` binary.
//!
//! Two subcommands, matching the container format's two operations exactly:
//! `odz c <input> <output>` compresses, `odz d <input> <output>` decompresses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "odz", about = "Block-based LZ77 + Huffman byte compressor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress and ratio reporting on stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print extra diagnostic detail on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress `input` into `output`.
    C { input: PathBuf, output: PathBuf },
    /// Decompress `input` into `output`.
    D { input: PathBuf, output: PathBuf },
}

impl Cli {
    /// Resolves the effective display level from `--quiet`/`--verbose`.
    pub fn display_level(&self) -> u32 {
        if self.quiet {
            0
        } else if self.verbose {
            3
        } else {
            2
        }
    }
}
