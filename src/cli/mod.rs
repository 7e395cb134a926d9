//! Command-line surface: argument parsing and the two-subcommand dispatch
//! (`c` / `d`) that drives the core codec.

pub mod args;
pub mod constants;
