//! Display-level infrastructure shared by the CLI.
//!
//! Mirrors the verbosity-gated `DISPLAYLEVEL`-style stderr logging found in
//! classic command-line compressors: a single global level controls how much
//! progress and diagnostic chatter the binary prints, while the library core
//! never writes to stderr itself.

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "odz";

/// 0 = silent; 1 = errors only; 2 = normal; 3 = verbose.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
