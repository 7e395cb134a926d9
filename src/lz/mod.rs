//! LZ77 hash-chain matcher.

pub mod matcher;

pub use matcher::Matcher;
