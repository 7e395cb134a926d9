//! Canonical length-limited prefix-code engine.
//!
//! Four cooperating pieces, in dependency order: [`lengths`] turns symbol
//! frequencies into length-limited code lengths; [`codes`] turns code
//! lengths into bit-reversed canonical codes; [`decode_table`] turns code
//! lengths into the two-level decode table the block decoder indexes by
//! peeked bits; [`trees`] serializes/deserializes a pair of length vectors
//! to and from the bitstream using the classical 3-level RLE encoding.

pub mod codes;
pub mod decode_table;
pub mod lengths;
pub mod trees;

pub use decode_table::{FlatTable, TwoLevelTable};
