//! Single-block LZ77 + Huffman codec.
//!
//! A block is compressed independently of every other block: the matcher's
//! window never looks past the block start, and each block carries its own
//! pair of Huffman trees. [`compress_block`] always returns the Huffman
//! encoding even when it doesn't shrink the data; the container layer
//! decides whether to fall back to a stored block.

mod compress;
mod decompress;
mod types;

pub use compress::compress_block;
pub use decompress::decompress_block;
