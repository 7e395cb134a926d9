//! Compile-time tuning constants for the codec core.
//!
//! Named here rather than scattered as magic numbers through `block`, `lz`,
//! and `huffman`; all are load-bearing parts of the on-disk format or the
//! matcher's cost/ratio trade-off, not runtime-configurable knobs.

/// Container magic bytes.
pub const MAGIC: [u8; 3] = *b"ODZ";

/// Container format version.
pub const FORMAT_VERSION: u8 = 2;

/// Maximum bytes per block. Blocks never reference data across this boundary.
pub const BLOCK_SIZE: usize = 1 << 20;

/// Maximum back-reference distance (the LZ77 sliding window).
pub const WINDOW_SIZE: usize = 32768;

/// Shortest back-reference the matcher will ever emit.
pub const MIN_MATCH: usize = 3;

/// Longest back-reference a single token can encode.
pub const MAX_MATCH: usize = 258;

/// log2 of the hash-chain head table size.
pub const HASH_BITS: u32 = 15;

/// Bound on hash-chain candidates walked per match attempt.
pub const MAX_CHAIN_STEPS: u32 = 64;

/// Cap on canonical code length for the literal/length and distance alphabets.
pub const MAX_BITS: u32 = 15;

/// Cap on canonical code length for the 19-symbol code-length alphabet.
pub const CL_MAX_BITS: u32 = 7;

/// Bits in the decode table's fast primary lookup.
pub const PRIMARY_BITS: u32 = 9;

/// Literal/length alphabet size: 256 literals + end-of-block + 29 length codes.
pub const LITLEN_SYMS: usize = 286;

/// End-of-block sentinel symbol in the literal/length alphabet.
pub const LITLEN_END: u16 = 256;

/// Distance alphabet size.
pub const DIST_SYMS: usize = 30;

/// Code-length alphabet size (used to serialize the two trees above).
pub const CODELEN_SYMS: usize = 19;
