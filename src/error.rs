//! A single opaque error type for the codec core.
//!
//! Every failure taxonomy entry in the container/block format maps to one
//! variant here. The core never panics or aborts on malformed input; callers
//! (the CLI, or any embedding application) decide how fatal to treat it.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum OdzError {
    /// Propagated I/O failure (short read/write, seek failure, etc).
    Io(io::Error),
    /// The first three bytes of the container were not `"ODZ"`.
    BadMagic,
    /// The container declares a format version this codec does not support.
    UnsupportedVersion(u8),
    /// A header or payload ended before the declared length was satisfied.
    Truncated(&'static str),
    /// A block's declared raw size exceeds the maximum block size.
    BlockTooLarge(u32),
    /// An unrecognized block-type bits in a block's flags byte.
    UnknownBlockType(u8),
    /// A decoded literal/length symbol had no corresponding length code.
    InvalidLengthCode(u16),
    /// A decoded distance symbol exceeded the distance alphabet.
    InvalidDistanceCode(u16),
    /// A decoded back-reference distance was zero or pointed before the block start.
    InvalidDistance { distance: usize, position: usize },
    /// A decoded match would write past the block's declared raw size.
    Overrun,
    /// Code-length symbol 16 (repeat previous) appeared with no previous length.
    DanglingRepeat,
    /// The two-level decode table produced no symbol for the peeked bits
    /// (an over-subscribed or corrupt Huffman tree).
    CorruptTree,
    /// A Huffman block decoded to a size different from its declared raw size.
    SizeMismatch { expected: u32, actual: usize },
    /// The container's total decompressed size did not match its header.
    TotalSizeMismatch { expected: u64, actual: u64 },
}

impl fmt::Display for OdzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdzError::Io(e) => write!(f, "I/O error: {e}"),
            OdzError::BadMagic => write!(f, "bad magic: not an ODZ stream"),
            OdzError::UnsupportedVersion(v) => write!(f, "unsupported format version {v}"),
            OdzError::Truncated(what) => write!(f, "truncated stream: {what}"),
            OdzError::BlockTooLarge(n) => write!(f, "block too large: {n} bytes"),
            OdzError::UnknownBlockType(t) => write!(f, "unknown block type {t}"),
            OdzError::InvalidLengthCode(s) => write!(f, "invalid length code {s}"),
            OdzError::InvalidDistanceCode(s) => write!(f, "invalid distance code {s}"),
            OdzError::InvalidDistance { distance, position } => write!(
                f,
                "invalid distance {distance} at output position {position}"
            ),
            OdzError::Overrun => write!(f, "match would overrun block"),
            OdzError::DanglingRepeat => write!(f, "code-length 16 with no previous length"),
            OdzError::CorruptTree => write!(f, "corrupt or over-subscribed Huffman tree"),
            OdzError::SizeMismatch { expected, actual } => write!(
                f,
                "decoded block size {actual} does not match declared size {expected}"
            ),
            OdzError::TotalSizeMismatch { expected, actual } => write!(
                f,
                "total decompressed size {actual} does not match header size {expected}"
            ),
        }
    }
}

impl std::error::Error for OdzError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OdzError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OdzError {
    fn from(e: io::Error) -> Self {
        OdzError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, OdzError>;
