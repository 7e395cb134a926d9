//! File-level framing: header, block sequencing, and the stored/Huffman
//! block choice.
//!
//! Each block is compressed independently via [`crate::block`]. When the
//! Huffman encoding doesn't beat the raw bytes, the block is written stored
//! instead; the decoder branches on the block-type bits in the block
//! header either way.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::bitstream::{BitReader, BitWriter};
use crate::block::{compress_block, decompress_block};
use crate::config::{BLOCK_SIZE, FORMAT_VERSION, MAGIC};
use crate::error::{OdzError, Result};

const BLOCK_STORED: u8 = 0;
const BLOCK_HUFFMAN: u8 = 1;

/// Called after each block is written/read with `(bytes done, total bytes)`.
/// On decompress, `total` is the declared original size from the container
/// header and is stable across calls. On compress, the total isn't known
/// until the input is exhausted (the encoder never reads ahead to find it),
/// so `total` tracks bytes read so far and only equals the true total on the
/// final call.
pub trait Progress {
    fn report(&mut self, done: u64, total: u64);
}

impl<F: FnMut(u64, u64)> Progress for F {
    fn report(&mut self, done: u64, total: u64) {
        self(done, total)
    }
}

/// A no-op progress sink, for callers that don't care.
pub struct NoProgress;
impl Progress for NoProgress {
    fn report(&mut self, _done: u64, _total: u64) {}
}

fn write_u32le<W: Write>(w: &mut W, v: u32) -> Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_u64le<W: Write>(w: &mut W, v: u64) -> Result<()> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn read_u32le<R: Read>(r: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b).map_err(|_| OdzError::Truncated("u32 field"))?;
    Ok(u32::from_le_bytes(b))
}

fn read_u64le<R: Read>(r: &mut R) -> Result<u64> {
    let mut b = [0u8; 8];
    r.read_exact(&mut b).map_err(|_| OdzError::Truncated("u64 field"))?;
    Ok(u64::from_le_bytes(b))
}

/// Fills `buf` from `r` one `read` call at a time until either `buf` is full
/// or `r` is exhausted, mirroring the read-to-capacity loop `fread` performs
/// under the hood. Returns the number of bytes actually filled.
fn fill_block<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = r.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Reads `r` one block at a time (at most [`BLOCK_SIZE`] bytes per `read`),
/// and writes the compressed container to `w`. Never buffers more than a
/// block's worth of input at once.
///
/// The container header needs the total original size up front, before any
/// block is known to be the last one, so the size field is written as a
/// placeholder and patched in place via `w.seek` once the final byte count
/// is known. Each block's own last-block flag is decided the same way: a
/// single-byte probe read after a fully-filled block tells us whether more
/// input remains, rather than comparing against a size computed in advance.
pub fn compress<R: Read, W: Write + Seek, P: Progress>(mut r: R, mut w: W, mut progress: P) -> Result<()> {
    w.write_all(&MAGIC)?;
    w.write_all(&[FORMAT_VERSION])?;
    let size_field_pos = w.stream_position()?;
    write_u64le(&mut w, 0)?;

    let mut buf = vec![0u8; BLOCK_SIZE];
    let mut carry: Option<u8> = None;
    let mut total_in = 0u64;
    let mut first = true;

    loop {
        let mut filled = 0usize;
        if let Some(b) = carry.take() {
            buf[0] = b;
            filled = 1;
        }
        filled += fill_block(&mut r, &mut buf[filled..])?;

        if filled == 0 && !first {
            break;
        }
        first = false;

        let is_last = if filled < BLOCK_SIZE {
            true
        } else {
            let mut probe = [0u8; 1];
            if r.read(&mut probe)? == 0 {
                true
            } else {
                carry = Some(probe[0]);
                false
            }
        };

        let chunk = &buf[..filled];
        let mut bw = BitWriter::with_capacity(chunk.len() + 1024);
        compress_block(chunk, &mut bw);
        let comp = bw.into_bytes();

        let blk_type = if comp.len() < chunk.len() { BLOCK_HUFFMAN } else { BLOCK_STORED };
        let flags = (is_last as u8) | (blk_type << 1);
        w.write_all(&[flags])?;
        write_u32le(&mut w, chunk.len() as u32)?;

        if comp.len() < chunk.len() {
            write_u32le(&mut w, comp.len() as u32)?;
            w.write_all(&comp)?;
        } else {
            w.write_all(chunk)?;
        }

        total_in += chunk.len() as u64;
        progress.report(total_in, total_in);

        if is_last {
            break;
        }
    }

    let end_pos = w.stream_position()?;
    w.seek(SeekFrom::Start(size_field_pos))?;
    write_u64le(&mut w, total_in)?;
    w.seek(SeekFrom::Start(end_pos))?;

    Ok(())
}

/// Reads a compressed container from `r` and writes the decompressed bytes
/// to `w`.
pub fn decompress<R: Read, W: Write, P: Progress>(mut r: R, mut w: W, mut progress: P) -> Result<()> {
    let mut magic = [0u8; 3];
    r.read_exact(&mut magic).map_err(|_| OdzError::Truncated("file header"))?;
    if magic != MAGIC {
        return Err(OdzError::BadMagic);
    }

    let mut version = [0u8; 1];
    r.read_exact(&mut version).map_err(|_| OdzError::Truncated("file header"))?;
    if version[0] != FORMAT_VERSION {
        return Err(OdzError::UnsupportedVersion(version[0]));
    }

    let original_size = read_u64le(&mut r)?;
    let mut total_out = 0u64;
    let mut block_out = vec![0u8; BLOCK_SIZE];

    loop {
        let mut flags_byte = [0u8; 1];
        r.read_exact(&mut flags_byte)
            .map_err(|_| OdzError::Truncated("block header"))?;
        let flags = flags_byte[0];
        let is_last = flags & 1 != 0;
        let blk_type = (flags >> 1) & 3;

        match blk_type {
            BLOCK_STORED => {
                let raw_size = read_u32le(&mut r)? as usize;
                if raw_size > BLOCK_SIZE {
                    return Err(OdzError::BlockTooLarge(raw_size as u32));
                }
                r.read_exact(&mut block_out[..raw_size])
                    .map_err(|_| OdzError::Truncated("stored block"))?;
                w.write_all(&block_out[..raw_size])?;
                total_out += raw_size as u64;
            }
            BLOCK_HUFFMAN => {
                let raw_size = read_u32le(&mut r)? as usize;
                if raw_size > BLOCK_SIZE {
                    return Err(OdzError::BlockTooLarge(raw_size as u32));
                }
                let comp_size = read_u32le(&mut r)? as usize;
                let mut comp = vec![0u8; comp_size];
                r.read_exact(&mut comp).map_err(|_| OdzError::Truncated("huffman block"))?;

                let mut br = BitReader::new(&comp);
                let n = decompress_block(&mut br, &mut block_out[..raw_size])?;
                if n != raw_size {
                    return Err(OdzError::SizeMismatch {
                        expected: raw_size as u32,
                        actual: n,
                    });
                }
                w.write_all(&block_out[..raw_size])?;
                total_out += raw_size as u64;
            }
            other => return Err(OdzError::UnknownBlockType(other)),
        }

        progress.report(total_out, original_size);
        if is_last {
            break;
        }
    }

    if total_out != original_size {
        return Err(OdzError::TotalSizeMismatch {
            expected: original_size,
            actual: total_out,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(data: &[u8]) {
        let mut compressed = Vec::new();
        compress(data, Cursor::new(&mut compressed), NoProgress).unwrap();

        let mut decompressed = Vec::new();
        decompress(&compressed[..], &mut decompressed, NoProgress).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn empty_input_round_trips_as_a_single_empty_stored_block() {
        roundtrip(&[]);
    }

    #[test]
    fn single_byte_round_trips() {
        roundtrip(&[7u8]);
    }

    #[test]
    fn multi_block_input_round_trips() {
        let data: Vec<u8> = (0..(BLOCK_SIZE * 2 + 12345))
            .map(|i| (i % 251) as u8)
            .collect();
        roundtrip(&data);
    }

    #[test]
    fn header_has_the_expected_magic_and_version() {
        let mut compressed = Vec::new();
        compress(&b"hello"[..], Cursor::new(&mut compressed), NoProgress).unwrap();
        assert_eq!(&compressed[0..3], b"ODZ");
        assert_eq!(compressed[3], FORMAT_VERSION);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bogus = vec![b'X', b'Y', b'Z', FORMAT_VERSION];
        bogus.extend_from_slice(&0u64.to_le_bytes());
        let mut out = Vec::new();
        let err = decompress(&bogus[..], &mut out, NoProgress).unwrap_err();
        assert!(matches!(err, OdzError::BadMagic));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut bogus = vec![b'O', b'D', b'Z', FORMAT_VERSION + 1];
        bogus.extend_from_slice(&0u64.to_le_bytes());
        let mut out = Vec::new();
        let err = decompress(&bogus[..], &mut out, NoProgress).unwrap_err();
        assert!(matches!(err, OdzError::UnsupportedVersion(_)));
    }

    #[test]
    fn progress_callback_reaches_the_total() {
        let data = vec![5u8; 1000];
        let mut compressed = Vec::new();
        compress(&data[..], Cursor::new(&mut compressed), NoProgress).unwrap();

        let mut last = (0u64, 0u64);
        let cb = |done: u64, total: u64| last = (done, total);
        let mut out = Vec::new();
        decompress(&compressed[..], &mut out, cb).unwrap();
        assert_eq!(last, (1000, 1000));
    }
}
