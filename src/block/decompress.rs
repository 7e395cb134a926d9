//! Block decompressor: replay a Huffman-coded token stream back into raw
//! bytes.

use crate::bitstream::BitReader;
use crate::config::{DIST_SYMS, LITLEN_END, MAX_BITS};
use crate::error::{OdzError, Result};
use crate::huffman::trees::read_trees;
use crate::huffman::TwoLevelTable;
use crate::tables::{BASE_DIST, BASE_LENGTH, EXTRA_DBITS, EXTRA_LBITS};

/// Decodes one Huffman-coded block from `br` into `out`, returning the
/// number of bytes written. `out` must be at least as large as the block's
/// declared raw size.
pub fn decompress_block(br: &mut BitReader, out: &mut [u8]) -> Result<usize> {
    let (ll_lens, d_lens) = read_trees(br)?;

    let mut ll_tab = TwoLevelTable::new();
    ll_tab.build(&ll_lens, MAX_BITS);
    let mut d_tab = TwoLevelTable::new();
    d_tab.build(&d_lens, MAX_BITS);

    let mut op = 0usize;
    loop {
        let sym = ll_tab.decode(br)?;

        if sym < 256 {
            if op >= out.len() {
                return Err(OdzError::Overrun);
            }
            out[op] = sym as u8;
            op += 1;
        } else if sym == LITLEN_END {
            break;
        } else {
            let code_idx = sym as usize - 257;
            if code_idx >= 29 {
                return Err(OdzError::InvalidLengthCode(sym));
            }
            let mut length = BASE_LENGTH[code_idx] as usize;
            if EXTRA_LBITS[code_idx] > 0 {
                length += br.read(EXTRA_LBITS[code_idx]) as usize;
            }

            let dcode = d_tab.decode(br)?;
            if dcode as usize >= DIST_SYMS {
                return Err(OdzError::InvalidDistanceCode(dcode));
            }
            let dcode = dcode as usize;
            let mut dist = BASE_DIST[dcode] as usize;
            if EXTRA_DBITS[dcode] > 0 {
                dist += br.read(EXTRA_DBITS[dcode]) as usize;
            }

            if dist == 0 || dist > op {
                return Err(OdzError::InvalidDistance {
                    distance: dist,
                    position: op,
                });
            }
            if op + length > out.len() {
                return Err(OdzError::Overrun);
            }

            let src = op - dist;
            if dist >= length {
                let (head, tail) = out.split_at_mut(op);
                tail[..length].copy_from_slice(&head[src..src + length]);
            } else if dist == 1 {
                let b = out[src];
                out[op..op + length].fill(b);
            } else {
                for k in 0..length {
                    out[op + k] = out[src + k];
                }
            }
            op += length;
        }
    }

    Ok(op)
}
