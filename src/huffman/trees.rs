//! DEFLATE-style three-level tree serialization.
//!
//! The literal/length and distance code-length vectors are concatenated,
//! run-length encoded with the 19-symbol code-length alphabet, and that
//! alphabet itself is Huffman-coded and written out in a fixed permuted
//! order so trailing all-zero tails can be trimmed.

use crate::bitstream::{BitReader, BitWriter};
use crate::config::{CL_MAX_BITS, CODELEN_SYMS, DIST_SYMS, LITLEN_SYMS};
use crate::error::{OdzError, Result};
use crate::huffman::codes::build_codes;
use crate::huffman::decode_table::FlatTable;
use crate::huffman::lengths::build_lengths;
use crate::tables::CODELEN_ORDER;

struct RleSym {
    sym: u8,
    extra: u32,
    ebits: u32,
}

fn rle_encode(lens: &[u8]) -> Vec<RleSym> {
    let n = lens.len();
    let mut out = Vec::new();
    let mut i = 0;
    while i < n {
        if lens[i] == 0 {
            let mut run = 1;
            while i + run < n && lens[i + run] == 0 && run < 138 {
                run += 1;
            }
            if run >= 11 {
                out.push(RleSym {
                    sym: 18,
                    extra: (run - 11) as u32,
                    ebits: 7,
                });
                i += run;
            } else if run >= 3 {
                out.push(RleSym {
                    sym: 17,
                    extra: (run - 3) as u32,
                    ebits: 3,
                });
                i += run;
            } else {
                for _ in 0..run {
                    out.push(RleSym {
                        sym: 0,
                        extra: 0,
                        ebits: 0,
                    });
                }
                i += run;
            }
        } else {
            let val = lens[i];
            out.push(RleSym {
                sym: val,
                extra: 0,
                ebits: 0,
            });
            i += 1;
            let mut run = 0;
            while i + run < n && lens[i + run] == val && run < 6 {
                run += 1;
            }
            if run >= 3 {
                out.push(RleSym {
                    sym: 16,
                    extra: (run - 3) as u32,
                    ebits: 2,
                });
                i += run;
            }
        }
    }
    out
}

/// Writes the literal/length and distance code-length vectors to the
/// bitstream. Trailing zero lengths beyond the mandatory minimum (257
/// lit/len symbols, 1 distance symbol) are trimmed before encoding.
pub fn write_trees(bw: &mut BitWriter, ll_lens: &[u8], d_lens: &[u8]) {
    let mut n_ll = ll_lens.len();
    while n_ll > 257 && ll_lens[n_ll - 1] == 0 {
        n_ll -= 1;
    }
    let mut n_dist = d_lens.len();
    while n_dist > 1 && d_lens[n_dist - 1] == 0 {
        n_dist -= 1;
    }

    let mut combined = Vec::with_capacity(n_ll + n_dist);
    combined.extend_from_slice(&ll_lens[..n_ll]);
    combined.extend_from_slice(&d_lens[..n_dist]);

    let rle = rle_encode(&combined);

    let mut cl_freq = [0u32; CODELEN_SYMS];
    for r in &rle {
        cl_freq[r.sym as usize] += 1;
    }

    let cl_lens = build_lengths(&cl_freq, CL_MAX_BITS);
    let cl_codes = build_codes(&cl_lens, CL_MAX_BITS);

    let mut hclen = CODELEN_SYMS;
    while hclen > 4 && cl_lens[CODELEN_ORDER[hclen - 1]] == 0 {
        hclen -= 1;
    }

    bw.write((n_ll - 257) as u32, 5);
    bw.write((n_dist - 1) as u32, 5);
    bw.write((hclen - 4) as u32, 4);

    for &sym in CODELEN_ORDER[..hclen].iter() {
        bw.write(cl_lens[sym] as u32, 3);
    }

    for r in &rle {
        let s = r.sym as usize;
        bw.write(cl_codes[s] as u32, cl_lens[s] as u32);
        if r.ebits > 0 {
            bw.write(r.extra, r.ebits);
        }
    }
}

/// Reads a pair of code-length vectors previously written by [`write_trees`].
/// Returns `(ll_lens, d_lens)`, each padded with trailing zeros back out to
/// the full alphabet size.
pub fn read_trees(br: &mut BitReader) -> Result<(Vec<u8>, Vec<u8>)> {
    let hlit = br.read(5) as usize + 257;
    let hdist = br.read(5) as usize + 1;
    let hclen = br.read(4) as usize + 4;

    if hlit > LITLEN_SYMS || hdist > DIST_SYMS {
        return Err(OdzError::CorruptTree);
    }

    let mut cl_lens = [0u8; CODELEN_SYMS];
    for &sym in CODELEN_ORDER[..hclen].iter() {
        cl_lens[sym] = br.read(3) as u8;
    }

    let cl_table = FlatTable::build(&cl_lens, CL_MAX_BITS);

    let total = hlit + hdist;
    let mut combined = vec![0u8; total];
    let mut i = 0;
    while i < total {
        let sym = cl_table.decode(br)?;
        if sym < 16 {
            combined[i] = sym as u8;
            i += 1;
        } else if sym == 16 {
            if i == 0 {
                return Err(OdzError::DanglingRepeat);
            }
            let run = br.read(2) as usize + 3;
            let prev = combined[i - 1];
            for _ in 0..run {
                if i >= total {
                    break;
                }
                combined[i] = prev;
                i += 1;
            }
        } else if sym == 17 {
            let run = br.read(3) as usize + 3;
            for _ in 0..run {
                if i >= total {
                    break;
                }
                combined[i] = 0;
                i += 1;
            }
        } else if sym == 18 {
            let run = br.read(7) as usize + 11;
            for _ in 0..run {
                if i >= total {
                    break;
                }
                combined[i] = 0;
                i += 1;
            }
        } else {
            return Err(OdzError::CorruptTree);
        }
    }

    let mut ll_lens = vec![0u8; LITLEN_SYMS];
    ll_lens[..hlit].copy_from_slice(&combined[..hlit]);
    let mut d_lens = vec![0u8; DIST_SYMS];
    d_lens[..hdist].copy_from_slice(&combined[hlit..hlit + hdist]);

    Ok((ll_lens, d_lens))
}
