//! Block compressor: LZ77 parse, then Huffman-encode the resulting tokens.

use crate::bitstream::BitWriter;
use crate::block::types::Token;
use crate::config::{
    DIST_SYMS, HASH_BITS, LITLEN_END, LITLEN_SYMS, MAX_BITS, MAX_CHAIN_STEPS, MAX_MATCH, MIN_MATCH,
    WINDOW_SIZE,
};
use crate::huffman::codes::build_codes;
use crate::huffman::lengths::build_lengths;
use crate::huffman::trees::write_trees;
use crate::lz::Matcher;
use crate::tables::{dist_to_code, length_to_code};

fn parse_tokens(data: &[u8]) -> (Vec<Token>, [u32; LITLEN_SYMS], [u32; DIST_SYMS]) {
    let n = data.len();
    let mut tokens = Vec::with_capacity(n + 1);
    let mut ll_freq = [0u32; LITLEN_SYMS];
    let mut d_freq = [0u32; DIST_SYMS];

    let mut matcher = Matcher::new(n, HASH_BITS, MAX_CHAIN_STEPS, WINDOW_SIZE, MIN_MATCH, MAX_MATCH);

    let mut i = 0;
    while i < n {
        let (best_len, best_dist) = matcher.find_best(data, i);

        // Lazy matching: peek one position ahead and prefer it if longer.
        // Skipped for near-maximal matches, where the lookahead can't win.
        if best_len >= MIN_MATCH && best_len < MAX_MATCH - 1 && i + 1 < n {
            matcher.insert(data, i);
            let (next_len, _) = matcher.find_best_next(data, i);
            if next_len > best_len {
                ll_freq[data[i] as usize] += 1;
                tokens.push(Token::Literal(data[i]));
                i += 1;
                continue;
            }
        }

        if best_len >= MIN_MATCH {
            let (lsym, _, _) = length_to_code(best_len);
            ll_freq[257 + lsym] += 1;
            let (dsym, _, _) = dist_to_code(best_dist);
            d_freq[dsym] += 1;

            tokens.push(Token::Match {
                length: best_len as u16,
                distance: best_dist as u16,
            });

            for p in i..i + best_len {
                if p + 2 >= n {
                    break;
                }
                matcher.insert(data, p);
            }
            i += best_len;
        } else {
            matcher.insert(data, i);
            ll_freq[data[i] as usize] += 1;
            tokens.push(Token::Literal(data[i]));
            i += 1;
        }
    }

    ll_freq[LITLEN_END as usize] += 1;
    if d_freq.iter().all(|&f| f == 0) {
        d_freq[0] = 1;
    }

    (tokens, ll_freq, d_freq)
}

/// Compresses one block's worth of raw bytes (at most [`crate::config::BLOCK_SIZE`])
/// into a self-contained Huffman-coded bitstream: trees, then tokens, then the
/// end-of-block symbol.
pub fn compress_block(data: &[u8], bw: &mut BitWriter) {
    let (tokens, ll_freq, d_freq) = parse_tokens(data);

    let ll_lens = build_lengths(&ll_freq, MAX_BITS);
    let d_lens = build_lengths(&d_freq, MAX_BITS);
    let ll_codes = build_codes(&ll_lens, MAX_BITS);
    let d_codes = build_codes(&d_lens, MAX_BITS);

    write_trees(bw, &ll_lens, &d_lens);

    for tok in &tokens {
        match *tok {
            Token::Literal(b) => {
                let s = b as usize;
                bw.write(ll_codes[s] as u32, ll_lens[s] as u32);
            }
            Token::Match { length, distance } => {
                let (lsym, lebits, leval) = length_to_code(length as usize);
                let s = 257 + lsym;
                bw.write(ll_codes[s] as u32, ll_lens[s] as u32);
                if lebits > 0 {
                    bw.write(leval, lebits);
                }

                let (dsym, debits, deval) = dist_to_code(distance as usize);
                bw.write(d_codes[dsym] as u32, d_lens[dsym] as u32);
                if debits > 0 {
                    bw.write(deval, debits);
                }
            }
        }
    }

    let end = LITLEN_END as usize;
    bw.write(ll_codes[end] as u32, ll_lens[end] as u32);
    bw.flush();
}
