//! Fast table-based Huffman decoding.
//!
//! [`FlatTable`] is a single flat table sized to the maximum code length of
//! its alphabet, used for the small 19-symbol code-length alphabet.
//! [`TwoLevelTable`] is the 9-bit primary / overflow-secondary table used for
//! the much larger literal/length and distance alphabets, where a flat
//! 2^15-entry table would waste memory on alphabets that rarely need codes
//! that long.

use crate::bitstream::BitReader;
use crate::config::PRIMARY_BITS;
use crate::error::{OdzError, Result};
use crate::huffman::codes::build_codes;

const INVALID_SYM: u16 = 0xFFFF;

#[derive(Clone, Copy)]
struct Entry {
    sym: u16,
    len: u16,
}

impl Entry {
    const INVALID: Entry = Entry {
        sym: INVALID_SYM,
        len: 0,
    };
}

/// A flat decode table sized `2^table_bits`, used for small alphabets.
pub struct FlatTable {
    entries: Vec<Entry>,
    table_bits: u32,
}

impl FlatTable {
    pub fn build(lengths: &[u8], table_bits: u32) -> Self {
        let table_size = 1usize << table_bits;
        let mut entries = vec![Entry::INVALID; table_size];
        let codes = build_codes(lengths, table_bits);

        for (s, &l) in lengths.iter().enumerate() {
            if l == 0 {
                continue;
            }
            let len = l as u32;
            let code = codes[s];
            let fill = 1usize << (table_bits - len);
            for j in 0..fill {
                let idx = (code as usize) | (j << len);
                entries[idx] = Entry {
                    sym: s as u16,
                    len: len as u16,
                };
            }
        }

        FlatTable {
            entries,
            table_bits,
        }
    }

    pub fn decode(&self, br: &mut BitReader) -> Result<u16> {
        let bits = br.peek(self.table_bits);
        let e = self.entries[bits as usize];
        if e.sym == INVALID_SYM {
            return Err(OdzError::CorruptTree);
        }
        br.consume(e.len as u32);
        Ok(e.sym)
    }
}

/// Two-level decode table: a 512-entry primary table plus a grown-on-demand
/// secondary overflow region for codes longer than [`PRIMARY_BITS`].
///
/// Reused across blocks: `build` rebuilds the primary table and secondary
/// contents in place, growing the secondary buffer only when a block needs
/// more room than it currently has (never shrinking it).
pub struct TwoLevelTable {
    primary: Vec<Entry>,
    secondary: Vec<Entry>,
}

impl TwoLevelTable {
    pub fn new() -> Self {
        TwoLevelTable {
            primary: vec![Entry::INVALID; 1 << PRIMARY_BITS],
            secondary: Vec::new(),
        }
    }

    pub fn build(&mut self, lengths: &[u8], max_bits: u32) {
        let pbits = PRIMARY_BITS;
        let psize = 1usize << pbits;

        self.primary.iter_mut().for_each(|e| *e = Entry::INVALID);

        let codes = build_codes(lengths, max_bits);
        let max_len = lengths.iter().copied().max().unwrap_or(0) as u32;

        // First pass: codes that fit entirely in the primary table.
        for (s, &l) in lengths.iter().enumerate() {
            if l == 0 || l as u32 > pbits {
                continue;
            }
            let len = l as u32;
            let code = codes[s];
            let fill = 1usize << (pbits - len);
            for j in 0..fill {
                let idx = (code as usize) | (j << len);
                self.primary[idx] = Entry {
                    sym: s as u16,
                    len: len as u16,
                };
            }
        }

        if max_len <= pbits {
            self.secondary.clear();
            return;
        }

        // Second pass: group overflowing codes by their 9-bit prefix, size a
        // sub-table per prefix, and lay them out contiguously in `secondary`.
        let mut prefix_max_len = vec![0u32; psize];
        for (s, &l) in lengths.iter().enumerate() {
            let len = l as u32;
            if len <= pbits {
                continue;
            }
            let prefix = (codes[s] as usize) & (psize - 1);
            if len > prefix_max_len[prefix] {
                prefix_max_len[prefix] = len;
            }
        }

        let mut prefix_offset = vec![-1i64; psize];
        let mut prefix_sub_bits = vec![0u32; psize];
        let mut sec_total = 0usize;
        for p in 0..psize {
            if prefix_max_len[p] == 0 {
                continue;
            }
            let sub_bits = prefix_max_len[p] - pbits;
            prefix_sub_bits[p] = sub_bits;
            prefix_offset[p] = sec_total as i64;
            sec_total += 1usize << sub_bits;
        }

        if sec_total > self.secondary.len() {
            self.secondary.resize(sec_total, Entry::INVALID);
        } else {
            self.secondary[..sec_total]
                .iter_mut()
                .for_each(|e| *e = Entry::INVALID);
        }

        for (s, &l) in lengths.iter().enumerate() {
            let len = l as u32;
            if len <= pbits {
                continue;
            }
            let code = codes[s] as usize;
            let prefix = code & (psize - 1);
            let sub_code = code >> pbits;
            let sub_bits = prefix_sub_bits[prefix];
            let sub_len = len - pbits;
            let fill = 1usize << (sub_bits - sub_len);
            let base = prefix_offset[prefix] as usize;
            for j in 0..fill {
                let idx = base + (sub_code | (j << sub_len));
                self.secondary[idx] = Entry {
                    sym: s as u16,
                    len: len as u16,
                };
            }
        }

        for p in 0..psize {
            if prefix_offset[p] < 0 {
                continue;
            }
            self.primary[p] = Entry {
                sym: prefix_offset[p] as u16,
                len: ((prefix_sub_bits[p] + pbits) | 0x8000) as u16,
            };
        }
    }

    pub fn decode(&self, br: &mut BitReader) -> Result<u16> {
        let bits = br.peek(15);
        let e = self.primary[(bits as usize) & ((1 << PRIMARY_BITS) - 1)];
        if e.len & 0x8000 == 0 {
            if e.sym == INVALID_SYM {
                return Err(OdzError::CorruptTree);
            }
            br.consume(e.len as u32);
            return Ok(e.sym);
        }

        let total_bits = (e.len & 0x7FFF) as u32;
        let sub_idx =
            e.sym as usize + (((bits >> PRIMARY_BITS) & ((1 << (total_bits - PRIMARY_BITS)) - 1)) as usize);
        let se = self.secondary[sub_idx];
        if se.sym == INVALID_SYM {
            return Err(OdzError::CorruptTree);
        }
        br.consume(se.len as u32);
        Ok(se.sym)
    }
}

impl Default for TwoLevelTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::BitWriter;
    use crate::huffman::lengths::build_lengths;

    fn roundtrip_all_symbols(freqs: &[u32], max_bits: u32) {
        let lens = build_lengths(freqs, max_bits);
        let codes = build_codes(&lens, max_bits);

        let mut table = TwoLevelTable::new();
        table.build(&lens, max_bits);

        for (s, &l) in lens.iter().enumerate() {
            if l == 0 {
                continue;
            }
            let mut w = BitWriter::with_capacity(8);
            w.write(codes[s] as u32, l as u32);
            // pad so the reader always has enough bits to peek 15.
            w.write(0, 16);
            let bytes = w.into_bytes();
            let mut r = BitReader::new(&bytes);
            let decoded = table.decode(&mut r).expect("valid tree decodes");
            assert_eq!(decoded as usize, s, "symbol {s} length {l}");
        }
    }

    #[test]
    fn two_level_table_decodes_every_symbol_short_and_long_codes() {
        // Skewed enough to push some codes past the 9-bit primary.
        let freqs: Vec<u32> = (0..286u32)
            .map(|i| if i < 2 { 10_000 } else { 1 })
            .collect();
        roundtrip_all_symbols(&freqs, 15);
    }

    #[test]
    fn two_level_table_handles_uniform_frequencies() {
        let freqs = vec![1u32; 286];
        roundtrip_all_symbols(&freqs, 15);
    }

    #[test]
    fn flat_table_decodes_codelen_alphabet() {
        let freqs: Vec<u32> = (0..19u32).map(|i| (i % 5) + 1).collect();
        let lens = build_lengths(&freqs, 7);
        let codes = build_codes(&lens, 7);
        let table = FlatTable::build(&lens, 7);

        for (s, &l) in lens.iter().enumerate() {
            if l == 0 {
                continue;
            }
            let mut w = BitWriter::with_capacity(4);
            w.write(codes[s] as u32, l as u32);
            w.write(0, 7);
            let bytes = w.into_bytes();
            let mut r = BitReader::new(&bytes);
            assert_eq!(table.decode(&mut r).unwrap() as usize, s);
        }
    }

    #[test]
    fn single_symbol_alphabet_decodes_via_one_bit_code() {
        let lens = build_lengths(&[0, 7, 0], 15);
        let mut table = TwoLevelTable::new();
        table.build(&lens, 15);
        let mut w = BitWriter::with_capacity(4);
        w.write(0, 16);
        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(table.decode(&mut r).unwrap(), 1);
    }
}
