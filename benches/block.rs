//! Criterion benchmarks for the block compressor/decompressor.
//!
//! Run with:
//!   cargo bench --bench block

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use odz::bitstream::{BitReader, BitWriter};
use odz::block::{compress_block, decompress_block};

fn synthetic_text(len: usize) -> Vec<u8> {
    const WORDS: &[&str] = &["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(WORDS[i % WORDS.len()].as_bytes());
        out.push(b' ');
        i += 1;
    }
    out.truncate(len);
    out
}

fn synthetic_random(len: usize) -> Vec<u8> {
    let mut x = 0x243F6A8885A308D3u64;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x & 0xFF) as u8
        })
        .collect()
}

fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_compress_decompress");

    for &chunk_size in &[65_536usize, 262_144] {
        for (label, data) in [
            ("text", synthetic_text(chunk_size)),
            ("random", synthetic_random(chunk_size)),
        ] {
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("compress_{label}"), chunk_size),
                &data,
                |b, data| {
                    b.iter(|| {
                        let mut bw = BitWriter::with_capacity(data.len() + 1024);
                        compress_block(data, &mut bw);
                        bw.into_bytes()
                    })
                },
            );

            let mut bw = BitWriter::with_capacity(data.len() + 1024);
            compress_block(&data, &mut bw);
            let compressed = bw.into_bytes();
            let mut out = vec![0u8; data.len()];

            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("decompress_{label}"), chunk_size),
                &compressed,
                |b, compressed| {
                    b.iter(|| {
                        let mut br = BitReader::new(compressed);
                        decompress_block(&mut br, &mut out).unwrap()
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_block);
criterion_main!(benches);
