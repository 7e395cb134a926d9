//! Round-trip and framing-fidelity properties over the public `compress`/`decompress` API.

use std::io::Cursor;

use odz::{compress, decompress, NoProgress};

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    compress(data, Cursor::new(&mut compressed), NoProgress).unwrap();
    let mut decompressed = Vec::new();
    decompress(&compressed[..], &mut decompressed, NoProgress).unwrap();
    assert_eq!(decompressed, data);
    compressed
}

#[test]
fn random_byte_sequences_round_trip() {
    let mut x = 0x9E3779B97F4A7C15u64;
    for trial in 0..30 {
        let len = (trial * 137) % 9000;
        let data: Vec<u8> = (0..len)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                (x & 0xFF) as u8
            })
            .collect();
        roundtrip(&data);
    }
}

#[test]
fn header_encodes_magic_version_and_original_size() {
    let data = vec![9u8; 777];
    let compressed = roundtrip(&data);
    assert_eq!(&compressed[0..3], b"ODZ");
    assert_eq!(compressed[3], 2);
    let size = u64::from_le_bytes(compressed[4..12].try_into().unwrap());
    assert_eq!(size, 777);
}

#[test]
fn compressing_twice_is_still_decodable_and_recovers_the_original() {
    let data: Vec<u8> = (0..20000u32).map(|i| (i % 200) as u8).collect();
    let mut once = Vec::new();
    compress(&data[..], Cursor::new(&mut once), NoProgress).unwrap();

    let mut twice = Vec::new();
    compress(&once[..], Cursor::new(&mut twice), NoProgress).unwrap();

    let mut back_to_once = Vec::new();
    decompress(&twice[..], &mut back_to_once, NoProgress).unwrap();
    assert_eq!(back_to_once, once);

    let mut original = Vec::new();
    decompress(&back_to_once[..], &mut original, NoProgress).unwrap();
    assert_eq!(original, data);
}

#[test]
fn compressible_data_shrinks_substantially() {
    let data = vec![0xFFu8; 1 << 16];
    let mut compressed = Vec::new();
    compress(&data[..], Cursor::new(&mut compressed), NoProgress).unwrap();
    assert!(compressed.len() < data.len() / 10);
}
