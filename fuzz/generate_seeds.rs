#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

/// 128-byte preamble: header words after the magic, then the pixel format.
fn preamble(
    width: u32,
    height: u32,
    depth: u32,
    mips: u32,
    pf: [u32; 8],
    caps: u32,
    caps2: u32,
) -> Vec<u8> {
    let mut words = vec![124, 0x1007, height, width, 0, depth, mips];
    words.extend_from_slice(&[0; 11]);
    words.extend_from_slice(&pf);
    words.extend_from_slice(&[caps, caps2, 0, 0, 0]);
    let mut out = b"DDS ".to_vec();
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
    out
}

const ARGB32: [u32; 8] = [32, 0x41, 0, 32, 0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000];
const RGB24: [u32; 8] = [32, 0x40, 0, 24, 0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0];

fn fourcc(code: &[u8; 4]) -> [u32; 8] {
    [32, 0x4, u32::from_le_bytes(*code), 0, 0, 0, 0, 0]
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Flat ARGB 2x2
    let mut flat = preamble(2, 2, 0, 1, ARGB32, 0x1000, 0);
    flat.extend((0u8..16).collect::<Vec<_>>());
    fs::write(format!("{dir}/argb_2x2.dds"), flat).unwrap();

    // RGB24 1x1
    let mut rgb = preamble(1, 1, 0, 1, RGB24, 0x1000, 0);
    rgb.extend_from_slice(&[10, 20, 30]);
    fs::write(format!("{dir}/rgb24_1x1.dds"), rgb).unwrap();

    // DXT1 4x4 with 3 levels
    let mut dxt1 = preamble(4, 4, 0, 3, fourcc(b"DXT1"), 0x40_1008, 0);
    dxt1.extend_from_slice(&[0x55; 24]);
    fs::write(format!("{dir}/dxt1_4x4_mips.dds"), dxt1).unwrap();

    // Cube ARGB 1x1
    let mut cube = preamble(1, 1, 0, 1, ARGB32, 0x1008, 0xfe00);
    cube.extend_from_slice(&[0x11; 24]);
    fs::write(format!("{dir}/cube_1x1.dds"), cube).unwrap();

    // Volume ARGB 2x2x2 with 2 levels
    let mut volume = preamble(2, 2, 2, 2, ARGB32, 0x40_1008, 0x20_0000);
    volume.extend_from_slice(&[0x22; 36]);
    fs::write(format!("{dir}/volume_2x2x2.dds"), volume).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"DDS ").unwrap();
    let dx10 = preamble(4, 4, 0, 1, fourcc(b"DX10"), 0x1000, 0);
    fs::write(format!("{dir}/dx10.dds"), dx10).unwrap();
    let no_payload = preamble(64, 64, 0, 7, ARGB32, 0x40_1008, 0);
    fs::write(format!("{dir}/no_payload.dds"), no_payload).unwrap();

    println!("Generated seed corpus in {dir}/");
}
