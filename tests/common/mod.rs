//! Synthetic DDS writer shared by the integration tests.

#![allow(dead_code)]

use zendds::dds::header::{Caps, Caps2, HeaderFlags, PixelFormatFlags};
use zendds::{FourCC, Header, PixelFormat};

pub fn rgb_format(flags: PixelFormatFlags, bit_count: u32, masks: [u32; 4]) -> PixelFormat {
    PixelFormat {
        size: 32,
        flags,
        four_cc: FourCC::NONE,
        rgb_bit_count: bit_count,
        r_bit_mask: masks[0],
        g_bit_mask: masks[1],
        b_bit_mask: masks[2],
        a_bit_mask: masks[3],
    }
}

pub fn argb32() -> PixelFormat {
    rgb_format(
        PixelFormatFlags::RGB | PixelFormatFlags::ALPHA_PIXELS,
        32,
        [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000],
    )
}

pub fn rgb24() -> PixelFormat {
    rgb_format(
        PixelFormatFlags::RGB,
        24,
        [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0],
    )
}

pub fn fourcc(code: FourCC) -> PixelFormat {
    PixelFormat {
        size: 32,
        flags: PixelFormatFlags::FOURCC,
        four_cc: code,
        rgb_bit_count: 0,
        r_bit_mask: 0,
        g_bit_mask: 0,
        b_bit_mask: 0,
        a_bit_mask: 0,
    }
}

pub fn header(width: u32, height: u32, mips: u32, pixel_format: PixelFormat) -> Header {
    let mut flags =
        HeaderFlags::CAPS | HeaderFlags::HEIGHT | HeaderFlags::WIDTH | HeaderFlags::PIXEL_FORMAT;
    let mut caps = Caps::TEXTURE;
    if mips > 1 {
        flags |= HeaderFlags::MIPMAP_COUNT;
        caps |= Caps::COMPLEX | Caps::MIPMAP;
    }
    Header {
        size: 124,
        flags,
        height,
        width,
        pitch_or_linear_size: 0,
        depth: 0,
        mip_map_count: mips,
        reserved1: [0; 11],
        pixel_format,
        caps,
        caps2: Caps2::empty(),
        caps3: 0,
        caps4: 0,
        reserved2: 0,
    }
}

pub fn cube(mut header: Header) -> Header {
    header.caps |= Caps::COMPLEX;
    header.caps2 = Caps2::CUBEMAP | Caps2::CUBEMAP_ALL_FACES;
    header
}

pub fn volume(mut header: Header, depth: u32) -> Header {
    header.flags |= HeaderFlags::DEPTH;
    header.caps |= Caps::COMPLEX;
    header.caps2 = Caps2::VOLUME;
    header.depth = depth;
    header
}

/// 128-byte preamble followed by `payload`.
pub fn dds_file(header: &Header, payload: &[u8]) -> Vec<u8> {
    let pf = &header.pixel_format;
    let mut words = vec![
        header.size,
        header.flags.bits(),
        header.height,
        header.width,
        header.pitch_or_linear_size,
        header.depth,
        header.mip_map_count,
    ];
    words.extend_from_slice(&header.reserved1);
    words.extend_from_slice(&[
        pf.size,
        pf.flags.bits(),
        pf.four_cc.0,
        pf.rgb_bit_count,
        pf.r_bit_mask,
        pf.g_bit_mask,
        pf.b_bit_mask,
        pf.a_bit_mask,
        header.caps.bits(),
        header.caps2.bits(),
        header.caps3,
        header.caps4,
        header.reserved2,
    ]);

    let mut out = b"DDS ".to_vec();
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
    assert_eq!(out.len(), 128);
    out.extend_from_slice(payload);
    out
}

/// `len` bytes counting up from `seed`, wrapping.
pub fn ramp(seed: u8, len: usize) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}
