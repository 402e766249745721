//! The 128-byte DDS preamble: magic, `DDS_HEADER` and its nested
//! `DDS_PIXELFORMAT`.
//!
//! Reading is purely structural. Field values are handed on untouched so that
//! a corrupt but parseable header fails where the bad value is actually used.

use core::fmt;
use std::io::Read;

use bitflags::bitflags;

use crate::error::DdsError;

/// `"DDS "` as it appears at offset 0.
pub const MAGIC: [u8; 4] = *b"DDS ";

/// Magic plus the 124-byte header. Payload starts right after.
pub const PREAMBLE_SIZE: usize = 128;

/// Value the header's own size field is supposed to hold.
const HEADER_STRUCT_SIZE: u32 = 124;
const PIXEL_FORMAT_STRUCT_SIZE: u32 = 32;
const HEADER_WORDS: usize = HEADER_STRUCT_SIZE as usize / 4;

bitflags! {
    /// `dwFlags` of the header: which members carry valid data.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeaderFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXEL_FORMAT = 0x1000;
        const MIPMAP_COUNT = 0x2_0000;
        const LINEAR_SIZE = 0x8_0000;
        const DEPTH = 0x80_0000;
    }
}

bitflags! {
    /// `dwFlags` of the pixel-format descriptor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PixelFormatFlags: u32 {
        const ALPHA_PIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x2_0000;
    }
}

bitflags! {
    /// `dwCaps`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Caps: u32 {
        const COMPLEX = 0x8;
        const TEXTURE = 0x1000;
        const MIPMAP = 0x40_0000;
    }
}

bitflags! {
    /// `dwCaps2`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Caps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVE_X = 0x400;
        const CUBEMAP_NEGATIVE_X = 0x800;
        const CUBEMAP_POSITIVE_Y = 0x1000;
        const CUBEMAP_NEGATIVE_Y = 0x2000;
        const CUBEMAP_POSITIVE_Z = 0x4000;
        const CUBEMAP_NEGATIVE_Z = 0x8000;
        const CUBEMAP_ALL_FACES = 0xfc00;
        const VOLUME = 0x20_0000;
    }
}

/// Four-character code as stored (little-endian `u32`).
///
/// Besides printable tags like `DXT1`, legacy writers store bare Direct3D
/// format enumerants here (36, 111, ...), so the value is kept numeric.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const NONE: FourCC = FourCC(0);
    pub const DXT1: FourCC = FourCC::from_bytes(*b"DXT1");
    pub const DXT2: FourCC = FourCC::from_bytes(*b"DXT2");
    pub const DXT3: FourCC = FourCC::from_bytes(*b"DXT3");
    pub const DXT4: FourCC = FourCC::from_bytes(*b"DXT4");
    pub const DXT5: FourCC = FourCC::from_bytes(*b"DXT5");
    /// Announces the 20-byte `DDS_HEADER_DXT10` extension.
    pub const DX10: FourCC = FourCC::from_bytes(*b"DX10");

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        FourCC(u32::from_le_bytes(bytes))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            for b in bytes {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({self})")
    }
}

/// `DDS_PIXELFORMAT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    /// Should be 32; not enforced.
    pub size: u32,
    pub flags: PixelFormatFlags,
    pub four_cc: FourCC,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "flags {:#x}, fourcc {}, {} bits, masks r {:#x} g {:#x} b {:#x} a {:#x}",
            self.flags.bits(),
            self.four_cc,
            self.rgb_bit_count,
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask
        )
    }
}

/// `DDS_HEADER`, immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Should be 124; not enforced.
    pub size: u32,
    pub flags: HeaderFlags,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mip_map_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: PixelFormat,
    pub caps: Caps,
    pub caps2: Caps2,
    pub caps3: u32,
    pub caps4: u32,
    pub reserved2: u32,
}

impl Header {
    /// Read the full 128-byte preamble from `reader`.
    ///
    /// The magic is read and checked before anything else; on mismatch no
    /// further byte is consumed.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DdsError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(DdsError::UnrecognizedFormat(magic));
        }

        let mut raw = [0u8; HEADER_STRUCT_SIZE as usize];
        reader.read_exact(&mut raw)?;
        Self::from_words(words(&raw))
    }

    /// Parse the preamble from the start of an in-memory buffer.
    pub fn parse(data: &[u8]) -> Result<Self, DdsError> {
        let mut cursor = data;
        Self::read(&mut cursor)
    }

    fn from_words(w: [u32; HEADER_WORDS]) -> Result<Self, DdsError> {
        if w[0] != HEADER_STRUCT_SIZE {
            log::warn!("DDS header size field is {}, expected {HEADER_STRUCT_SIZE}", w[0]);
        }
        if w[18] != PIXEL_FORMAT_STRUCT_SIZE {
            log::warn!(
                "DDS pixel format size field is {}, expected {PIXEL_FORMAT_STRUCT_SIZE}",
                w[18]
            );
        }

        let mut reserved1 = [0u32; 11];
        reserved1.copy_from_slice(&w[7..18]);

        let header = Header {
            size: w[0],
            flags: HeaderFlags::from_bits_retain(w[1]),
            height: w[2],
            width: w[3],
            pitch_or_linear_size: w[4],
            depth: w[5],
            mip_map_count: w[6],
            reserved1,
            pixel_format: PixelFormat {
                size: w[18],
                flags: PixelFormatFlags::from_bits_retain(w[19]),
                four_cc: FourCC(w[20]),
                rgb_bit_count: w[21],
                r_bit_mask: w[22],
                g_bit_mask: w[23],
                b_bit_mask: w[24],
                a_bit_mask: w[25],
            },
            caps: Caps::from_bits_retain(w[26]),
            caps2: Caps2::from_bits_retain(w[27]),
            caps3: w[28],
            caps4: w[29],
            reserved2: w[30],
        };

        // The DX10 extension would put 20 more header bytes where the payload
        // is expected. Refuse rather than misread them as pixels.
        if header.pixel_format.four_cc == FourCC::DX10 {
            return Err(DdsError::NotSupported("DX10 extended header".into()));
        }

        log::trace!("DDS width: {}", header.width);
        log::trace!("DDS height: {}", header.height);
        log::trace!("DDS depth: {}", header.depth);
        log::trace!("DDS mip count: {}", header.mip_map_count);
        log::trace!("DDS pixel format: {}", header.pixel_format);

        Ok(header)
    }

    /// Number of mip levels stored per face/slice; at least 1.
    pub fn mip_levels(&self) -> u32 {
        self.mip_map_count.max(1)
    }
}

fn words(raw: &[u8; HEADER_STRUCT_SIZE as usize]) -> [u32; HEADER_WORDS] {
    let mut out = [0u32; HEADER_WORDS];
    for (word, bytes) in out.iter_mut().zip(raw.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    out
}
