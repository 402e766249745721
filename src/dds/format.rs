//! Pixel-format resolution: `DDS_PIXELFORMAT` → [`SourceFormat`].
//!
//! Three ordered passes, first hit wins:
//!
//! 1. fourcc codes that name their layout outright (block compression,
//!    float, 16-bit integer, packed normal maps);
//! 2. when `DDPF_RGB` is set, the legacy table keyed on flags, bit count and
//!    exact channel masks;
//! 3. the exporter sentinel described on [`EXPORTER_A8R8G8B8`].
//!
//! Anything else is [`DdsError::UnknownFormat`].

use crate::dds::header::{FourCC, PixelFormat, PixelFormatFlags};
use crate::error::DdsError;

/// Source pixel layouts this decoder understands.
///
/// Uncompressed names follow the Direct3D 9 convention: channels listed from
/// the most significant bit of the little-endian pixel word down. `A8R8G8B8`
/// is therefore stored as bytes B, G, R, A.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// BC1, 8 bytes per 4×4 block.
    Dxt1,
    /// BC2 with premultiplied alpha.
    Dxt2,
    Dxt3,
    /// BC3 with premultiplied alpha.
    Dxt4,
    Dxt5,

    A16B16G16R16,
    /// Signed 16-bit per channel (bump/normal data).
    Q16W16V16U16,
    R16F,
    G16R16F,
    A16B16G16R16F,
    R32F,
    G32R32F,
    A32B32G32R32F,
    /// Two signed 8-bit channels; the normal's Z is reconstructed.
    CxV8U8,

    R8G8B8,
    B8G8R8,
    A8R8G8B8,
    X8R8G8B8,
    A8B8G8R8,
    X8B8G8R8,
    R5G6B5,
    A1R5G5B5,
    X1R5G5B5,
    A4R4G4B4,
    X4R4G4B4,
    A2B10G10R10,
    A2R10G10B10,
    G16R16,
}

/// How a level of a given format is laid out in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// 4×4 pixel blocks of `block_bytes` each.
    Block { block_bytes: usize },
    Pixel { bytes_per_pixel: usize },
}

/// Byte-level normalization applied after a level is read.
///
/// Steps run in field order: expansion, then red/blue swap, then alpha fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fixup {
    /// 3 bytes per pixel in, 4 out, the new byte set to 255.
    pub expand_rgb: bool,
    /// Exchange byte 0 and byte 2 of every 4-byte pixel.
    pub swap_red_blue: bool,
    /// Set byte 3 of every 4-byte pixel to 255.
    pub force_alpha: bool,
}

impl Fixup {
    pub const NONE: Fixup = Fixup {
        expand_rgb: false,
        swap_red_blue: false,
        force_alpha: false,
    };

    pub fn is_identity(self) -> bool {
        self == Fixup::NONE
    }

    /// Output bytes produced for `input_len` source bytes.
    pub fn output_len(self, input_len: usize) -> usize {
        if self.expand_rgb {
            input_len / 3 * 4
        } else {
            input_len
        }
    }
}

impl SourceFormat {
    pub fn encoding(self) -> Encoding {
        use SourceFormat::*;
        match self {
            Dxt1 => Encoding::Block { block_bytes: 8 },
            Dxt2 | Dxt3 | Dxt4 | Dxt5 => Encoding::Block { block_bytes: 16 },
            // Producers of these rarely fill in the generic bit count, so the
            // size is fixed per code.
            R16F | CxV8U8 => Encoding::Pixel { bytes_per_pixel: 2 },
            G16R16F | R32F => Encoding::Pixel { bytes_per_pixel: 4 },
            A16B16G16R16 | Q16W16V16U16 | A16B16G16R16F | G32R32F => {
                Encoding::Pixel { bytes_per_pixel: 8 }
            }
            A32B32G32R32F => Encoding::Pixel { bytes_per_pixel: 16 },
            other => Encoding::Pixel {
                bytes_per_pixel: other.rgb_bit_count() as usize / 8,
            },
        }
    }

    pub fn is_block_compressed(self) -> bool {
        matches!(self.encoding(), Encoding::Block { .. })
    }

    pub fn is_float(self) -> bool {
        use SourceFormat::*;
        matches!(
            self,
            R16F | G16R16F | A16B16G16R16F | R32F | G32R32F | A32B32G32R32F
        )
    }

    /// Bit count of the RGB-table layouts; 0 for fourcc-coded formats.
    fn rgb_bit_count(self) -> u32 {
        RGB_TABLE
            .iter()
            .find(|entry| entry.format == self)
            .map_or(0, |entry| entry.bit_count)
    }

    pub fn fixup(self) -> Fixup {
        use SourceFormat::*;
        match self {
            R8G8B8 => Fixup {
                expand_rgb: true,
                ..Fixup::NONE
            },
            B8G8R8 => Fixup {
                expand_rgb: true,
                swap_red_blue: true,
                ..Fixup::NONE
            },
            X8R8G8B8 => Fixup {
                force_alpha: true,
                ..Fixup::NONE
            },
            A8B8G8R8 => Fixup {
                swap_red_blue: true,
                ..Fixup::NONE
            },
            X8B8G8R8 => Fixup {
                swap_red_blue: true,
                force_alpha: true,
                ..Fixup::NONE
            },
            _ => Fixup::NONE,
        }
    }
}

// ── Pass 1: fourcc codes ────────────────────────────────────────────

/// Direct3D 9 format enumerants that show up verbatim in the fourcc field.
mod d3dfmt {
    use crate::dds::header::FourCC;

    pub const A16B16G16R16: FourCC = FourCC(36);
    pub const Q16W16V16U16: FourCC = FourCC(110);
    pub const R16F: FourCC = FourCC(111);
    pub const G16R16F: FourCC = FourCC(112);
    pub const A16B16G16R16F: FourCC = FourCC(113);
    pub const R32F: FourCC = FourCC(114);
    pub const G32R32F: FourCC = FourCC(115);
    pub const A32B32G32R32F: FourCC = FourCC(116);
    pub const CXV8U8: FourCC = FourCC(117);
}

const FOURCC_TABLE: &[(FourCC, SourceFormat)] = &[
    (FourCC::DXT1, SourceFormat::Dxt1),
    (FourCC::DXT2, SourceFormat::Dxt2),
    (FourCC::DXT3, SourceFormat::Dxt3),
    (FourCC::DXT4, SourceFormat::Dxt4),
    (FourCC::DXT5, SourceFormat::Dxt5),
    (d3dfmt::A16B16G16R16, SourceFormat::A16B16G16R16),
    (d3dfmt::Q16W16V16U16, SourceFormat::Q16W16V16U16),
    (d3dfmt::R16F, SourceFormat::R16F),
    (d3dfmt::G16R16F, SourceFormat::G16R16F),
    (d3dfmt::A16B16G16R16F, SourceFormat::A16B16G16R16F),
    (d3dfmt::R32F, SourceFormat::R32F),
    (d3dfmt::G32R32F, SourceFormat::G32R32F),
    (d3dfmt::A32B32G32R32F, SourceFormat::A32B32G32R32F),
    (d3dfmt::CXV8U8, SourceFormat::CxV8U8),
];

// ── Pass 2: RGB mask table ──────────────────────────────────────────

#[derive(Clone, Copy)]
enum AlphaMask {
    Exact(u32),
    /// The alpha byte is padding; whatever mask the writer put there is
    /// accepted and the byte is forced opaque after reading.
    DontCare,
}

struct RgbEntry {
    /// Compared against the descriptor flags restricted to RGB | ALPHA_PIXELS.
    flags: PixelFormatFlags,
    bit_count: u32,
    r: u32,
    g: u32,
    b: u32,
    a: AlphaMask,
    format: SourceFormat,
}

const RGB: PixelFormatFlags = PixelFormatFlags::RGB;
const RGBA: PixelFormatFlags = PixelFormatFlags::RGB.union(PixelFormatFlags::ALPHA_PIXELS);

const fn entry(
    flags: PixelFormatFlags,
    bit_count: u32,
    [r, g, b]: [u32; 3],
    a: AlphaMask,
    format: SourceFormat,
) -> RgbEntry {
    RgbEntry {
        flags,
        bit_count,
        r,
        g,
        b,
        a,
        format,
    }
}

use AlphaMask::{DontCare, Exact};

#[rustfmt::skip]
const RGB_TABLE: &[RgbEntry] = &[
    entry(RGB,  24, [0x00ff_0000, 0x0000_ff00, 0x0000_00ff], Exact(0), SourceFormat::R8G8B8),
    entry(RGB,  24, [0x0000_00ff, 0x0000_ff00, 0x00ff_0000], Exact(0), SourceFormat::B8G8R8),
    entry(RGBA, 32, [0x00ff_0000, 0x0000_ff00, 0x0000_00ff], Exact(0xff00_0000), SourceFormat::A8R8G8B8),
    entry(RGB,  32, [0x00ff_0000, 0x0000_ff00, 0x0000_00ff], DontCare, SourceFormat::X8R8G8B8),
    entry(RGBA, 32, [0x0000_00ff, 0x0000_ff00, 0x00ff_0000], Exact(0xff00_0000), SourceFormat::A8B8G8R8),
    entry(RGB,  32, [0x0000_00ff, 0x0000_ff00, 0x00ff_0000], DontCare, SourceFormat::X8B8G8R8),
    entry(RGB,  16, [0xf800, 0x07e0, 0x001f], Exact(0), SourceFormat::R5G6B5),
    entry(RGBA, 16, [0x7c00, 0x03e0, 0x001f], Exact(0x8000), SourceFormat::A1R5G5B5),
    entry(RGB,  16, [0x7c00, 0x03e0, 0x001f], Exact(0), SourceFormat::X1R5G5B5),
    entry(RGBA, 16, [0x0f00, 0x00f0, 0x000f], Exact(0xf000), SourceFormat::A4R4G4B4),
    entry(RGB,  16, [0x0f00, 0x00f0, 0x000f], Exact(0), SourceFormat::X4R4G4B4),
    entry(RGBA, 32, [0x0000_03ff, 0x000f_fc00, 0x3ff0_0000], Exact(0xc000_0000), SourceFormat::A2B10G10R10),
    entry(RGBA, 32, [0x3ff0_0000, 0x000f_fc00, 0x0000_03ff], Exact(0xc000_0000), SourceFormat::A2R10G10B10),
    entry(RGB,  32, [0x0000_ffff, 0xffff_0000, 0], Exact(0), SourceFormat::G16R16),
];

impl RgbEntry {
    fn matches(&self, pf: &PixelFormat) -> bool {
        let flags = pf.flags & RGBA;
        flags == self.flags
            && pf.rgb_bit_count == self.bit_count
            && pf.r_bit_mask == self.r
            && pf.g_bit_mask == self.g
            && pf.b_bit_mask == self.b
            && match self.a {
                Exact(mask) => pf.a_bit_mask == mask,
                DontCare => true,
            }
    }
}

// ── Pass 3: exporter sentinel ───────────────────────────────────────

/// Some older texture exporters write the Direct3D enumerant
/// `D3DFMT_A8R8G8B8` (21) into the fourcc field instead of zero, and leave
/// the RGB flag or masks unset. With a 32-bit count this is plain A8R8G8B8.
/// Kept apart from the mask table: the masks cannot be trusted here.
pub const EXPORTER_A8R8G8B8: FourCC = FourCC(21);

/// Resolve a pixel-format descriptor to a known source layout.
pub fn resolve(pf: &PixelFormat) -> Result<SourceFormat, DdsError> {
    let resolved = resolve_fourcc(pf)
        .or_else(|| resolve_rgb(pf))
        .or_else(|| resolve_exporter_sentinel(pf));

    match resolved {
        Some(format) => {
            log::trace!("DDS source format: {format:?}");
            Ok(format)
        }
        None => Err(DdsError::UnknownFormat(*pf)),
    }
}

fn resolve_fourcc(pf: &PixelFormat) -> Option<SourceFormat> {
    FOURCC_TABLE
        .iter()
        .find(|(code, _)| *code == pf.four_cc)
        .map(|&(_, format)| format)
}

fn resolve_rgb(pf: &PixelFormat) -> Option<SourceFormat> {
    if !pf.flags.contains(PixelFormatFlags::RGB) {
        return None;
    }
    RGB_TABLE
        .iter()
        .find(|entry| entry.matches(pf))
        .map(|entry| entry.format)
}

fn resolve_exporter_sentinel(pf: &PixelFormat) -> Option<SourceFormat> {
    (pf.four_cc == EXPORTER_A8R8G8B8 && pf.rgb_bit_count == 32).then_some(SourceFormat::A8R8G8B8)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn fourcc_format(code: FourCC) -> PixelFormat {
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

    fn rgb_format(flags: PixelFormatFlags, bits: u32, masks: [u32; 4]) -> PixelFormat {
        PixelFormat {
            size: 32,
            flags,
            four_cc: FourCC::NONE,
            rgb_bit_count: bits,
            r_bit_mask: masks[0],
            g_bit_mask: masks[1],
            b_bit_mask: masks[2],
            a_bit_mask: masks[3],
        }
    }

    #[rstest]
    #[case(FourCC::DXT1, SourceFormat::Dxt1)]
    #[case(FourCC::DXT2, SourceFormat::Dxt2)]
    #[case(FourCC::DXT3, SourceFormat::Dxt3)]
    #[case(FourCC::DXT4, SourceFormat::Dxt4)]
    #[case(FourCC::DXT5, SourceFormat::Dxt5)]
    #[case(FourCC(36), SourceFormat::A16B16G16R16)]
    #[case(FourCC(110), SourceFormat::Q16W16V16U16)]
    #[case(FourCC(111), SourceFormat::R16F)]
    #[case(FourCC(112), SourceFormat::G16R16F)]
    #[case(FourCC(113), SourceFormat::A16B16G16R16F)]
    #[case(FourCC(114), SourceFormat::R32F)]
    #[case(FourCC(115), SourceFormat::G32R32F)]
    #[case(FourCC(116), SourceFormat::A32B32G32R32F)]
    #[case(FourCC(117), SourceFormat::CxV8U8)]
    fn resolves_fourcc_codes(#[case] code: FourCC, #[case] expected: SourceFormat) {
        assert_eq!(resolve(&fourcc_format(code)).unwrap(), expected);
    }

    #[test]
    fn fourcc_wins_without_fourcc_flag() {
        let mut pf = fourcc_format(FourCC(113));
        pf.flags = PixelFormatFlags::empty();
        pf.rgb_bit_count = 32; // wrong, and ignored
        let format = resolve(&pf).unwrap();
        assert_eq!(format, SourceFormat::A16B16G16R16F);
        assert_eq!(format.encoding(), Encoding::Pixel { bytes_per_pixel: 8 });
    }

    #[rstest]
    #[case(RGB, 24, [0xff0000, 0xff00, 0xff, 0], SourceFormat::R8G8B8)]
    #[case(RGB, 24, [0xff, 0xff00, 0xff0000, 0], SourceFormat::B8G8R8)]
    #[case(RGBA, 32, [0xff0000, 0xff00, 0xff, 0xff000000], SourceFormat::A8R8G8B8)]
    #[case(RGB, 32, [0xff0000, 0xff00, 0xff, 0], SourceFormat::X8R8G8B8)]
    #[case(RGB, 32, [0xff0000, 0xff00, 0xff, 0xff000000], SourceFormat::X8R8G8B8)]
    #[case(RGBA, 32, [0xff, 0xff00, 0xff0000, 0xff000000], SourceFormat::A8B8G8R8)]
    #[case(RGB, 32, [0xff, 0xff00, 0xff0000, 0], SourceFormat::X8B8G8R8)]
    #[case(RGB, 16, [0xf800, 0x7e0, 0x1f, 0], SourceFormat::R5G6B5)]
    #[case(RGBA, 16, [0x7c00, 0x3e0, 0x1f, 0x8000], SourceFormat::A1R5G5B5)]
    #[case(RGB, 16, [0x7c00, 0x3e0, 0x1f, 0], SourceFormat::X1R5G5B5)]
    #[case(RGBA, 16, [0xf00, 0xf0, 0xf, 0xf000], SourceFormat::A4R4G4B4)]
    #[case(RGB, 16, [0xf00, 0xf0, 0xf, 0], SourceFormat::X4R4G4B4)]
    #[case(RGBA, 32, [0x3ff, 0xffc00, 0x3ff00000, 0xc0000000], SourceFormat::A2B10G10R10)]
    #[case(RGBA, 32, [0x3ff00000, 0xffc00, 0x3ff, 0xc0000000], SourceFormat::A2R10G10B10)]
    #[case(RGB, 32, [0xffff, 0xffff0000, 0, 0], SourceFormat::G16R16)]
    fn resolves_rgb_table(
        #[case] flags: PixelFormatFlags,
        #[case] bits: u32,
        #[case] masks: [u32; 4],
        #[case] expected: SourceFormat,
    ) {
        assert_eq!(resolve(&rgb_format(flags, bits, masks)).unwrap(), expected);
    }

    #[test]
    fn rgb_table_needs_rgb_flag() {
        let pf = rgb_format(
            PixelFormatFlags::ALPHA_PIXELS,
            32,
            [0xff0000, 0xff00, 0xff, 0xff000000],
        );
        assert!(matches!(resolve(&pf), Err(DdsError::UnknownFormat(_))));
    }

    #[test]
    fn unrelated_flags_do_not_affect_rgb_match() {
        let pf = rgb_format(
            RGB | PixelFormatFlags::LUMINANCE,
            16,
            [0xf800, 0x7e0, 0x1f, 0],
        );
        assert_eq!(resolve(&pf).unwrap(), SourceFormat::R5G6B5);
    }

    #[test]
    fn alpha_mask_must_match_for_alpha_layouts() {
        // A8R8G8B8 masks but with a 16-bit alpha mask: no such layout.
        let pf = rgb_format(RGBA, 32, [0xff0000, 0xff00, 0xff, 0xffff]);
        assert!(matches!(resolve(&pf), Err(DdsError::UnknownFormat(_))));
    }

    #[test]
    fn exporter_sentinel_resolves_to_a8r8g8b8() {
        let mut pf = fourcc_format(EXPORTER_A8R8G8B8);
        pf.flags = PixelFormatFlags::empty();
        pf.rgb_bit_count = 32;
        assert_eq!(resolve(&pf).unwrap(), SourceFormat::A8R8G8B8);
    }

    #[test]
    fn exporter_sentinel_needs_32_bits() {
        let mut pf = fourcc_format(EXPORTER_A8R8G8B8);
        pf.rgb_bit_count = 24;
        assert!(matches!(resolve(&pf), Err(DdsError::UnknownFormat(_))));
    }

    #[test]
    fn unknown_descriptor_is_rejected() {
        assert!(matches!(
            resolve(&fourcc_format(FourCC::from_bytes(*b"ATI2"))),
            Err(DdsError::UnknownFormat(_))
        ));
        let luminance = rgb_format(PixelFormatFlags::LUMINANCE, 8, [0xff, 0, 0, 0]);
        assert!(matches!(
            resolve(&luminance),
            Err(DdsError::UnknownFormat(_))
        ));
    }

    #[rstest]
    #[case(SourceFormat::Dxt1, Encoding::Block { block_bytes: 8 })]
    #[case(SourceFormat::Dxt3, Encoding::Block { block_bytes: 16 })]
    #[case(SourceFormat::Dxt5, Encoding::Block { block_bytes: 16 })]
    #[case(SourceFormat::R16F, Encoding::Pixel { bytes_per_pixel: 2 })]
    #[case(SourceFormat::CxV8U8, Encoding::Pixel { bytes_per_pixel: 2 })]
    #[case(SourceFormat::A32B32G32R32F, Encoding::Pixel { bytes_per_pixel: 16 })]
    #[case(SourceFormat::R8G8B8, Encoding::Pixel { bytes_per_pixel: 3 })]
    #[case(SourceFormat::X8B8G8R8, Encoding::Pixel { bytes_per_pixel: 4 })]
    #[case(SourceFormat::A4R4G4B4, Encoding::Pixel { bytes_per_pixel: 2 })]
    #[case(SourceFormat::G16R16, Encoding::Pixel { bytes_per_pixel: 4 })]
    fn encodings(#[case] format: SourceFormat, #[case] expected: Encoding) {
        assert_eq!(format.encoding(), expected);
    }

    #[test]
    fn fixups_per_layout() {
        assert!(SourceFormat::A8R8G8B8.fixup().is_identity());
        assert!(SourceFormat::R8G8B8.fixup().expand_rgb);
        assert!(!SourceFormat::R8G8B8.fixup().swap_red_blue);
        let xbgr = SourceFormat::X8B8G8R8.fixup();
        assert!(xbgr.swap_red_blue && xbgr.force_alpha && !xbgr.expand_rgb);
        assert_eq!(SourceFormat::B8G8R8.fixup().output_len(12), 16);
        assert_eq!(SourceFormat::A8B8G8R8.fixup().output_len(12), 12);
    }
}
