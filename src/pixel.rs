/// Destination pixel format of a decoded image.
///
/// This is the rendering surface's format set, smaller than the set of
/// source layouts a DDS file may use. Byte order is memory order: `Bgra8`
/// stores B, G, R, A in consecutive bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// 4 bytes: B, G, R, A. Every 8-bit-per-channel source lands here.
    Bgra8,
    /// 16-bit packed, blue in the low bits.
    B5G6R5,
    /// 16-bit packed with 1-bit alpha in the top bit.
    Bgr5A1,
    /// 16-bit packed, top bit unused.
    Bgr5X1,
    /// 16-bit packed, 4 bits per channel.
    Bgra4,
    /// 16-bit packed, top nibble unused.
    Bgrx4,
    /// 32-bit packed, red in the low bits.
    Rgb10A2,
    /// 32-bit packed, blue in the low bits.
    Bgr10A2,
    Rg16,
    Rgba16,
    Rgba16Snorm,
    Rg8Snorm,
    R16F,
    Rg16F,
    Rgba16F,
    R32F,
    Rg32F,
    Rgba32F,
    /// S3TC DXT1 blocks.
    Bc1,
    /// S3TC DXT2/DXT3 blocks.
    Bc2,
    /// S3TC DXT4/DXT5 blocks.
    Bc3,
}

impl SurfaceFormat {
    /// Bytes per pixel for uncompressed formats; `None` for block formats.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            Self::B5G6R5 | Self::Bgr5A1 | Self::Bgr5X1 | Self::Bgra4 | Self::Bgrx4 => Some(2),
            Self::Rg8Snorm | Self::R16F => Some(2),
            Self::Bgra8 | Self::Rgb10A2 | Self::Bgr10A2 | Self::Rg16 | Self::Rg16F | Self::R32F => {
                Some(4)
            }
            Self::Rgba16 | Self::Rgba16Snorm | Self::Rgba16F | Self::Rg32F => Some(8),
            Self::Rgba32F => Some(16),
            Self::Bc1 | Self::Bc2 | Self::Bc3 => None,
        }
    }

    /// Bytes per 4×4 block for compressed formats; `None` otherwise.
    pub fn block_bytes(&self) -> Option<usize> {
        match self {
            Self::Bc1 => Some(8),
            Self::Bc2 | Self::Bc3 => Some(16),
            _ => None,
        }
    }

    pub fn is_block_compressed(&self) -> bool {
        self.block_bytes().is_some()
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self,
            Self::R16F | Self::Rg16F | Self::Rgba16F | Self::R32F | Self::Rg32F | Self::Rgba32F
        )
    }
}

/// What the receiving rendering surface can hold.
///
/// Defaults to everything. A host without S3TC or float texture support
/// clears the matching flag and gets [`crate::DdsError::NotRepresentable`]
/// for such files instead of bytes it cannot upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSupport {
    pub block_compression: bool,
    pub float: bool,
}

impl Default for SurfaceSupport {
    fn default() -> Self {
        Self::ALL
    }
}

impl SurfaceSupport {
    pub const ALL: SurfaceSupport = SurfaceSupport {
        block_compression: true,
        float: true,
    };

    /// Whether `format` can be created on this surface.
    pub fn supports(&self, format: SurfaceFormat) -> bool {
        (self.block_compression || !format.is_block_compressed())
            && (self.float || !format.is_float())
    }
}
