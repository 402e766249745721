//! Level dimensions, byte sizes and payload offsets.

use alloc::vec::Vec;

use crate::dds::format::{Encoding, SourceFormat};
use crate::dds::header::Header;
use crate::dds::shape::Shape;
use crate::error::DdsError;

/// A `u32` dimension can be halved at most 31 times before reaching 1.
pub const MAX_MIP_LEVELS: u32 = 32;

/// `max(1, base >> level)`.
pub fn mip_dimension(base: u32, level: u32) -> u32 {
    base.checked_shr(level).unwrap_or(0).max(1)
}

/// Levels in a complete chain down to 1×1: `floor(log2(max(w, h))) + 1`.
pub fn full_chain_levels(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - largest.leading_zeros()
}

/// Byte size of one 2D surface of `width`×`height` in `format`, or `None`
/// on overflow.
pub fn surface_size(format: SourceFormat, width: u32, height: u32) -> Option<usize> {
    match format.encoding() {
        Encoding::Block { block_bytes } => (width.div_ceil(4) as usize)
            .checked_mul(height.div_ceil(4) as usize)?
            .checked_mul(block_bytes),
        Encoding::Pixel { bytes_per_pixel } => (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(bytes_per_pixel),
    }
}

/// Dimensions of one mip level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelExtent {
    pub width: u32,
    pub height: u32,
    /// Always 1 outside volumes.
    pub depth: u32,
}

/// Byte layout of a whole payload: every level of every face or slice.
#[derive(Clone, Debug)]
pub struct SurfaceLayout {
    format: SourceFormat,
    shape: Shape,
    width: u32,
    height: u32,
    depth: u32,
    mip_count: u32,
    /// One 2D surface per level.
    slice_sizes: Vec<usize>,
    /// One level of one chain; for volumes this covers all slices.
    level_sizes: Vec<usize>,
    chain_size: usize,
    payload_size: usize,
}

impl SurfaceLayout {
    pub fn new(
        format: SourceFormat,
        shape: Shape,
        width: u32,
        height: u32,
        depth: u32,
        mip_count: u32,
    ) -> Result<Self, DdsError> {
        if width == 0 || height == 0 {
            return Err(DdsError::InvalidHeader(alloc::format!(
                "zero dimension {width}x{height}"
            )));
        }
        if mip_count == 0 || mip_count > MAX_MIP_LEVELS {
            return Err(DdsError::InvalidHeader(alloc::format!(
                "mip count {mip_count} outside 1..={MAX_MIP_LEVELS}"
            )));
        }
        let depth = match shape {
            Shape::Volume => depth.max(1),
            Shape::Flat | Shape::Cube => 1,
        };
        if shape == Shape::Volume && format.is_block_compressed() {
            return Err(DdsError::NotSupported(alloc::format!(
                "block-compressed volume ({format:?})"
            )));
        }

        let too_large = || DdsError::DimensionsTooLarge {
            width,
            height,
            depth,
        };

        let mut slice_sizes = Vec::with_capacity(mip_count as usize);
        let mut level_sizes = Vec::with_capacity(mip_count as usize);
        let mut chain_size = 0usize;
        for level in 0..mip_count {
            let w = mip_dimension(width, level);
            let h = mip_dimension(height, level);
            let d = mip_dimension(depth, level);
            let Some(slice) = surface_size(format, w, h) else {
                return Err(too_large());
            };
            let Some(level_size) = slice.checked_mul(d as usize) else {
                return Err(too_large());
            };
            let Some(total) = chain_size.checked_add(level_size) else {
                return Err(too_large());
            };
            slice_sizes.push(slice);
            level_sizes.push(level_size);
            chain_size = total;
        }
        let Some(payload_size) = chain_size.checked_mul(shape.chain_count() as usize) else {
            return Err(too_large());
        };

        Ok(Self {
            format,
            shape,
            width,
            height,
            depth,
            mip_count,
            slice_sizes,
            level_sizes,
            chain_size,
            payload_size,
        })
    }

    /// Layout for a parsed header whose format and shape are already known.
    pub fn from_header(
        header: &Header,
        format: SourceFormat,
        shape: Shape,
    ) -> Result<Self, DdsError> {
        Self::new(
            format,
            shape,
            header.width,
            header.height,
            header.depth,
            header.mip_levels(),
        )
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn mip_count(&self) -> u32 {
        self.mip_count
    }

    /// Top-level depth; 1 unless the shape is a volume.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn extent(&self, level: u32) -> LevelExtent {
        LevelExtent {
            width: mip_dimension(self.width, level),
            height: mip_dimension(self.height, level),
            depth: mip_dimension(self.depth, level),
        }
    }

    /// Size of one 2D surface at `level`.
    pub fn slice_size(&self, level: u32) -> usize {
        self.slice_sizes[level as usize]
    }

    /// Size of `level` within one chain (all slices of a volume level).
    pub fn level_size(&self, level: u32) -> usize {
        self.level_sizes[level as usize]
    }

    /// Sum of all level sizes of one face (or of the whole volume).
    pub fn chain_size(&self) -> usize {
        self.chain_size
    }

    /// Bytes following the preamble that the file must provide.
    pub fn payload_size(&self) -> usize {
        self.payload_size
    }

    /// Number of addressable targets at `level`: 6 faces for a cube, the
    /// level's depth for a volume, 1 for a flat image.
    pub fn targets(&self, level: u32) -> u32 {
        match self.shape {
            Shape::Flat => 1,
            Shape::Cube => 6,
            Shape::Volume => mip_dimension(self.depth, level),
        }
    }

    /// Bytes stored for one (target, level) pair.
    pub fn read_size(&self, level: u32) -> usize {
        match self.shape {
            Shape::Volume => self.slice_size(level),
            Shape::Flat | Shape::Cube => self.level_size(level),
        }
    }

    /// Offset of a (target, level) payload relative to the end of the preamble.
    ///
    /// Faces are whole chains laid end to end. Volume levels are laid end to
    /// end with their slices packed inside each level.
    pub fn offset_of(&self, target: u32, level: u32) -> Result<usize, DdsError> {
        if level >= self.mip_count || target >= self.targets(level) {
            return Err(DdsError::LevelOutOfRange { target, level });
        }
        let earlier_levels: usize = self.level_sizes[..level as usize].iter().sum();
        let offset = match self.shape {
            Shape::Flat | Shape::Cube => target as usize * self.chain_size + earlier_levels,
            Shape::Volume => earlier_levels + target as usize * self.slice_size(level),
        };
        Ok(offset)
    }

    /// Whether the stored chain reaches 1×1 (1×1×1 for volumes).
    pub fn is_full_chain(&self) -> bool {
        let levels = match self.shape {
            Shape::Volume => full_chain_levels(self.width.max(self.depth), self.height),
            Shape::Flat | Shape::Cube => full_chain_levels(self.width, self.height),
        };
        levels <= self.mip_count
    }
}
