use alloc::vec::Vec;
use core::ops::Range;
use std::io::{Read, Seek};

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::dds::format::SourceFormat;
use crate::dds::shape::{CubeFace, Shape};
use crate::error::DdsError;
use crate::limits::Limits;
use crate::pixel::{SurfaceFormat, SurfaceSupport};

/// Builder for decoding a DDS stream.
///
/// ```no_run
/// use std::io::Cursor;
/// use zendds::{DecodeRequest, Shape, Unstoppable};
///
/// let mut file = Cursor::new(std::fs::read("sky.dds")?);
/// let image = DecodeRequest::new(&mut file)
///     .with_shape(Shape::Cube)
///     .with_mipmaps(true)
///     .decode(Unstoppable)?;
/// let faces = image.levels().len() / image.mip_count() as usize;
/// println!("{faces} faces, {} levels", image.mip_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DecodeRequest<'a, R: ?Sized> {
    reader: &'a mut R,
    offset: Option<u64>,
    shape: Option<Shape>,
    mipmaps: bool,
    limits: Option<&'a Limits>,
    support: SurfaceSupport,
}

impl<'a, R: Read + Seek + ?Sized> DecodeRequest<'a, R> {
    /// Decode from the reader's current position, any shape, top level only.
    pub fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            offset: None,
            shape: None,
            mipmaps: false,
            limits: None,
            support: SurfaceSupport::ALL,
        }
    }

    /// Absolute stream position of the `"DDS "` magic.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Require the file to hold this shape; anything else is a
    /// [`DdsError::ShapeMismatch`].
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Load the whole mip chain when it reaches 1×1.
    ///
    /// A partial chain is not an error: only the top level is loaded and
    /// [`DecodedImage::mipmapped`] reports `false`.
    pub fn with_mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = mipmaps;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_support(mut self, support: SurfaceSupport) -> Self {
        self.support = support;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodedImage, DdsError> {
        let options = crate::dds::DecodeOptions {
            offset: self.offset,
            shape: self.shape,
            mipmaps: self.mipmaps,
            limits: self.limits,
            support: self.support,
        };
        crate::dds::decode(self.reader, &options, &stop)
    }
}

/// One (target, mip level) payload inside a [`DecodedImage`].
///
/// `target` is the face index for cubes, the slice index for volumes and 0
/// for flat images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub target: u32,
    pub mip: u32,
    pub width: u32,
    pub height: u32,
    range: Range<usize>,
}

impl Level {
    pub(crate) fn new(target: u32, mip: u32, width: u32, height: u32, range: Range<usize>) -> Self {
        Self {
            target,
            mip,
            width,
            height,
            range,
        }
    }

    /// Byte range of this level within [`DecodedImage::data`].
    pub fn byte_range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A decoded DDS image: one contiguous buffer holding every loaded level.
///
/// Levels are stored in file order. Cube faces each hold their own chain;
/// volume levels hold their slices back to back.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    data: Vec<u8>,
    levels: Vec<Level>,
    pub width: u32,
    pub height: u32,
    /// 1 unless `shape` is [`Shape::Volume`].
    pub depth: u32,
    pub shape: Shape,
    pub source_format: SourceFormat,
    pub format: SurfaceFormat,
    mip_count: u32,
    mipmapped: bool,
}

impl DecodedImage {
    pub(crate) fn new(header: ImageHeader, data: Vec<u8>, levels: Vec<Level>) -> Self {
        Self {
            data,
            levels,
            width: header.width,
            height: header.height,
            depth: header.depth,
            shape: header.shape,
            source_format: header.source_format,
            format: header.format,
            mip_count: header.mip_count,
            mipmapped: header.mipmapped,
        }
    }

    /// All loaded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Loaded levels per target.
    pub fn mip_count(&self) -> u32 {
        self.mip_count
    }

    /// Whether the full chain was loaded.
    pub fn mipmapped(&self) -> bool {
        self.mipmapped
    }

    /// Bytes of one (target, mip) pair, `None` if it was not loaded.
    pub fn level(&self, target: u32, mip: u32) -> Option<&[u8]> {
        self.find(target, mip).map(|l| &self.data[l.byte_range()])
    }

    /// Bytes of one cube face level; `None` for non-cube images.
    pub fn face(&self, face: CubeFace, mip: u32) -> Option<&[u8]> {
        if self.shape != Shape::Cube {
            return None;
        }
        self.level(face.index(), mip)
    }

    /// Bytes of one volume slice at `mip`; `None` for non-volume images.
    pub fn slice(&self, slice: u32, mip: u32) -> Option<&[u8]> {
        if self.shape != Shape::Volume {
            return None;
        }
        self.level(slice, mip)
    }

    /// Level record for a (target, mip) pair.
    pub fn find(&self, target: u32, mip: u32) -> Option<&Level> {
        self.levels
            .iter()
            .find(|l| l.target == target && l.mip == mip)
    }

    /// View a level as BGRA8 pixels. `None` unless the surface format is
    /// [`SurfaceFormat::Bgra8`].
    #[cfg(feature = "rgb")]
    pub fn level_pixels(&self, target: u32, mip: u32) -> Option<&[rgb::alt::BGRA<u8>]> {
        if self.format != SurfaceFormat::Bgra8 {
            return None;
        }
        self.level(target, mip).map(|bytes| bytes.as_pixels())
    }

    /// Zero-copy [`imgref::ImgRef`] of a BGRA8 level.
    #[cfg(feature = "imgref")]
    pub fn level_imgref(
        &self,
        target: u32,
        mip: u32,
    ) -> Option<imgref::ImgRef<'_, rgb::alt::BGRA<u8>>> {
        let level = self.find(target, mip)?;
        let pixels = self.level_pixels(target, mip)?;
        Some(imgref::ImgRef::new(
            pixels,
            level.width as usize,
            level.height as usize,
        ))
    }
}

/// Image-wide values settled before any payload is read.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub shape: Shape,
    pub source_format: SourceFormat,
    pub format: SurfaceFormat,
    pub mip_count: u32,
    pub mipmapped: bool,
}
