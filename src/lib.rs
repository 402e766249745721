//! # zendds
//!
//! DDS (DirectDraw Surface) container decoder.
//!
//! Reads the 128-byte preamble and the raw level payloads that follow it,
//! and hands back one contiguous buffer per image together with the surface
//! format it should be uploaded as. Block-compressed data stays compressed;
//! uncompressed 8-bit-per-channel layouts are normalized to BGRA8.
//!
//! ## Supported Layouts
//!
//! - **S3TC**: DXT1 through DXT5
//! - **8-bit RGB(A)**: 24-bit RGB/BGR, 32-bit ARGB/XRGB/ABGR/XBGR
//! - **Packed 16-bit**: R5G6B5, A1R5G5B5, X1R5G5B5, A4R4G4B4, X4R4G4B4
//! - **Packed 32-bit**: A2B10G10R10, A2R10G10B10, G16R16
//! - **Wide**: 16-bit unorm/snorm, half float and float layouts by D3DFMT code
//! - **Shapes**: flat images, full cube maps and volumes, each with mip chains
//!
//! ## Non-Goals
//!
//! - The DX10 extended header (reported as [`DdsError::NotSupported`])
//! - Decompressing S3TC blocks to pixels
//! - Encoding
//!
//! ## Usage
//!
//! ```no_run
//! use zendds::{DecodeRequest, ImageInfo, Limits, Unstoppable};
//!
//! let data: &[u8] = &[]; // your DDS bytes
//!
//! // Probe without reading the payload
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?} {:?}", info.width, info.height, info.shape, info.format);
//!
//! // Decode with the full mip chain
//! let limits = Limits {
//!     max_memory_bytes: Some(256 << 20),
//!     ..Limits::default()
//! };
//! let mut cursor = std::io::Cursor::new(data);
//! let image = DecodeRequest::new(&mut cursor)
//!     .with_mipmaps(true)
//!     .with_limits(&limits)
//!     .decode(Unstoppable)?;
//! for level in image.levels() {
//!     println!("target {} mip {}: {} bytes", level.target, level.mip, level.len());
//! }
//! # Ok::<(), zendds::DdsError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod dds;

mod decode;

use std::io::{Read, Seek};

// Re-exports
pub use dds::format::SourceFormat;
pub use dds::header::{FourCC, Header, PixelFormat};
pub use dds::shape::{CubeFace, Shape};
pub use decode::{DecodeRequest, DecodedImage, Level};
pub use enough::{Stop, Unstoppable};
pub use error::DdsError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{SurfaceFormat, SurfaceSupport};

/// Decode a DDS file held in memory: any shape, top level only.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodedImage, DdsError> {
    let mut cursor = std::io::Cursor::new(data);
    DecodeRequest::new(&mut cursor).decode(stop)
}

/// Decode a DDS file starting at the reader's current position: any shape,
/// top level only.
pub fn decode_from<R: Read + Seek + ?Sized>(
    reader: &mut R,
    stop: impl Stop,
) -> Result<DecodedImage, DdsError> {
    DecodeRequest::new(reader).decode(stop)
}
