use alloc::string::String;
use enough::StopReason;

use crate::dds::format::SourceFormat;
use crate::dds::header::PixelFormat;
use crate::dds::shape::Shape;

/// Errors from DDS decoding.
///
/// Every variant is terminal for the decode call that produced it. A failed
/// decode never hands back a partially populated image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DdsError {
    /// The stream does not start with the `"DDS "` magic.
    #[error("unrecognized format magic bytes {0:02x?}")]
    UnrecognizedFormat([u8; 4]),

    /// The stream is a DDS file, but uses a variant this decoder does not
    /// implement (DX10 extended header, partial cube sets, compressed volumes).
    #[error("unsupported DDS variant: {0}")]
    NotSupported(String),

    /// The pixel-format descriptor matches none of the known layouts.
    #[error("unrecognized pixel format: {0}")]
    UnknownFormat(PixelFormat),

    #[error("shape mismatch: requested {requested:?}, file holds {actual:?}")]
    ShapeMismatch { requested: Shape, actual: Shape },

    /// The host surface has no destination format for this source format.
    #[error("{0:?} has no representable surface format")]
    NotRepresentable(SourceFormat),

    /// A (target, level) pair outside the stored layout was requested.
    #[error("level {level} of target {target} is not stored in this file")]
    LevelOutOfRange { target: u32, level: u32 },

    /// A caller-supplied output buffer does not match the level size.
    #[error("output buffer is {actual} bytes, level needs {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Seek or read failure, including reads past the end of the stream.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("dimensions too large: {width}x{height}x{depth}")]
    DimensionsTooLarge { width: u32, height: u32, depth: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for DdsError {
    fn from(r: StopReason) -> Self {
        DdsError::Cancelled(r)
    }
}
