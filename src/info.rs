use std::io::Read;

use crate::dds::format::SourceFormat;
use crate::dds::header::Header;
use crate::dds::shape::Shape;
use crate::error::DdsError;
use crate::pixel::{SurfaceFormat, SurfaceSupport};

/// Image metadata obtained from the header alone.
#[derive(Clone, Debug)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// 1 unless `shape` is [`Shape::Volume`].
    pub depth: u32,
    /// Stored levels per face or volume, at least 1.
    pub mip_count: u32,
    /// Whether the stored chain reaches 1×1.
    pub full_chain: bool,
    pub shape: Shape,
    pub source_format: SourceFormat,
    pub format: SurfaceFormat,
    /// Bytes following the 128-byte preamble that a decode will need.
    pub payload_size: usize,
    /// The raw header as parsed.
    pub header: Header,
}

impl ImageInfo {
    /// Probe a DDS file held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<ImageInfo, DdsError> {
        let mut data = data;
        Self::read(&mut data)
    }

    /// Read the 128-byte preamble from the reader's current position.
    ///
    /// Nothing past the preamble is consumed.
    pub fn read<R: Read + ?Sized>(reader: &mut R) -> Result<ImageInfo, DdsError> {
        let probe = crate::dds::probe(reader, None, &SurfaceSupport::ALL)?;
        Ok(ImageInfo {
            width: probe.image.width,
            height: probe.image.height,
            depth: probe.image.depth,
            mip_count: probe.image.mip_count,
            full_chain: probe.image.mipmapped,
            shape: probe.image.shape,
            source_format: probe.image.source_format,
            format: probe.image.format,
            payload_size: probe.layout.payload_size(),
            header: probe.header,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dds::header::tests::{header_bytes, sample_header};
    use crate::dds::header::{Caps, Caps2};

    #[test]
    fn probes_sample_header() {
        let info = ImageInfo::from_bytes(&header_bytes(&sample_header())).unwrap();
        assert_eq!((info.width, info.height, info.depth), (16, 8, 1));
        assert_eq!(info.mip_count, 1);
        assert!(!info.full_chain);
        assert_eq!(info.shape, Shape::Flat);
        assert_eq!(info.source_format, SourceFormat::A8R8G8B8);
        assert_eq!(info.format, SurfaceFormat::Bgra8);
        assert_eq!(info.payload_size, 16 * 8 * 4);
    }

    #[test]
    fn probes_cube() {
        let mut header = sample_header();
        header.width = 4;
        header.height = 4;
        header.mip_map_count = 3;
        header.caps = Caps::TEXTURE | Caps::COMPLEX | Caps::MIPMAP;
        header.caps2 = Caps2::CUBEMAP | Caps2::CUBEMAP_ALL_FACES;
        let info = ImageInfo::from_bytes(&header_bytes(&header)).unwrap();
        assert_eq!(info.shape, Shape::Cube);
        assert!(info.full_chain);
        assert_eq!(info.payload_size, 6 * (64 + 16 + 4));
    }

    #[test]
    fn probe_does_not_read_payload() {
        let mut bytes = header_bytes(&sample_header());
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut reader = &bytes[..];
        ImageInfo::read(&mut reader).unwrap();
        assert_eq!(reader, [1, 2, 3]);
    }

    #[test]
    fn probe_rejects_bad_magic() {
        assert!(matches!(
            ImageInfo::from_bytes(b"PNG\0and some more bytes"),
            Err(DdsError::UnrecognizedFormat(_))
        ));
    }
}
