//! DDS container: header, format resolution, layout and level extraction.

pub mod extract;
pub mod format;
pub mod header;
pub mod shape;
pub mod size;
pub mod target;

use alloc::vec::Vec;
use std::io::{Read, Seek, SeekFrom};

use enough::Stop;

use crate::decode::{DecodedImage, ImageHeader, Level};
use crate::error::DdsError;
use crate::limits::Limits;
use crate::pixel::SurfaceSupport;
use extract::LevelReader;
use header::{Header, PREAMBLE_SIZE};
use shape::Shape;
use size::SurfaceLayout;

pub(crate) struct DecodeOptions<'a> {
    pub offset: Option<u64>,
    pub shape: Option<Shape>,
    pub mipmaps: bool,
    pub limits: Option<&'a Limits>,
    pub support: SurfaceSupport,
}

/// Everything known about a file after its header, before its payload.
pub(crate) struct Probe {
    pub header: Header,
    pub layout: SurfaceLayout,
    pub image: ImageHeader,
}

/// Parse the header and settle format, shape and layout. Reads nothing past
/// the preamble.
pub(crate) fn probe<R: Read + ?Sized>(
    reader: &mut R,
    requested: Option<Shape>,
    support: &SurfaceSupport,
) -> Result<Probe, DdsError> {
    let header = Header::read(reader)?;
    let source_format = format::resolve(&header.pixel_format)?;

    let shape = Shape::classify(header.caps, header.caps2);
    shape::check_requested(requested, shape)?;
    if shape == Shape::Cube {
        shape::check_cube_faces(header.caps2)?;
    }

    let layout = SurfaceLayout::from_header(&header, source_format, shape)?;
    let format = target::surface_format(source_format, support)?;

    let image = ImageHeader {
        width: header.width,
        height: header.height,
        depth: layout.depth(),
        shape,
        source_format,
        format,
        mip_count: layout.mip_count(),
        mipmapped: layout.is_full_chain(),
    };
    Ok(Probe {
        header,
        layout,
        image,
    })
}

pub(crate) fn decode<R: Read + Seek + ?Sized>(
    reader: &mut R,
    options: &DecodeOptions<'_>,
    stop: &dyn Stop,
) -> Result<DecodedImage, DdsError> {
    stop.check()?;

    let start = match options.offset {
        Some(offset) => reader.seek(SeekFrom::Start(offset))?,
        None => reader.stream_position()?,
    };
    let Probe {
        layout, mut image, ..
    } = probe(reader, options.shape, &options.support)?;

    if let Some(limits) = options.limits {
        limits.check(image.width, image.height, image.depth)?;
    }

    let loaded = if !options.mipmaps {
        1
    } else if layout.is_full_chain() {
        layout.mip_count()
    } else {
        log::debug!(
            "DDS mip chain of {} levels does not reach 1x1 for {}x{}, loading top level only",
            layout.mip_count(),
            image.width,
            image.height
        );
        1
    };
    image.mip_count = loaded;
    image.mipmapped = options.mipmaps && layout.is_full_chain();

    let fixup = layout.format().fixup();
    let targets = |mip| layout.targets(mip);
    let mut total = 0usize;
    for mip in 0..loaded {
        let per_level = fixup
            .output_len(layout.read_size(mip))
            .checked_mul(targets(mip) as usize)
            .and_then(|bytes| total.checked_add(bytes));
        total = per_level.ok_or(DdsError::DimensionsTooLarge {
            width: image.width,
            height: image.height,
            depth: image.depth,
        })?;
    }
    if let Some(limits) = options.limits {
        limits.check_memory(total)?;
    }

    let payload_start = start + PREAMBLE_SIZE as u64;
    check_stream_len(reader, payload_start, layout.payload_size())?;
    let mut levels = LevelReader::new(reader, payload_start, &layout);

    let mut data = Vec::new();
    data.try_reserve_exact(total).map_err(|_| {
        DdsError::LimitExceeded(alloc::format!("cannot allocate {total} bytes for levels"))
    })?;
    data.resize(total, 0);
    let mut table = Vec::new();
    let mut cursor = 0usize;

    // File order: face chains one after another, volume slices packed per level.
    let (outer, inner_by_level) = match layout.shape() {
        Shape::Cube => (layout.shape().chain_count(), false),
        Shape::Flat | Shape::Volume => (1, true),
    };
    for chain in 0..outer {
        for mip in 0..loaded {
            let extent = layout.extent(mip);
            let per_target = levels.output_size(mip);
            let level_targets = if inner_by_level { targets(mip) } else { 1 };
            for slice in 0..level_targets {
                stop.check()?;
                let target = if inner_by_level { slice } else { chain };
                let range = cursor..cursor + per_target;
                levels.read_into(target, mip, &mut data[range.clone()])?;
                table.push(Level::new(target, mip, extent.width, extent.height, range));
                cursor += per_target;
            }
        }
    }

    log::debug!(
        "DDS decoded {:?} {}x{}x{} {:?} -> {:?}, {} levels, {total} bytes",
        image.shape,
        image.width,
        image.height,
        image.depth,
        image.source_format,
        image.format,
        table.len()
    );
    Ok(DecodedImage::new(image, data, table))
}

/// Fail with an end-of-stream error unless every byte the header declares is
/// present, whether or not it will be loaded. Leaves the position unchanged.
fn check_stream_len<R: Seek + ?Sized>(
    reader: &mut R,
    payload_start: u64,
    payload_size: usize,
) -> Result<(), DdsError> {
    let position = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(position))?;

    let needed = payload_start.saturating_add(payload_size as u64);
    if end < needed {
        return Err(DdsError::Stream(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            alloc::format!("stream ends at {end}, payload needs {needed} bytes"),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stream_len_check_restores_position() {
        let mut cursor = Cursor::new(alloc::vec![0u8; 200]);
        cursor.set_position(128);
        check_stream_len(&mut cursor, 128, 72).unwrap();
        assert_eq!(cursor.position(), 128);

        match check_stream_len(&mut cursor, 128, 73) {
            Err(DdsError::Stream(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("expected Stream error, got {other:?}"),
        }
        assert_eq!(cursor.position(), 128);
    }

    #[test]
    fn stream_len_check_saturates() {
        let mut cursor = Cursor::new(alloc::vec![0u8; 8]);
        assert!(matches!(
            check_stream_len(&mut cursor, u64::MAX - 4, usize::MAX),
            Err(DdsError::Stream(_))
        ));
    }
}
