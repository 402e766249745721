//! Seek-and-read of individual (target, level) payloads.

use alloc::vec::Vec;
use std::io::{Read, Seek, SeekFrom};

use crate::dds::format::Fixup;
use crate::dds::size::SurfaceLayout;
use crate::error::DdsError;

/// Reads level payloads out of a DDS stream.
///
/// Every read seeks to its own offset, so levels can be fetched in any order.
/// The scratch buffer lives as long as the reader and only backs formats
/// whose stored pixels are narrower than the delivered ones.
pub struct LevelReader<'a, R: ?Sized> {
    reader: &'a mut R,
    payload_start: u64,
    layout: &'a SurfaceLayout,
    fixup: Fixup,
    scratch: Vec<u8>,
}

impl<'a, R: Read + Seek + ?Sized> LevelReader<'a, R> {
    /// `payload_start` is the absolute stream position just past the
    /// 128-byte preamble.
    pub fn new(reader: &'a mut R, payload_start: u64, layout: &'a SurfaceLayout) -> Self {
        Self {
            reader,
            payload_start,
            layout,
            fixup: layout.format().fixup(),
            scratch: Vec::new(),
        }
    }

    /// Bytes delivered for one (target, level) pair after fixups.
    pub fn output_size(&self, level: u32) -> usize {
        self.fixup.output_len(self.layout.read_size(level))
    }

    /// Read one (target, level) payload into `out`, which must be exactly
    /// [`output_size`](Self::output_size) bytes.
    pub fn read_into(&mut self, target: u32, level: u32, out: &mut [u8]) -> Result<(), DdsError> {
        let offset = self.layout.offset_of(target, level)?;
        let stored = self.layout.read_size(level);
        let expected = self.fixup.output_len(stored);
        if out.len() != expected {
            return Err(DdsError::BufferSize {
                expected,
                actual: out.len(),
            });
        }

        let position = self.payload_start.checked_add(offset as u64).ok_or_else(|| {
            DdsError::Stream(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "payload offset overflows u64",
            ))
        })?;
        self.reader.seek(SeekFrom::Start(position))?;
        log::trace!("DDS read target {target} level {level}: {stored} bytes at {position}");

        if self.fixup.expand_rgb {
            self.scratch.clear();
            self.scratch.resize(stored, 0);
            self.reader.read_exact(&mut self.scratch)?;
            expand_rgb(&self.scratch, out);
        } else {
            self.reader.read_exact(out)?;
        }
        fix_in_place(self.fixup, out);
        Ok(())
    }

    /// Read one (target, level) payload into a fresh buffer.
    pub fn read(&mut self, target: u32, level: u32) -> Result<Vec<u8>, DdsError> {
        let mut out = alloc::vec![0u8; self.output_size(level)];
        self.read_into(target, level, &mut out)?;
        Ok(out)
    }
}

/// 3-byte pixels to 4-byte pixels with an opaque fourth byte.
fn expand_rgb(input: &[u8], out: &mut [u8]) {
    for (src, dst) in input.chunks_exact(3).zip(out.chunks_exact_mut(4)) {
        dst[..3].copy_from_slice(src);
        dst[3] = 0xFF;
    }
}

/// Red/blue swap and alpha fill over 4-byte pixels.
fn fix_in_place(fixup: Fixup, pixels: &mut [u8]) {
    if !fixup.swap_red_blue && !fixup.force_alpha {
        return;
    }
    for px in pixels.chunks_exact_mut(4) {
        if fixup.swap_red_blue {
            px.swap(0, 2);
        }
        if fixup.force_alpha {
            px[3] = 0xFF;
        }
    }
}
