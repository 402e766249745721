//! Flat / cube / volume classification from the caps words.

use crate::dds::header::{Caps, Caps2};
use crate::error::DdsError;

/// What a DDS payload holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One image with its mip chain.
    Flat,
    /// Six faces, each with its own mip chain, stored in [`CubeFace::ALL`] order.
    Cube,
    /// A stack of depth slices; every mip level halves depth as well.
    Volume,
}

impl Shape {
    /// Classify a header's caps words.
    ///
    /// Cube needs both `DDSCAPS_COMPLEX` and `DDSCAPS2_CUBEMAP`; volume needs
    /// `DDSCAPS2_VOLUME`. Everything else is flat.
    pub fn classify(caps: Caps, caps2: Caps2) -> Shape {
        if caps.contains(Caps::COMPLEX) && caps2.contains(Caps2::CUBEMAP) {
            Shape::Cube
        } else if caps2.contains(Caps2::VOLUME) {
            Shape::Volume
        } else {
            Shape::Flat
        }
    }

    /// Number of independent mip chains (targets) stored back to back.
    ///
    /// Volumes interleave slices inside each level instead, so they report 1.
    pub fn chain_count(self) -> u32 {
        match self {
            Shape::Cube => 6,
            Shape::Flat | Shape::Volume => 1,
        }
    }
}

/// Fail with [`DdsError::ShapeMismatch`] if the caller asked for a different
/// shape than the file holds. `None` accepts any shape.
pub fn check_requested(requested: Option<Shape>, actual: Shape) -> Result<(), DdsError> {
    match requested {
        Some(requested) if requested != actual => {
            Err(DdsError::ShapeMismatch { requested, actual })
        }
        _ => Ok(()),
    }
}

/// Reject cube sets that only store some of their faces.
///
/// Writers that set `DDSCAPS2_CUBEMAP` without any face bit are common
/// enough that this is read as "all six".
pub(crate) fn check_cube_faces(caps2: Caps2) -> Result<(), DdsError> {
    let faces = caps2 & Caps2::CUBEMAP_ALL_FACES;
    if faces == Caps2::CUBEMAP_ALL_FACES {
        Ok(())
    } else if faces.is_empty() {
        log::warn!("DDS cube map without face flags, assuming all six faces");
        Ok(())
    } else {
        Err(DdsError::NotSupported(alloc::format!(
            "partial cube map (faces {:#x})",
            faces.bits()
        )))
    }
}

/// Cube faces in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Position of this face in the payload (0..6).
    pub fn index(self) -> u32 {
        self as u32
    }
}
