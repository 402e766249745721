//! Source layout → destination surface format.

use crate::dds::format::SourceFormat;
use crate::error::DdsError;
use crate::pixel::{SurfaceFormat, SurfaceSupport};

/// Map a resolved source layout to the surface format the decoded bytes are
/// delivered in.
///
/// All 8-bit-per-channel layouts collapse onto [`SurfaceFormat::Bgra8`]; the
/// extractor's fixups have already put their bytes in B, G, R, A order with
/// opaque alpha where the source had none.
pub fn surface_format(
    source: SourceFormat,
    support: &SurfaceSupport,
) -> Result<SurfaceFormat, DdsError> {
    use SourceFormat as S;
    use SurfaceFormat as T;

    let target = match source {
        S::R8G8B8 | S::B8G8R8 | S::A8R8G8B8 | S::X8R8G8B8 | S::A8B8G8R8 | S::X8B8G8R8 => {
            T::Bgra8
        }
        S::R5G6B5 => T::B5G6R5,
        S::A1R5G5B5 => T::Bgr5A1,
        S::X1R5G5B5 => T::Bgr5X1,
        S::A4R4G4B4 => T::Bgra4,
        S::X4R4G4B4 => T::Bgrx4,
        S::A2B10G10R10 => T::Rgb10A2,
        S::A2R10G10B10 => T::Bgr10A2,
        S::G16R16 => T::Rg16,
        S::A16B16G16R16 => T::Rgba16,
        S::Q16W16V16U16 => T::Rgba16Snorm,
        S::CxV8U8 => T::Rg8Snorm,
        S::R16F => T::R16F,
        S::G16R16F => T::Rg16F,
        S::A16B16G16R16F => T::Rgba16F,
        S::R32F => T::R32F,
        S::G32R32F => T::Rg32F,
        S::A32B32G32R32F => T::Rgba32F,
        S::Dxt1 => T::Bc1,
        S::Dxt2 | S::Dxt3 => T::Bc2,
        S::Dxt4 | S::Dxt5 => T::Bc3,
    };

    if !support.supports(target) {
        return Err(DdsError::NotRepresentable(source));
    }
    Ok(target)
}
