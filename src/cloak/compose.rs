use image::{GrayImage, RgbImage};

use crate::error::CloakError;

/// Merge the live frame and the stored background under the cloak mask.
///
/// Where the mask is set the background shows through; everywhere else
/// the live frame is kept. The two regions are mutually exclusive and
/// exhaustive, so the merge is an exact per-pixel selection with a hard
/// cutoff at mask edges; no feathering is applied.
pub fn compose(
    current: &RgbImage,
    background: &RgbImage,
    mask: &GrayImage,
) -> Result<RgbImage, CloakError> {
    let dims = current.dimensions();
    if background.dimensions() != dims || mask.dimensions() != dims {
        return Err(CloakError::DimensionMismatch {
            current: dims,
            background: background.dimensions(),
            mask: mask.dimensions(),
        });
    }

    Ok(RgbImage::from_fn(dims.0, dims.1, |x, y| {
        if mask.get_pixel(x, y)[0] != 0 {
            *background.get_pixel(x, y)
        } else {
            *current.get_pixel(x, y)
        }
    }))
}
