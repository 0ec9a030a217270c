use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, open};

use super::color::ColorProfile;
use super::hsv::HsvImage;

/// Build the binary cloak mask for one HSV frame.
///
/// A pixel is set (255) when any of the profile's ranges contains it.
/// The raw mask is then opened with a 3x3 element for 2 iterations to
/// drop speckle noise, and dilated once to close the small gaps the
/// opening leaves behind. Deterministic for a given input.
pub fn build_mask(hsv: &HsvImage, profile: &ColorProfile) -> GrayImage {
    let raw = GrayImage::from_fn(hsv.width(), hsv.height(), |x, y| {
        let p = hsv.get_pixel(x, y);
        let px = [p[0], p[1], p[2]];
        if profile.bounds.iter().any(|b| b.contains(px)) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    // Norm::LInf with k=2 is a 5x5 square element, the same result as
    // two passes of a 3x3 element.
    let opened = open(&raw, Norm::LInf, 2);
    dilate(&opened, Norm::LInf, 1)
}

/// Fraction of mask pixels that are set, as a percentage.
pub fn coverage_percent(mask: &GrayImage) -> f32 {
    let total = (mask.width() * mask.height()) as f32;
    if total == 0.0 {
        return 0.0;
    }
    let set = mask.pixels().filter(|p| p[0] > 0).count() as f32;
    set * 100.0 / total
}
