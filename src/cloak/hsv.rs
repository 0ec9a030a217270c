use image::{Rgb, RgbImage};

/// Frame converted to HSV. Same buffer shape as the RGB frame: channel 0
/// holds hue on the 0-179 scale, channels 1 and 2 hold saturation and
/// value on 0-255.
pub type HsvImage = RgbImage;

/// Convert a single RGB pixel to 8-bit HSV.
///
/// Hue is computed in degrees and halved to fit the 0-179 scale that the
/// color registry bounds use.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v == 0.0 { 0.0 } else { diff * 255.0 / v };

    let h = if diff == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    // Rounding can land exactly on 180, which wraps to hue 0.
    let h = ((h / 2.0).round() as u16 % 180) as u8;

    [h, s.round() as u8, v as u8]
}

/// Convert a whole frame to HSV. Computed fresh each iteration and never
/// retained across frames.
pub fn to_hsv(frame: &RgbImage) -> HsvImage {
    HsvImage::from_fn(frame.width(), frame.height(), |x, y| {
        let p = frame.get_pixel(x, y);
        Rgb(rgb_to_hsv(p[0], p[1], p[2]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
    }

    #[test]
    fn neutral_gray_has_zero_saturation() {
        assert_eq!(rgb_to_hsv(150, 150, 150), [0, 0, 150]);
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    }

    #[test]
    fn red_with_a_touch_of_blue_lands_in_the_wrap_range() {
        let [h, s, v] = rgb_to_hsv(255, 0, 10);
        assert!((170..180).contains(&h), "hue {h} should sit near the wrap");
        assert_eq!(s, 255);
        assert_eq!(v, 255);
    }

    #[test]
    fn frame_conversion_preserves_dimensions() {
        let frame = RgbImage::from_pixel(17, 9, Rgb([30, 60, 90]));
        let hsv = to_hsv(&frame);
        assert_eq!(hsv.dimensions(), (17, 9));
        assert_eq!(hsv.get_pixel(0, 0).0, rgb_to_hsv(30, 60, 90));
    }
}
