use crate::error::CloakError;

/// One inclusive HSV range. Hue is on the 8-bit scale (0-179),
/// saturation and value are 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvBounds {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Inclusive per-channel in-range test.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }
}

/// HSV ranges describing one cloak color.
///
/// Red carries two ranges because its hue wraps at the 0/180 boundary;
/// the mask builder ORs the per-range masks together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorProfile {
    pub name: &'static str,
    pub bounds: &'static [HsvBounds],
}

/// Registry of supported cloak colors. Values are a good starting point
/// for typical indoor lighting; shiny or washed-out cloth may need wider
/// saturation ranges.
const PROFILES: &[ColorProfile] = &[
    ColorProfile {
        name: "red",
        bounds: &[
            HsvBounds::new([0, 120, 70], [10, 255, 255]),
            HsvBounds::new([170, 120, 70], [180, 255, 255]),
        ],
    },
    ColorProfile {
        name: "green",
        bounds: &[HsvBounds::new([35, 80, 40], [85, 255, 255])],
    },
    ColorProfile {
        name: "blue",
        bounds: &[HsvBounds::new([100, 80, 50], [130, 255, 255])],
    },
    ColorProfile {
        name: "yellow",
        bounds: &[HsvBounds::new([20, 80, 50], [30, 255, 255])],
    },
    ColorProfile {
        name: "purple",
        bounds: &[HsvBounds::new([140, 80, 50], [170, 255, 255])],
    },
    ColorProfile {
        name: "orange",
        bounds: &[HsvBounds::new([5, 100, 100], [20, 255, 255])],
    },
    ColorProfile {
        name: "cyan",
        bounds: &[HsvBounds::new([85, 50, 50], [100, 255, 255])],
    },
    ColorProfile {
        name: "pink",
        bounds: &[HsvBounds::new([150, 50, 100], [170, 255, 255])],
    },
    // White is low saturation at high value, black is low value at any
    // saturation; both span the full hue range.
    ColorProfile {
        name: "white",
        bounds: &[HsvBounds::new([0, 0, 200], [179, 30, 255])],
    },
    ColorProfile {
        name: "black",
        bounds: &[HsvBounds::new([0, 0, 0], [179, 255, 50])],
    },
];

/// Names accepted by [`get_profile`], in registry order.
pub fn supported_colors() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|p| p.name)
}

/// Look up a cloak color by name.
pub fn get_profile(name: &str) -> Result<ColorProfile, CloakError> {
    PROFILES
        .iter()
        .copied()
        .find(|p| p.name == name)
        .ok_or_else(|| CloakError::UnknownColor(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_color_has_at_least_one_range() {
        for name in supported_colors() {
            let profile = get_profile(name).unwrap();
            assert!(!profile.bounds.is_empty(), "{name} has no ranges");
        }
    }

    #[test]
    fn red_has_two_ranges_for_hue_wrap() {
        assert_eq!(get_profile("red").unwrap().bounds.len(), 2);
    }

    #[test]
    fn non_red_colors_have_exactly_one_range() {
        for name in supported_colors().filter(|n| *n != "red") {
            assert_eq!(
                get_profile(name).unwrap().bounds.len(),
                1,
                "{name} should have one range"
            );
        }
    }

    #[test]
    fn registry_covers_ten_colors() {
        assert_eq!(supported_colors().count(), 10);
    }

    #[test]
    fn unknown_color_is_rejected() {
        let err = get_profile("mauve").unwrap_err();
        assert!(matches!(err, CloakError::UnknownColor(name) if name == "mauve"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = HsvBounds::new([35, 80, 40], [85, 255, 255]);
        assert!(bounds.contains([35, 80, 40]));
        assert!(bounds.contains([85, 255, 255]));
        assert!(!bounds.contains([34, 80, 40]));
        assert!(!bounds.contains([86, 255, 255]));
        assert!(!bounds.contains([60, 79, 128]));
    }
}
