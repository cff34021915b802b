/// Canvas settings shared by the preview and the export
///
/// Both values apply to all three slots at once. They live only for the
/// session; nothing here is written to disk.
use std::fmt;

/// Canvas aspect ratio (width / height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    SixteenToNine,
    FourToThree,
    Square,
    ThreeToTwo,
}

impl AspectRatio {
    /// All ratios, in the order the picker shows them
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::SixteenToNine,
        AspectRatio::FourToThree,
        AspectRatio::Square,
        AspectRatio::ThreeToTwo,
    ];

    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::SixteenToNine => 16.0 / 9.0,
            AspectRatio::FourToThree => 4.0 / 3.0,
            AspectRatio::Square => 1.0,
            AspectRatio::ThreeToTwo => 3.0 / 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::SixteenToNine => "16:9",
            AspectRatio::FourToThree => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::ThreeToTwo => "3:2",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uniform image scale, always within [`Scale::MIN`, `Scale::MAX`] on a
/// [`Scale::STEP`] grid
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Scale(f64);

impl Scale {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;
    pub const STEP: f64 = 0.1;
    pub const DEFAULT: f64 = 0.8;

    /// Clamp into range and snap to the nearest step.
    ///
    /// Non-finite input falls back to the default.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let steps = (value.clamp(Self::MIN, Self::MAX) / Self::STEP).round();
        Self((steps * Self::STEP).clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

/// Everything besides the slot contents that shapes the composed canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    pub aspect_ratio: AspectRatio,
    pub scale: Scale,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.aspect_ratio, AspectRatio::SixteenToNine);
        assert!(approx(settings.scale.get(), 0.8));
    }

    #[test]
    fn test_ratio_values() {
        assert!(approx(AspectRatio::SixteenToNine.ratio(), 16.0 / 9.0));
        assert!(approx(AspectRatio::FourToThree.ratio(), 4.0 / 3.0));
        assert!(approx(AspectRatio::Square.ratio(), 1.0));
        assert!(approx(AspectRatio::ThreeToTwo.ratio(), 1.5));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = AspectRatio::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(labels, ["16:9", "4:3", "1:1", "3:2"]);
    }

    #[test]
    fn test_scale_clamps_to_range() {
        assert!(approx(Scale::new(0.1).get(), 0.5));
        assert!(approx(Scale::new(-3.0).get(), 0.5));
        assert!(approx(Scale::new(5.0).get(), 2.0));
        assert!(approx(Scale::new(f64::NAN).get(), Scale::DEFAULT));
        assert!(approx(Scale::new(f64::INFINITY).get(), Scale::DEFAULT));
    }

    #[test]
    fn test_scale_snaps_to_step() {
        assert!(approx(Scale::new(0.84).get(), 0.8));
        assert!(approx(Scale::new(0.86).get(), 0.9));
        assert!(approx(Scale::new(1.0).get(), 1.0));
    }

    #[test]
    fn test_scale_display() {
        assert_eq!(Scale::new(1.5).to_string(), "1.5x");
        assert_eq!(Scale::default().to_string(), "0.8x");
    }
}
