//! Display density and dimension unit conversion.

/// Baseline density in dots per inch; one dip equals one pixel at this density.
pub const DENSITY_DPI_DEFAULT: u32 = 160;

/// Physical characteristics of the target display.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayMetrics {
    /// Pixels per density-independent pixel.
    pub density: f32,
    /// Like `density`, scaled by the user's font size preference.
    pub scaled_density: f32,
    pub xdpi: f32,
    pub ydpi: f32,
}

impl DisplayMetrics {
    pub fn from_density_dpi(dpi: u32) -> Self {
        let density = dpi as f32 / DENSITY_DPI_DEFAULT as f32;
        Self {
            density,
            scaled_density: density,
            xdpi: dpi as f32,
            ydpi: dpi as f32,
        }
    }

    pub fn with_font_scale(mut self, scale: f32) -> Self {
        self.scaled_density = self.density * scale;
        self
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::from_density_dpi(DENSITY_DPI_DEFAULT)
    }
}

/// Unit a raw dimension value is expressed in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComplexUnit {
    Px,
    Dip,
    Sp,
    Pt,
    In,
    Mm,
}

/// Converts `value` in `unit` to device pixels.
pub fn apply_dimension(unit: ComplexUnit, value: f32, metrics: &DisplayMetrics) -> f32 {
    match unit {
        ComplexUnit::Px => value,
        ComplexUnit::Dip => value * metrics.density,
        ComplexUnit::Sp => value * metrics.scaled_density,
        ComplexUnit::Pt => value * metrics.xdpi * (1.0 / 72.0),
        ComplexUnit::In => value * metrics.xdpi,
        ComplexUnit::Mm => value * metrics.xdpi * (1.0 / 25.4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_mdpi() {
        let m = DisplayMetrics::default();
        assert_eq!(m.density, 1.0);
        assert_eq!(apply_dimension(ComplexUnit::Dip, 24.0, &m), 24.0);
    }

    #[test]
    fn dip_scales_with_density() {
        let xhdpi = DisplayMetrics::from_density_dpi(320);
        assert_eq!(apply_dimension(ComplexUnit::Dip, 10.0, &xhdpi), 20.0);
        assert_eq!(apply_dimension(ComplexUnit::Px, 10.0, &xhdpi), 10.0);
    }

    #[test]
    fn sp_follows_font_scale() {
        let m = DisplayMetrics::from_density_dpi(240).with_font_scale(2.0);
        assert_eq!(apply_dimension(ComplexUnit::Sp, 10.0, &m), 30.0);
    }

    #[test]
    fn physical_units_use_xdpi() {
        let m = DisplayMetrics::from_density_dpi(144);
        assert_eq!(apply_dimension(ComplexUnit::In, 1.0, &m), 144.0);
        assert!((apply_dimension(ComplexUnit::Pt, 72.0, &m) - 144.0).abs() < 1e-3);
        assert!((apply_dimension(ComplexUnit::Mm, 25.4, &m) - 144.0).abs() < 1e-3);
    }
}
