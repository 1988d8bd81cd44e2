use crate::coords::Point;

use super::ColorInt;

/// Gradient behavior outside the [0, 1] parameter range.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TileMode {
    /// Clamp to the edge colors.
    #[default]
    Clamp,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Mirror,
}

impl TileMode {
    /// Maps an unbounded gradient parameter into [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        match self {
            TileMode::Clamp => t.clamp(0.0, 1.0),
            TileMode::Repeat => t - t.floor(),
            TileMode::Mirror => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// Linear gradient shader descriptor in device pixel space.
///
/// Semantics:
/// - the gradient axis runs from `start` to `end`.
/// - `positions`, when present, pairs one parameter with each color.
///   When absent, colors are spread evenly along the axis.
/// - `tile_mode` defines out-of-range behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradientShader {
    pub start: Point,
    pub end: Point,
    pub colors: Vec<ColorInt>,
    pub positions: Option<Vec<f32>>,
    pub tile_mode: TileMode,
}

impl LinearGradientShader {
    pub fn new(
        start: Point,
        end: Point,
        colors: Vec<ColorInt>,
        positions: Option<Vec<f32>>,
        tile_mode: TileMode,
    ) -> Self {
        Self {
            start,
            end,
            colors,
            positions,
            tile_mode,
        }
    }

    /// Returns true when a renderer can build this shader as-is.
    ///
    /// Needs at least two colors, a non-degenerate axis, and a position per
    /// color when positions are given.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.start != self.end
            && self.colors.len() >= 2
            && self
                .positions
                .as_ref()
                .is_none_or(|p| p.len() == self.colors.len() && p.iter().all(|t| t.is_finite()))
    }

    /// Parameter of `p` projected onto the gradient axis (0 at `start`, 1 at `end`).
    ///
    /// A degenerate axis maps every point to 0.
    pub fn param_at(&self, p: Point) -> f32 {
        let axis = self.end - self.start;
        let len2 = axis.dot(axis);
        if len2 <= 0.0 {
            return 0.0;
        }
        (p - self.start).dot(axis) / len2
    }

    /// Evaluates the gradient color at parameter `t`, after applying the tile mode.
    ///
    /// An empty color list evaluates to transparent.
    pub fn color_at(&self, t: f32) -> ColorInt {
        let n = self.colors.len();
        match n {
            0 => return ColorInt::TRANSPARENT,
            1 => return self.colors[0],
            _ => {}
        }

        let t = self.tile_mode.apply(t);
        let pos = |i: usize| -> f32 {
            match &self.positions {
                Some(p) => p.get(i).copied().unwrap_or(1.0),
                None => i as f32 / (n - 1) as f32,
            }
        };

        if t <= pos(0) {
            return self.colors[0];
        }
        for i in 1..n {
            let (lo, hi) = (pos(i - 1), pos(i));
            if t <= hi {
                let span = hi - lo;
                let local = if span > 0.0 { (t - lo) / span } else { 1.0 };
                return self.colors[i - 1].lerp(self.colors[i], local);
            }
        }
        self.colors[n - 1]
    }
}

/// Shader produced from a gradient resource.
///
/// Radial and sweep variants get added here once their geometry is defined.
#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    LinearGradient(LinearGradientShader),
}

impl Shader {
    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Shader::LinearGradient(g) => g.colors.iter().all(|c| c.is_opaque()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_to_blue(positions: Option<Vec<f32>>) -> LinearGradientShader {
        LinearGradientShader::new(
            Point::zero(),
            Point::new(100.0, 0.0),
            vec![ColorInt::RED, ColorInt::BLUE],
            positions,
            TileMode::Clamp,
        )
    }

    // ── TileMode ──────────────────────────────────────────────────────────

    #[test]
    fn clamp_pins_to_edges() {
        assert_eq!(TileMode::Clamp.apply(-0.5), 0.0);
        assert_eq!(TileMode::Clamp.apply(1.5), 1.0);
        assert_eq!(TileMode::Clamp.apply(0.25), 0.25);
    }

    #[test]
    fn repeat_wraps() {
        assert_eq!(TileMode::Repeat.apply(1.25), 0.25);
        assert_eq!(TileMode::Repeat.apply(-0.25), 0.75);
    }

    #[test]
    fn mirror_reflects() {
        assert_eq!(TileMode::Mirror.apply(1.25), 0.75);
        assert_eq!(TileMode::Mirror.apply(2.25), 0.25);
        assert_eq!(TileMode::Mirror.apply(-0.25), 0.25);
    }

    // ── is_valid ──────────────────────────────────────────────────────────

    #[test]
    fn valid_two_color_gradient() {
        assert!(red_to_blue(None).is_valid());
    }

    #[test]
    fn invalid_degenerate_axis() {
        let mut g = red_to_blue(None);
        g.end = g.start;
        assert!(!g.is_valid());
    }

    #[test]
    fn invalid_position_count_mismatch() {
        assert!(!red_to_blue(Some(vec![0.0])).is_valid());
    }

    #[test]
    fn invalid_single_color() {
        let mut g = red_to_blue(None);
        g.colors.pop();
        assert!(!g.is_valid());
    }

    // ── param_at ──────────────────────────────────────────────────────────

    #[test]
    fn param_projects_onto_axis() {
        let g = red_to_blue(None);
        assert_eq!(g.param_at(Point::new(25.0, 40.0)), 0.25);
        assert_eq!(g.param_at(Point::new(150.0, 0.0)), 1.5);
    }

    #[test]
    fn param_degenerate_axis_is_zero() {
        let mut g = red_to_blue(None);
        g.end = g.start;
        assert_eq!(g.param_at(Point::new(10.0, 10.0)), 0.0);
    }

    // ── color_at ──────────────────────────────────────────────────────────

    #[test]
    fn even_spacing_without_positions() {
        let g = LinearGradientShader::new(
            Point::zero(),
            Point::new(1.0, 0.0),
            vec![ColorInt::RED, ColorInt::GREEN, ColorInt::BLUE],
            None,
            TileMode::Clamp,
        );
        assert_eq!(g.color_at(0.0), ColorInt::RED);
        assert_eq!(g.color_at(0.5), ColorInt::GREEN);
        assert_eq!(g.color_at(1.0), ColorInt::BLUE);
    }

    #[test]
    fn explicit_positions_shift_stops() {
        let g = red_to_blue(Some(vec![0.5, 1.0]));
        // Everything before the first stop takes the first color.
        assert_eq!(g.color_at(0.25), ColorInt::RED);
        assert_eq!(g.color_at(0.75), ColorInt::RED.lerp(ColorInt::BLUE, 0.5));
    }

    #[test]
    fn clamp_outside_range() {
        let g = red_to_blue(None);
        assert_eq!(g.color_at(-3.0), ColorInt::RED);
        assert_eq!(g.color_at(3.0), ColorInt::BLUE);
    }

    #[test]
    fn empty_and_single_color() {
        let mut g = red_to_blue(None);
        g.colors.clear();
        assert_eq!(g.color_at(0.5), ColorInt::TRANSPARENT);
        g.colors.push(ColorInt::GREEN);
        assert_eq!(g.color_at(0.5), ColorInt::GREEN);
    }

    #[test]
    fn opacity_follows_colors() {
        let mut g = red_to_blue(None);
        assert!(Shader::LinearGradient(g.clone()).is_opaque());
        g.colors.push(ColorInt(0x80FF_FFFF));
        assert!(!Shader::LinearGradient(g).is_opaque());
    }
}
