use super::{ColorInt, Shader};

/// Fill state of a drawable path: a solid color, optionally overridden by a shader.
///
/// Invariant: setting a fill color drops any shader, so the last call wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    color: ColorInt,
    /// Multiplied into the color's alpha channel. Not applied to shaders.
    alpha: f32,
    shader: Option<Shader>,
}

/// What a renderer should fill with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FillSource<'a> {
    Shader(&'a Shader),
    Color(ColorInt),
}

impl Fill {
    pub fn new() -> Self {
        Self { color: ColorInt::TRANSPARENT, alpha: 1.0, shader: None }
    }

    pub fn color(&self) -> ColorInt {
        self.color
    }

    pub fn set_color(&mut self, color: ColorInt) {
        self.shader = None;
        self.color = color;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn shader(&self) -> Option<&Shader> {
        self.shader.as_ref()
    }

    pub fn set_shader(&mut self, shader: Shader) {
        self.shader = Some(shader);
    }

    /// Resolves the paint source. A shader takes precedence over the color;
    /// a transparent color with no shader draws nothing.
    pub fn source(&self) -> Option<FillSource<'_>> {
        match &self.shader {
            Some(shader) => Some(FillSource::Shader(shader)),
            None if self.color == ColorInt::TRANSPARENT => None,
            None => Some(FillSource::Color(apply_alpha(self.color, self.alpha))),
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::new()
    }
}

/// Scales the alpha channel of `color` by `alpha`, truncating.
fn apply_alpha(color: ColorInt, alpha: f32) -> ColorInt {
    let a = (color.alpha() as f32 * alpha) as u8;
    ColorInt((color.0 & 0x00FF_FFFF) | ((a as u32) << 24))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point;
    use crate::paint::{LinearGradientShader, TileMode};

    fn gradient() -> Shader {
        Shader::LinearGradient(LinearGradientShader::new(
            Point::zero(),
            Point::new(10.0, 0.0),
            vec![ColorInt::RED, ColorInt::BLUE],
            None,
            TileMode::Clamp,
        ))
    }

    #[test]
    fn default_draws_nothing() {
        assert_eq!(Fill::default().source(), None);
    }

    #[test]
    fn shader_wins_over_color() {
        let mut fill = Fill::new();
        fill.set_color(ColorInt::GREEN);
        fill.set_shader(gradient());
        assert_eq!(fill.source(), Some(FillSource::Shader(&gradient())));
        assert_eq!(fill.color(), ColorInt::GREEN);
    }

    #[test]
    fn shader_drawn_even_with_transparent_color() {
        let mut fill = Fill::new();
        fill.set_shader(gradient());
        assert!(matches!(fill.source(), Some(FillSource::Shader(_))));
    }

    #[test]
    fn setting_color_clears_shader() {
        let mut fill = Fill::new();
        fill.set_shader(gradient());
        fill.set_color(ColorInt::RED);
        assert_eq!(fill.shader(), None);
        assert_eq!(fill.source(), Some(FillSource::Color(ColorInt::RED)));
    }

    #[test]
    fn setting_transparent_color_clears_shader_and_draws_nothing() {
        let mut fill = Fill::new();
        fill.set_shader(gradient());
        fill.set_color(ColorInt::TRANSPARENT);
        assert_eq!(fill.source(), None);
    }

    #[test]
    fn alpha_scales_color_only() {
        let mut fill = Fill::new();
        fill.set_color(ColorInt::RED);
        fill.set_alpha(0.5);
        // 255 * 0.5 = 127.5 truncates to 127
        assert_eq!(fill.source(), Some(FillSource::Color(ColorInt(0x7FFF_0000))));
        fill.set_shader(gradient());
        assert_eq!(fill.source(), Some(FillSource::Shader(&gradient())));
    }
}
