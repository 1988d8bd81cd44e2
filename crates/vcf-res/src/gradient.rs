//! `<gradient>` color resources.
//!
//! ```xml
//! <gradient xmlns:android="http://schemas.android.com/apk/res/android"
//!     android:startX="0" android:startY="0"
//!     android:endX="100" android:endY="0"
//!     android:type="linear">
//!   <item android:color="#FFFF0000" android:offset="0.0"/>
//!   <item android:color="#FF0000FF" android:offset="1.0"/>
//! </gradient>
//! ```

use std::fmt;

use vcf_engine::coords::Point;
use vcf_engine::paint::{ColorInt, LinearGradientShader, Shader, TileMode};

use crate::attrs::{AttrDef, AttributeSet, Styleable};
use crate::cursor::{EventKind, XmlCursor};
use crate::density::{ComplexUnit, DisplayMetrics, apply_dimension};
use crate::error::{InflateError, ShaderError};
use crate::resources::{ResourceId, Resources};
use crate::theme::{StyledAttributes, Theme};

const ROOT_TAG: &str = "gradient";
const ITEM_TAG: &str = "item";

static GRADIENT_COLOR: Styleable = Styleable {
    name: "GradientColor",
    attrs: &[
        AttrDef { name: "startX", enum_values: &[] },
        AttrDef { name: "startY", enum_values: &[] },
        AttrDef { name: "endX", enum_values: &[] },
        AttrDef { name: "endY", enum_values: &[] },
        AttrDef { name: "type", enum_values: &[("linear", 0), ("radial", 1), ("sweep", 2)] },
    ],
};

static GRADIENT_COLOR_ITEM: Styleable = Styleable {
    name: "GradientColorItem",
    attrs: &[
        AttrDef { name: "color", enum_values: &[] },
        AttrDef { name: "offset", enum_values: &[] },
    ],
};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
    Sweep,
}

impl GradientType {
    /// Maps the `android:type` code. Unknown codes are treated as linear.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => GradientType::Linear,
            1 => GradientType::Radial,
            2 => GradientType::Sweep,
            _ => GradientType::Linear,
        }
    }
}

impl fmt::Display for GradientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GradientType::Linear => "linear",
            GradientType::Radial => "radial",
            GradientType::Sweep => "sweep",
        })
    }
}

/// One `<item>`: a color and where it sits along the gradient axis.
///
/// `offset` is nominally in [0, 1] but is kept exactly as written.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientItem {
    pub color: ColorInt,
    pub offset: f32,
}

/// A parsed `<gradient>` resource.
///
/// Built once by one of the `create_from_*` constructors and read-only after.
/// `start`/`end` are in device pixels and only meaningful for linear gradients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientColor {
    start: Point,
    end: Point,
    gradient_type: GradientType,
    items: Vec<GradientItem>,
}

impl GradientColor {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn gradient_type(&self) -> GradientType {
        self.gradient_type
    }

    /// Items in document order. Duplicated offsets are kept.
    pub fn items(&self) -> &[GradientItem] {
        &self.items
    }

    /// Loads the gradient resource `id`, or `None` if it cannot be loaded.
    ///
    /// The reason for a failure is logged; use [`try_create_from_xml`](Self::try_create_from_xml)
    /// to get it as a value.
    pub fn create_from_xml(res: &Resources, id: ResourceId, theme: &Theme<'_>) -> Option<Self> {
        match Self::try_create_from_xml(res, id, theme) {
            Ok(gradient) => Some(gradient),
            Err(err) => {
                log::warn!("failed to inflate gradient color {id}: {err}");
                None
            }
        }
    }

    pub fn try_create_from_xml(
        res: &Resources,
        id: ResourceId,
        theme: &Theme<'_>,
    ) -> Result<Self, InflateError> {
        let mut parser = res.get_xml(id)?;
        Self::create_from_cursor(&mut parser, theme, res.display_metrics())
    }

    /// Inflates from a cursor positioned anywhere before the root start tag.
    pub fn create_from_cursor<C: XmlCursor>(
        parser: &mut C,
        theme: &Theme<'_>,
        metrics: &DisplayMetrics,
    ) -> Result<Self, InflateError> {
        let mut event = parser.event();
        while event != EventKind::StartTag && event != EventKind::EndDocument {
            event = parser.next()?;
        }
        if event != EventKind::StartTag {
            return Err(InflateError::MalformedDocument);
        }
        Self::create_from_xml_inner(parser, theme, metrics)
    }

    fn create_from_xml_inner<C: XmlCursor>(
        parser: &mut C,
        theme: &Theme<'_>,
        metrics: &DisplayMetrics,
    ) -> Result<Self, InflateError> {
        let name = parser.name().unwrap_or_default();
        if name != ROOT_TAG {
            return Err(InflateError::UnexpectedRootTag {
                tag: name.to_string(),
                position: parser.position_description(),
            });
        }
        let mut gradient = Self::default();
        gradient.inflate(parser, theme, metrics)?;
        log::debug!(
            "inflated {} gradient {} -> {} with {} items",
            gradient.gradient_type,
            gradient.start,
            gradient.end,
            gradient.items.len()
        );
        Ok(gradient)
    }

    fn inflate<C: XmlCursor>(
        &mut self,
        parser: &mut C,
        theme: &Theme<'_>,
        metrics: &DisplayMetrics,
    ) -> Result<(), InflateError> {
        // Held open until the children are read; dropped on every exit.
        let a = theme.obtain_styled_attributes(parser.attributes(), &GRADIENT_COLOR);
        self.start.x = dp_to_px(&a, "startX", self.start.x, metrics);
        self.start.y = dp_to_px(&a, "startY", self.start.y, metrics);
        self.end.x = dp_to_px(&a, "endX", self.end.x, metrics);
        self.end.y = dp_to_px(&a, "endY", self.end.y, metrics);
        self.gradient_type = GradientType::from_code(a.get_int("type", 0));
        self.inflate_items(parser, theme)
    }

    /// Collects every `<item>` until the root's end tag. Other tags, and anything
    /// nested inside them, are stepped over.
    fn inflate_items<C: XmlCursor>(&mut self, parser: &mut C, theme: &Theme<'_>) -> Result<(), InflateError> {
        let mut event = parser.event();
        let inner_depth = parser.depth() + 1;
        while event != EventKind::EndDocument
            && (parser.depth() >= inner_depth || event != EventKind::EndTag)
        {
            if event == EventKind::StartTag && parser.name() == Some(ITEM_TAG) {
                self.inflate_item(parser.attributes(), theme);
            }
            event = parser.next()?;
        }
        Ok(())
    }

    fn inflate_item(&mut self, set: &AttributeSet, theme: &Theme<'_>) {
        let a = theme.obtain_styled_attributes(set, &GRADIENT_COLOR_ITEM);
        let item = GradientItem {
            color: a.get_color("color", ColorInt::BLACK),
            offset: a.get_float("offset", 0.0),
        };
        log::trace!("gradient item {} at {}", item.color, item.offset);
        self.items.push(item);
    }

    /// Builds the shader this gradient describes.
    ///
    /// Linear gradients spread their colors evenly along the axis: item
    /// offsets are not passed as positions. Radial and sweep geometry is not
    /// modelled yet, so those types always fail.
    pub fn derive_shader(&self) -> Result<Shader, ShaderError> {
        match self.gradient_type {
            GradientType::Linear => Ok(Shader::LinearGradient(LinearGradientShader::new(
                self.start,
                self.end,
                self.items.iter().map(|item| item.color).collect(),
                None,
                TileMode::Clamp,
            ))),
            GradientType::Radial | GradientType::Sweep => {
                Err(ShaderError::UnsupportedGradientVariant(self.gradient_type))
            }
        }
    }
}

fn dp_to_px(a: &StyledAttributes<'_>, attr: &str, default: f32, metrics: &DisplayMetrics) -> f32 {
    apply_dimension(ComplexUnit::Dip, a.get_float(attr, default), metrics)
}
