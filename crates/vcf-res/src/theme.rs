//! Theme-aware attribute resolution.
//!
//! A [`Theme`] turns the raw strings of an [`AttributeSet`] into typed values
//! for one [`Styleable`] at a time. References are followed on the way:
//! `?attr/name` (or `?name`) through the theme, `@color/name` through the
//! owning [`Resources`], `@android:color/name` through the framework palette.

use std::cell::Cell;
use std::collections::HashMap;

use vcf_engine::paint::ColorInt;

use crate::attrs::{ANDROID_NS, AttrDef, AttributeSet, Styleable};
use crate::resources::Resources;

/// Longest chain of references followed before giving up.
const MAX_REFERENCE_DEPTH: usize = 8;

#[derive(Debug)]
pub struct Theme<'r> {
    resources: &'r Resources,
    attrs: HashMap<String, String>,
    open_views: Cell<usize>,
}

impl<'r> Theme<'r> {
    pub fn new(resources: &'r Resources) -> Self {
        Self {
            resources,
            attrs: HashMap::new(),
            open_views: Cell::new(0),
        }
    }

    /// Defines the value `?attr/<name>` resolves to. The value may itself be a reference.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Number of [`StyledAttributes`] views obtained from this theme and not yet dropped.
    pub fn open_views(&self) -> usize {
        self.open_views.get()
    }

    /// Resolves the `android:` attributes `styleable` declares.
    ///
    /// The returned view is released when dropped.
    pub fn obtain_styled_attributes(
        &self,
        set: &AttributeSet,
        styleable: &'static Styleable,
    ) -> StyledAttributes<'_> {
        let values = styleable
            .attrs
            .iter()
            .map(|def| {
                set.get(Some(ANDROID_NS), def.name)
                    .and_then(|raw| self.resolve(styleable, def, raw))
            })
            .collect();

        self.open_views.set(self.open_views.get() + 1);
        StyledAttributes {
            styleable,
            values,
            open_views: &self.open_views,
        }
    }

    fn resolve(&self, styleable: &Styleable, def: &AttrDef, raw: &str) -> Option<Value> {
        let mut current = raw.trim().to_string();
        for _ in 0..MAX_REFERENCE_DEPTH {
            if let Some(name) = theme_reference(&current) {
                match self.attrs.get(name) {
                    Some(next) => {
                        current = next.trim().to_string();
                        continue;
                    }
                    None => {
                        log::warn!(
                            "{}.{}: theme attribute {current:?} is not defined",
                            styleable.name,
                            def.name
                        );
                        return None;
                    }
                }
            }
            if let Some(name) = current.strip_prefix("@android:color/") {
                return framework_color(name).map(Value::Color).or_else(|| {
                    log::warn!("{}.{}: unknown framework color {name:?}", styleable.name, def.name);
                    None
                });
            }
            if let Some(name) = current.strip_prefix("@color/") {
                return self.resources.color(name).map(Value::Color).or_else(|| {
                    log::warn!("{}.{}: unknown color resource {name:?}", styleable.name, def.name);
                    None
                });
            }
            return Some(Value::Literal(current));
        }
        log::warn!("{}.{}: reference chain too deep at {raw:?}", styleable.name, def.name);
        None
    }
}

/// Name targeted by `?attr/name`, `?android:attr/name`, or `?name`.
fn theme_reference(value: &str) -> Option<&str> {
    let rest = value.strip_prefix('?')?;
    let rest = rest.strip_prefix("android:").unwrap_or(rest);
    Some(rest.strip_prefix("attr/").unwrap_or(rest))
}

fn framework_color(name: &str) -> Option<ColorInt> {
    match name {
        "black" => Some(ColorInt::BLACK),
        "white" => Some(ColorInt::WHITE),
        "transparent" => Some(ColorInt::TRANSPARENT),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Literal(String),
    Color(ColorInt),
}

/// Typed view over one tag's attributes for one [`Styleable`].
///
/// Only attributes declared by the styleable are visible. Getters fall back
/// to the caller's default when a value is absent, unresolvable, or fails to
/// parse as the requested type.
#[derive(Debug)]
pub struct StyledAttributes<'t> {
    styleable: &'static Styleable,
    values: Vec<Option<Value>>,
    open_views: &'t Cell<usize>,
}

impl StyledAttributes<'_> {
    fn lookup(&self, attr: &str) -> Option<(&AttrDef, &Value)> {
        let Some(index) = self.styleable.index_of(attr) else {
            log::warn!("{} does not declare attribute {attr:?}", self.styleable.name);
            return None;
        };
        let value = self.values.get(index)?.as_ref()?;
        Some((&self.styleable.attrs[index], value))
    }

    pub fn has_value(&self, attr: &str) -> bool {
        self.lookup(attr).is_some()
    }

    pub fn get_float(&self, attr: &str, default: f32) -> f32 {
        match self.lookup(attr) {
            None => default,
            Some((_, Value::Literal(s))) => s.parse().unwrap_or_else(|_| {
                self.invalid(attr, s, "float");
                default
            }),
            Some((_, Value::Color(c))) => {
                self.invalid(attr, &c.to_string(), "float");
                default
            }
        }
    }

    /// Accepts decimal, `0x` hex, or one of the attribute's enum names.
    pub fn get_int(&self, attr: &str, default: i32) -> i32 {
        match self.lookup(attr) {
            None => default,
            Some((def, Value::Literal(s))) => parse_int(s)
                .or_else(|| def.enum_value(s))
                .unwrap_or_else(|| {
                    self.invalid(attr, s, "integer");
                    default
                }),
            Some((_, Value::Color(c))) => c.0 as i32,
        }
    }

    pub fn get_color(&self, attr: &str, default: ColorInt) -> ColorInt {
        match self.lookup(attr) {
            None => default,
            Some((_, Value::Literal(s))) => ColorInt::parse_hex(s).unwrap_or_else(|| {
                self.invalid(attr, s, "color");
                default
            }),
            Some((_, Value::Color(c))) => *c,
        }
    }

    /// Releases the view. Equivalent to dropping it.
    pub fn release(self) {}

    fn invalid(&self, attr: &str, raw: &str, expected: &str) {
        log::warn!(
            "{}.{attr}: {raw:?} is not a valid {expected}, using default",
            self.styleable.name
        );
    }
}

impl Drop for StyledAttributes<'_> {
    fn drop(&mut self) {
        self.open_views.set(self.open_views.get() - 1);
    }
}

fn parse_int(s: &str) -> Option<i32> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok().map(|v| v as i32),
        None => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attribute;

    const WIDGET: Styleable = Styleable {
        name: "Widget",
        attrs: &[
            AttrDef { name: "size", enum_values: &[] },
            AttrDef { name: "tint", enum_values: &[] },
            AttrDef { name: "kind", enum_values: &[("plain", 0), ("fancy", 7)] },
        ],
    };

    fn android(pairs: &[(&str, &str)]) -> AttributeSet {
        pairs
            .iter()
            .map(|&(name, value)| Attribute::new(Some(ANDROID_NS), name, value))
            .collect()
    }

    // ── literals ──────────────────────────────────────────────────────────

    #[test]
    fn literals_parse_by_type() {
        let res = Resources::default();
        let theme = res.new_theme();
        let set = android(&[("size", " 2.5 "), ("tint", "#f00"), ("kind", "0x10")]);
        let a = theme.obtain_styled_attributes(&set, &WIDGET);
        assert_eq!(a.get_float("size", 0.0), 2.5);
        assert_eq!(a.get_color("tint", ColorInt::BLACK), ColorInt::RED);
        assert_eq!(a.get_int("kind", -1), 16);
    }

    #[test]
    fn absent_values_use_defaults() {
        let res = Resources::default();
        let theme = res.new_theme();
        let a = theme.obtain_styled_attributes(&AttributeSet::new(), &WIDGET);
        assert!(!a.has_value("size"));
        assert_eq!(a.get_float("size", 4.0), 4.0);
        assert_eq!(a.get_color("tint", ColorInt::BLUE), ColorInt::BLUE);
        assert_eq!(a.get_int("kind", 3), 3);
    }

    #[test]
    fn unparseable_values_use_defaults() {
        let res = Resources::default();
        let theme = res.new_theme();
        let set = android(&[("size", "wide"), ("tint", "red"), ("kind", "bogus")]);
        let a = theme.obtain_styled_attributes(&set, &WIDGET);
        assert_eq!(a.get_float("size", 1.0), 1.0);
        assert_eq!(a.get_color("tint", ColorInt::BLACK), ColorInt::BLACK);
        assert_eq!(a.get_int("kind", 9), 9);
    }

    #[test]
    fn enum_names_map_to_codes() {
        let res = Resources::default();
        let theme = res.new_theme();
        let set = android(&[("kind", "fancy")]);
        assert_eq!(theme.obtain_styled_attributes(&set, &WIDGET).get_int("kind", 0), 7);
    }

    #[test]
    fn only_android_namespace_and_declared_attrs_visible() {
        let res = Resources::default();
        let theme = res.new_theme();
        let set: AttributeSet = [
            Attribute::new(None, "size", "3"),
            Attribute::new(Some(ANDROID_NS), "other", "3"),
        ]
        .into_iter()
        .collect();
        let a = theme.obtain_styled_attributes(&set, &WIDGET);
        assert!(!a.has_value("size"));
        assert_eq!(a.get_float("other", 1.0), 1.0);
    }

    // ── references ────────────────────────────────────────────────────────

    #[test]
    fn theme_attributes_resolve_through_chain() {
        let res = Resources::default();
        let theme = res
            .new_theme()
            .with_attr("colorPrimary", "?colorBrand")
            .with_attr("colorBrand", "#ff00ff00");
        let set = android(&[("tint", "?attr/colorPrimary")]);
        let a = theme.obtain_styled_attributes(&set, &WIDGET);
        assert_eq!(a.get_color("tint", ColorInt::BLACK), ColorInt::GREEN);
    }

    #[test]
    fn color_resources_resolve() {
        let mut res = Resources::default();
        res.set_color("accent", ColorInt::BLUE);
        let theme = res.new_theme();
        let set = android(&[("tint", "@color/accent"), ("kind", "@android:color/white")]);
        let a = theme.obtain_styled_attributes(&set, &WIDGET);
        assert_eq!(a.get_color("tint", ColorInt::BLACK), ColorInt::BLUE);
        assert_eq!(a.get_int("kind", 0), ColorInt::WHITE.0 as i32);
    }

    #[test]
    fn unresolved_references_are_absent() {
        let res = Resources::default();
        let theme = res.new_theme().with_attr("loop", "?loop");
        let set = android(&[("tint", "@color/missing"), ("size", "?undefined"), ("kind", "?loop")]);
        let a = theme.obtain_styled_attributes(&set, &WIDGET);
        assert!(!a.has_value("tint"));
        assert!(!a.has_value("size"));
        assert!(!a.has_value("kind"));
    }

    // ── release ───────────────────────────────────────────────────────────

    #[test]
    fn views_released_on_drop() {
        let res = Resources::default();
        let theme = res.new_theme();
        let set = AttributeSet::new();
        {
            let _a = theme.obtain_styled_attributes(&set, &WIDGET);
            let b = theme.obtain_styled_attributes(&set, &WIDGET);
            assert_eq!(theme.open_views(), 2);
            b.release();
            assert_eq!(theme.open_views(), 1);
        }
        assert_eq!(theme.open_views(), 0);
    }
}
