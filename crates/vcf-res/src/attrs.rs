//! Raw attribute sets and the styleable groups that give them meaning.

/// Namespace URI bound to the `android:` prefix in resource files.
pub const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// One attribute of a start tag, with its prefix already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(namespace: Option<&str>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Attributes of the start tag a cursor is positioned on, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attrs: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attr: Attribute) {
        self.attrs.push(attr);
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Raw value of `name` in `namespace`. The first occurrence wins.
    pub fn get(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == namespace)
            .map(|a| a.value.as_str())
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self { attrs: iter.into_iter().collect() }
    }
}

/// Declaration of one attribute inside a [`Styleable`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttrDef {
    pub name: &'static str,
    /// Symbolic names accepted in place of an integer, e.g. `linear` -> 0.
    pub enum_values: &'static [(&'static str, i32)],
}

impl AttrDef {
    pub fn enum_value(&self, symbol: &str) -> Option<i32> {
        self.enum_values
            .iter()
            .find(|(name, _)| *name == symbol)
            .map(|&(_, v)| v)
    }
}

/// A named group of `android:` attributes read together from one tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Styleable {
    pub name: &'static str,
    pub attrs: &'static [AttrDef],
}

impl Styleable {
    pub fn index_of(&self, attr: &str) -> Option<usize> {
        self.attrs.iter().position(|a| a.name == attr)
    }
}
