use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use vcf_engine::paint::ColorInt;

use crate::cursor::XmlPullCursor;
use crate::density::DisplayMetrics;
use crate::error::ResourceError;
use crate::theme::Theme;

/// First id handed out to registered XML resources.
const FIRST_XML_ID: u32 = 0x7f0e_0000;

/// Opaque handle to a registered resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[derive(Debug, Clone)]
enum XmlSource {
    Inline(String),
    /// Read from disk every time the resource is opened.
    File(PathBuf),
}

#[derive(Debug, Clone)]
struct XmlEntry {
    name: String,
    source: XmlSource,
}

/// Registry of XML documents and color values, plus the display they target.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    xml: Vec<XmlEntry>,
    colors: HashMap<String, ColorInt>,
    metrics: DisplayMetrics,
}

impl Resources {
    pub fn new(metrics: DisplayMetrics) -> Self {
        Self { metrics, ..Self::default() }
    }

    /// Registers an in-memory XML document.
    pub fn add_xml(&mut self, name: impl Into<String>, src: impl Into<String>) -> ResourceId {
        self.register(name.into(), XmlSource::Inline(src.into()))
    }

    /// Registers an XML file. The file is not touched until it is opened.
    pub fn add_xml_file(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> ResourceId {
        self.register(name.into(), XmlSource::File(path.into()))
    }

    fn register(&mut self, name: String, source: XmlSource) -> ResourceId {
        let id = ResourceId(FIRST_XML_ID + self.xml.len() as u32);
        log::trace!("registered xml resource {name} as {id}");
        self.xml.push(XmlEntry { name, source });
        id
    }

    /// Looks up the id of a registered XML resource by name.
    pub fn identifier(&self, name: &str) -> Option<ResourceId> {
        self.xml
            .iter()
            .position(|e| e.name == name)
            .map(|i| ResourceId(FIRST_XML_ID + i as u32))
    }

    /// Defines the target of `@color/<name>` references.
    pub fn set_color(&mut self, name: impl Into<String>, color: ColorInt) {
        self.colors.insert(name.into(), color);
    }

    pub fn color(&self, name: &str) -> Option<ColorInt> {
        self.colors.get(name).copied()
    }

    pub fn display_metrics(&self) -> &DisplayMetrics {
        &self.metrics
    }

    /// Opens a cursor positioned on `StartDocument`.
    pub fn get_xml(&self, id: ResourceId) -> Result<XmlPullCursor, ResourceError> {
        let entry = id
            .0
            .checked_sub(FIRST_XML_ID)
            .and_then(|i| self.xml.get(i as usize))
            .ok_or(ResourceError::NotFound(id))?;

        match &entry.source {
            XmlSource::Inline(src) => XmlPullCursor::parse(src),
            XmlSource::File(path) => {
                let src = fs::read_to_string(path)
                    .map_err(|source| ResourceError::Io { path: path.clone(), source })?;
                XmlPullCursor::parse(&src)
            }
        }
    }

    pub fn new_theme(&self) -> Theme<'_> {
        Theme::new(self)
    }
}
