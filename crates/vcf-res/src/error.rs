use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::gradient::GradientType;
use crate::resources::ResourceId;

/// Failure to open or tokenize a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("no resource with id {0}")]
    NotFound(ResourceId),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("xml parse error at {line}:{col}: {message}")]
    MalformedXml {
        message: String,
        /// 1-based source line number.
        line: usize,
        /// 1-based source column number.
        col: usize,
    },
}

/// Failure to inflate a gradient color from XML.
///
/// [`GradientColor::create_from_xml`](crate::GradientColor::create_from_xml)
/// logs this and collapses it to `None`.
#[derive(Debug, Error)]
pub enum InflateError {
    #[error("no start tag found")]
    MalformedDocument,

    #[error("{position}: invalid gradient color tag {tag}")]
    UnexpectedRootTag { tag: String, position: String },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl InflateError {
    /// True when the failure came from reading the underlying file.
    pub fn is_io(&self) -> bool {
        matches!(self, InflateError::Resource(ResourceError::Io { .. }))
    }
}

/// Failure to derive a shader from a parsed gradient.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ShaderError {
    #[error("{0} gradients are not supported yet")]
    UnsupportedGradientVariant(GradientType),
}
