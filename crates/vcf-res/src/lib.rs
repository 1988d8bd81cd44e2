//! Loading of `<gradient>` color resources.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`cursor`] | `XmlCursor`, `XmlPullCursor`, `EventKind` |
//! | [`attrs`] | `AttributeSet`, `Styleable` |
//! | [`theme`] | `Theme`, `StyledAttributes` |
//! | [`density`] | `DisplayMetrics`, `apply_dimension` |
//! | [`resources`] | `Resources`, `ResourceId` |
//! | [`gradient`] | `GradientColor`, `GradientType`, `GradientItem` |
//! | [`error`] | `ResourceError`, `InflateError`, `ShaderError` |
//!
//! # Quick start
//!
//! ```rust
//! use vcf_engine::paint::{ColorInt, Shader};
//! use vcf_res::{DisplayMetrics, GradientColor, Resources};
//!
//! let mut res = Resources::new(DisplayMetrics::from_density_dpi(320));
//! let id = res.add_xml("sunset", r##"
//!     <gradient xmlns:android="http://schemas.android.com/apk/res/android"
//!         android:endX="50" android:endY="0">
//!       <item android:color="#FFFF0000" android:offset="0"/>
//!       <item android:color="#FF0000FF" android:offset="1"/>
//!     </gradient>
//! "##);
//!
//! let theme = res.new_theme();
//! let gradient = GradientColor::create_from_xml(&res, id, &theme).unwrap();
//! let Shader::LinearGradient(shader) = gradient.derive_shader().unwrap();
//! assert_eq!(shader.end.x, 100.0);
//! assert_eq!(shader.colors, vec![ColorInt::RED, ColorInt::BLUE]);
//! ```

pub mod attrs;
pub mod cursor;
pub mod density;
pub mod error;
pub mod gradient;
pub mod resources;
pub mod theme;

pub use density::DisplayMetrics;
pub use error::{InflateError, ResourceError, ShaderError};
pub use gradient::{GradientColor, GradientItem, GradientType};
pub use resources::{ResourceId, Resources};
pub use theme::Theme;
