//! printf-style formatting engine.
//!
//! Parses `%` directives out of a template and renders checked, dynamically
//! typed arguments with width/precision/flag support.
//!
//! - [`spec`]: directive descriptors and the directive parser.
//! - [`render`]: per-kind renderers applying a descriptor to one value.
//! - [`engine`]: the template scan, conversion dispatch and entry points.

pub mod engine;
pub mod render;
pub mod spec;

pub use engine::{Exhausted, FormatOptions, Formatter};
pub use spec::{FormatFlags, FormatSpec, LengthMod, Precision, Width, parse_format_spec};
