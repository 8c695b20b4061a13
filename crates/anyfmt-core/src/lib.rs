//! # anyfmt-core
//!
//! printf-style template rendering over a dynamically typed argument list.
//!
//! A template such as `"%-8s|%05d|%.2f"` is scanned left to right; every
//! `%` directive consumes the next [`Value`] and renders it with the
//! directive's flags, width, precision and length modifier applied.
//! Arguments are checked at the point of use: asking for an `int` where a
//! string was supplied fails with [`FormatError::TypeMismatch`].
//!
//! ```
//! use anyfmt_core::{Value, render};
//!
//! let out = render("%s=%04x", &[Value::from("mask"), Value::from(255u32)]).unwrap();
//! assert_eq!(out, "mask=00ff");
//! ```
//!
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod error;
pub mod printf;
pub mod value;

pub use error::FormatError;
pub use printf::engine::{
    Exhausted, FormatOptions, Formatter, IntoArgs, format, format_into, render, render_into,
};
pub use value::{Integer, Mismatch, Value, ValueKind};

/// Render a template against any number of arguments convertible into
/// [`Value`], returning `Result<String, FormatError>`.
///
/// ```
/// let out = anyfmt_core::anyfmt!("%d-%s", 7, "seven").unwrap();
/// assert_eq!(out, "7-seven");
/// ```
#[macro_export]
macro_rules! anyfmt {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::render($template, &[$($crate::Value::from($arg)),*])
    };
}
