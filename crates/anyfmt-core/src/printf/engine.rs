//! Template scan and conversion dispatch.

use serde::{Deserialize, Serialize};

use super::render::{
    format_char, format_float, format_integer, format_signed, format_str, format_unsigned,
};
use super::spec::{FormatSpec, LengthMod, parse_format_spec};
use crate::error::FormatError;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What a `%` does once the argument list is used up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exhausted {
    /// Emit the character after the `%` literally and carry on.
    #[default]
    EchoNext,
    /// Fail with [`FormatError::ArgumentUnderflow`] once a directive needs
    /// an argument. Directives that consume none (`%%`, unknown
    /// conversions) still render.
    Error,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub on_exhausted: Exhausted,
}

impl FormatOptions {
    /// Options that reject templates with more directives than arguments.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            on_exhausted: Exhausted::Error,
        }
    }
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Renders templates under a fixed set of [`FormatOptions`].
///
/// Holds no state between calls; one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    #[must_use]
    pub const fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> FormatOptions {
        self.options
    }

    /// Render `template` into a new string.
    pub fn render(&self, template: &str, args: &[Value<'_>]) -> Result<String, FormatError> {
        let mut out = String::with_capacity(template.len());
        self.render_into(&mut out, template, args)?;
        Ok(out)
    }

    /// Append the rendering of `template` to `out`.
    ///
    /// Existing content of `out` is kept. On error, whatever was appended
    /// before the failing directive stays in `out`.
    pub fn render_into(
        &self,
        out: &mut String,
        template: &str,
        args: &[Value<'_>],
    ) -> Result<(), FormatError> {
        let mut pos = 0;
        let mut next_arg = 0;

        while let Some(ch) = template[pos..].chars().next() {
            pos += ch.len_utf8();
            if ch != '%' {
                out.push(ch);
                continue;
            }

            // A trailing '%' is dropped.
            let Some(next) = template[pos..].chars().next() else {
                break;
            };

            if next_arg >= args.len() && self.options.on_exhausted == Exhausted::EchoNext {
                out.push(next);
                pos += next.len_utf8();
                continue;
            }

            let offset = pos - 1;
            // A directive cut off by the end of the template renders nothing.
            let Some((spec, consumed)) = parse_format_spec(&template[pos..]) else {
                break;
            };
            pos += consumed;

            if spec.consumes_argument() {
                let Some(value) = args.get(next_arg) else {
                    return Err(FormatError::ArgumentUnderflow { offset });
                };
                write_argument(&spec, next_arg, value, out)?;
                next_arg += 1;
            } else {
                format_char(spec.conversion, &spec, out);
            }
        }
        Ok(())
    }
}

/// Check `value` against the kind `spec` demands and render it.
fn write_argument(
    spec: &FormatSpec,
    index: usize,
    value: &Value<'_>,
    out: &mut String,
) -> Result<(), FormatError> {
    let at = |m: crate::value::Mismatch| m.at(index);

    match spec.conversion {
        'b' => format_signed(i64::from(value.as_bool().map_err(at)?), spec, out),
        'c' => format_char(value.as_char().map_err(at)?, spec, out),
        'd' | 'i' => match spec.length {
            LengthMod::None => format_signed(i64::from(value.as_i32().map_err(at)?), spec, out),
            LengthMod::Short => format_signed(i64::from(value.as_i16().map_err(at)?), spec, out),
            LengthMod::Long | LengthMod::LongLong => {
                format_signed(value.as_i64().map_err(at)?, spec, out);
            }
            LengthMod::Infer => format_integer(value.as_integer().map_err(at)?, spec, out),
        },
        'o' | 'u' | 'x' | 'X' => match spec.length {
            LengthMod::None => format_unsigned(u64::from(value.as_u32().map_err(at)?), spec, out),
            LengthMod::Short => {
                format_unsigned(u64::from(value.as_u16().map_err(at)?), spec, out);
            }
            LengthMod::Long | LengthMod::LongLong => {
                format_unsigned(value.as_u64().map_err(at)?, spec, out);
            }
            LengthMod::Infer => format_integer(value.as_integer().map_err(at)?, spec, out),
        },
        'e' | 'E' | 'f' => {
            let v = match spec.length {
                LengthMod::Short => f64::from(value.as_f32().map_err(at)?),
                LengthMod::Long | LengthMod::LongLong => value.as_long_double().map_err(at)?,
                // Plain %e takes either float width; plain %f wants a double.
                LengthMod::None | LengthMod::Infer if spec.conversion == 'f' => {
                    value.as_f64().map_err(at)?
                }
                LengthMod::None | LengthMod::Infer => value.as_double().map_err(at)?,
            };
            format_float(v, spec, out);
        }
        's' => format_str(value.as_str().map_err(at)?, spec, out),
        'z' => format_unsigned(value.as_size().map_err(at)? as u64, spec, out),
        _ => format_char(spec.conversion, spec, out),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Render `template` with default options.
///
/// ```
/// use anyfmt_core::{Value, render};
///
/// let args = [Value::from(-1), Value::from(1.5)];
/// assert_eq!(render("%d|%f", &args).unwrap(), "-1|1.500000");
/// ```
pub fn render(template: &str, args: &[Value<'_>]) -> Result<String, FormatError> {
    Formatter::default().render(template, args)
}

/// Append the rendering of `template` to `out` with default options.
pub fn render_into(out: &mut String, template: &str, args: &[Value<'_>]) -> Result<(), FormatError> {
    Formatter::default().render_into(out, template, args)
}

// ---------------------------------------------------------------------------
// Positional arguments
// ---------------------------------------------------------------------------

/// Argument packs accepted by [`format`] and [`format_into`]: tuples of one
/// to six values convertible into [`Value`], or a prebuilt list.
pub trait IntoArgs<'a> {
    fn into_args(self) -> Vec<Value<'a>>;
}

impl<'a> IntoArgs<'a> for Vec<Value<'a>> {
    fn into_args(self) -> Vec<Value<'a>> {
        self
    }
}

macro_rules! tuple_args {
    ($($name:ident),+) => {
        impl<'a, $($name: Into<Value<'a>>),+> IntoArgs<'a> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Value<'a>> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_args!(A);
tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);
tuple_args!(A, B, C, D, E);
tuple_args!(A, B, C, D, E, F);

/// Render `template` against positional values.
///
/// ```
/// assert_eq!(anyfmt_core::format("%s:%u", ("port", 8080u32)).unwrap(), "port:8080");
/// ```
pub fn format<'a>(template: &str, args: impl IntoArgs<'a>) -> Result<String, FormatError> {
    render(template, &args.into_args())
}

/// Append the rendering of `template` against positional values to `out`.
pub fn format_into<'a>(
    out: &mut String,
    template: &str,
    args: impl IntoArgs<'a>,
) -> Result<(), FormatError> {
    render_into(out, template, &args.into_args())
}
