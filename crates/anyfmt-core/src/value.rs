//! Dynamically typed format arguments.
//!
//! [`Value`] is a closed sum over every kind a directive can consume. Each
//! directive knows which kind it wants and pulls it out with one of the
//! checked `as_*` accessors; a kind mismatch surfaces as [`Mismatch`] and
//! is turned into [`FormatError::TypeMismatch`] by the engine.

use std::borrow::Cow;
use std::fmt;

use crate::error::FormatError;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    LongDouble,
    Str,
    Size,
}

impl ValueKind {
    /// Lowercase name used in error messages and fixtures.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::LongDouble => "long_double",
            Self::Str => "str",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// One format argument.
///
/// Strings are held as [`Cow`] so callers can pass borrowed text without a
/// copy and still build owned argument lists (e.g. from a fixture file).
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Char(char),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Extended-precision float. There is no 80-bit float in Rust, so the
    /// payload is an `f64`; the variant exists so `%Lf` and `%lf` still
    /// demand a distinct kind from plain `%f`.
    LongDouble(f64),
    Str(Cow<'a, str>),
    Size(usize),
}

/// The stored kind did not match the kind a directive asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: &'static str,
    pub found: ValueKind,
}

impl Mismatch {
    /// Attach the argument position, producing the public error.
    #[must_use]
    pub const fn at(self, index: usize) -> FormatError {
        FormatError::TypeMismatch {
            index,
            expected: self.expected,
            found: self.found,
        }
    }
}

/// An integer widened for rendering by the `?` length modifier.
///
/// Signed values remember the width they are printed at so octal and hex
/// output can show the two's complement of a negative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integer {
    Signed { value: i64, bits: u32 },
    Unsigned(u64),
}

impl Integer {
    /// Reinterpret as an unsigned quantity of the stored width.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        match self {
            Self::Signed { value, bits } if bits < 64 => (value as u64) & ((1u64 << bits) - 1),
            Self::Signed { value, .. } => value as u64,
            Self::Unsigned(v) => v,
        }
    }
}

macro_rules! copy_accessors {
    ($($fn_name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Extract a `", stringify!($ty), "`, failing on any other kind.")]
            pub fn $fn_name(&self) -> Result<$ty, Mismatch> {
                match self {
                    Self::$variant(v) => Ok(*v),
                    other => Err(other.mismatch(ValueKind::$variant.name())),
                }
            }
        )*
    };
}

impl<'a> Value<'a> {
    /// The kind currently stored.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Char(_) => ValueKind::Char,
            Self::I8(_) => ValueKind::I8,
            Self::U8(_) => ValueKind::U8,
            Self::I16(_) => ValueKind::I16,
            Self::U16(_) => ValueKind::U16,
            Self::I32(_) => ValueKind::I32,
            Self::U32(_) => ValueKind::U32,
            Self::I64(_) => ValueKind::I64,
            Self::U64(_) => ValueKind::U64,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
            Self::LongDouble(_) => ValueKind::LongDouble,
            Self::Str(_) => ValueKind::Str,
            Self::Size(_) => ValueKind::Size,
        }
    }

    const fn mismatch(&self, expected: &'static str) -> Mismatch {
        Mismatch {
            expected,
            found: self.kind(),
        }
    }

    copy_accessors! {
        as_bool => Bool: bool,
        as_char => Char: char,
        as_i16 => I16: i16,
        as_u16 => U16: u16,
        as_i32 => I32: i32,
        as_u32 => U32: u32,
        as_i64 => I64: i64,
        as_u64 => U64: u64,
        as_f32 => F32: f32,
        as_f64 => F64: f64,
        as_long_double => LongDouble: f64,
        as_size => Size: usize,
    }

    /// Borrow the stored string.
    pub fn as_str(&self) -> Result<&str, Mismatch> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::Str.name())),
        }
    }

    /// Accept either float width, widening `f32`.
    pub fn as_double(&self) -> Result<f64, Mismatch> {
        match *self {
            Self::F64(v) => Ok(v),
            Self::F32(v) => Ok(f64::from(v)),
            ref other => Err(other.mismatch("f64")),
        }
    }

    /// Discover the stored integer kind and widen it.
    ///
    /// Characters widen to their code point, booleans to `0`/`1`, and the
    /// narrow signed kinds to a 32-bit int. Floats and strings fail.
    pub fn as_integer(&self) -> Result<Integer, Mismatch> {
        let widened = match *self {
            Self::Char(c) => Integer::Signed {
                value: i64::from(u32::from(c)),
                bits: 32,
            },
            Self::Bool(b) => Integer::Signed {
                value: i64::from(b),
                bits: 32,
            },
            Self::I8(v) => Integer::Signed {
                value: i64::from(v),
                bits: 32,
            },
            Self::I16(v) => Integer::Signed {
                value: i64::from(v),
                bits: 16,
            },
            Self::I32(v) => Integer::Signed {
                value: i64::from(v),
                bits: 32,
            },
            Self::I64(v) => Integer::Signed { value: v, bits: 64 },
            Self::U8(v) => Integer::Unsigned(u64::from(v)),
            Self::U16(v) => Integer::Unsigned(u64::from(v)),
            Self::U32(v) => Integer::Unsigned(u64::from(v)),
            Self::U64(v) => Integer::Unsigned(v),
            Self::Size(v) => Integer::Unsigned(v as u64),
            ref other => return Err(other.mismatch("integer")),
        };
        Ok(widened)
    }

    /// Detach from any borrowed string.
    #[must_use]
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Str(s) => Value::Str(Cow::Owned(s.into_owned())),
            Self::Bool(v) => Value::Bool(v),
            Self::Char(v) => Value::Char(v),
            Self::I8(v) => Value::I8(v),
            Self::U8(v) => Value::U8(v),
            Self::I16(v) => Value::I16(v),
            Self::U16(v) => Value::U16(v),
            Self::I32(v) => Value::I32(v),
            Self::U32(v) => Value::U32(v),
            Self::I64(v) => Value::I64(v),
            Self::U64(v) => Value::U64(v),
            Self::F32(v) => Value::F32(v),
            Self::F64(v) => Value::F64(v),
            Self::LongDouble(v) => Value::LongDouble(v),
            Self::Size(v) => Value::Size(v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    usize => Size,
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Self::Str(s)
    }
}
