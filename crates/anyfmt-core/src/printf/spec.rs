//! Directive descriptors and the directive parser.
//!
//! Grammar after the introducing `%`:
//!
//! ```text
//! [flags: - + 0 #]* [width: digits] [. precision: digits] [modifier: l h L ?] conversion
//! ```
//!
//! A width or precision of zero is indistinguishable from an absent one.

// ---------------------------------------------------------------------------
// Format spec types
// ---------------------------------------------------------------------------

/// Flags parsed from a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub zero_pad: bool,     // '0'
    pub alt_form: bool,     // '#'
}

/// Width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
}

/// Length modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Short,    // 'h'
    Long,     // 'l'
    LongLong, // 'L'
    Infer,    // '?'
}

/// A parsed directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: char,
}

impl FormatSpec {
    /// A bare `%<conversion>` directive.
    #[must_use]
    pub const fn plain(conversion: char) -> Self {
        Self {
            flags: FormatFlags {
                left_justify: false,
                force_sign: false,
                zero_pad: false,
                alt_form: false,
            },
            width: Width::None,
            precision: Precision::None,
            length: LengthMod::None,
            conversion,
        }
    }

    /// Whether rendering this directive consumes an argument.
    #[must_use]
    pub const fn consumes_argument(&self) -> bool {
        matches!(
            self.conversion,
            'b' | 'c' | 'd' | 'i' | 'o' | 'u' | 'x' | 'X' | 'e' | 'E' | 'f' | 's' | 'z'
        )
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse a single directive starting after the `%` character.
///
/// `fmt` starts at the first character AFTER `%`. Returns
/// `(spec, bytes_consumed)`, or `None` when the template ends before a
/// conversion character is reached. Any character is accepted as the
/// conversion; unknown ones are echoed by the renderer.
#[must_use]
pub fn parse_format_spec(fmt: &str) -> Option<(FormatSpec, usize)> {
    let bytes = fmt.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    // --- flags ---
    let mut flags = FormatFlags::default();
    while pos < len {
        match bytes[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b'0' => flags.zero_pad = true,
            b'#' => flags.alt_form = true,
            _ => break,
        }
        pos += 1;
    }

    // --- width ---
    let start = pos;
    while pos < len && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let width = match parse_decimal(&bytes[start..pos]) {
        0 => Width::None,
        w => Width::Fixed(w),
    };

    // --- precision ---
    let precision = if pos < len && bytes[pos] == b'.' {
        pos += 1;
        let start = pos;
        while pos < len && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        match parse_decimal(&bytes[start..pos]) {
            0 => Precision::None,
            p => Precision::Fixed(p),
        }
    } else {
        Precision::None
    };

    // --- length modifier ---
    let length = match bytes.get(pos) {
        Some(b'h') => LengthMod::Short,
        Some(b'l') => LengthMod::Long,
        Some(b'L') => LengthMod::LongLong,
        Some(b'?') => LengthMod::Infer,
        _ => LengthMod::None,
    };
    if length != LengthMod::None {
        pos += 1;
    }

    // --- conversion ---
    // Everything consumed so far is ASCII, so `pos` is a char boundary.
    let conversion = fmt[pos..].chars().next()?;
    pos += conversion.len_utf8();

    Some((
        FormatSpec {
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

fn parse_decimal(digits: &[u8]) -> usize {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add(usize::from(d - b'0'));
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
