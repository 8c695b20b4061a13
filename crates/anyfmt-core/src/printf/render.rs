//! Renderers: apply a [`FormatSpec`] to one typed value.
//!
//! The rules follow stream formatting rather than C printf where the two
//! disagree:
//! - precision only affects floats (default 6); integers, characters and
//!   strings ignore it;
//! - `+` shows a sign only on signed decimal values and floats;
//! - `0` swaps the fill of right-justified numbers from spaces to zeros;
//!   the fill stays in front of any sign or base prefix (`000-42`,
//!   `00000xff`). Non-numeric output always pads with spaces.
//!
//! Design invariant: all formatting is bounded. Padding is clamped to
//! [`MAX_PAD`] characters per directive and float precision to
//! [`MAX_PRECISION`] digits.

use super::spec::{FormatSpec, Precision, Width};
use crate::value::Integer;

/// Upper bound on fill characters emitted for a single directive.
pub const MAX_PAD: usize = 4096;

/// Upper bound on fractional digits a float directive may request.
pub const MAX_PRECISION: usize = 4096;

const DEFAULT_FLOAT_PRECISION: usize = 6;

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Render a signed decimal integer.
pub fn format_signed(value: i64, spec: &FormatSpec, out: &mut String) {
    let negative = value < 0;
    let mut digits = [0u8; 64];
    let digit_count = render_digits(value.unsigned_abs(), 10, false, &mut digits);

    let sign = if negative {
        Some('-')
    } else if spec.flags.force_sign {
        Some('+')
    } else {
        None
    };

    emit_number(sign, "", &digits[64 - digit_count..], spec, out);
}

/// Render an unsigned integer in the base selected by the conversion.
pub fn format_unsigned(value: u64, spec: &FormatSpec, out: &mut String) {
    let (base, uppercase) = int_base(spec.conversion);
    let mut digits = [0u8; 64];
    let digit_count = render_digits(value, base, uppercase, &mut digits);

    let prefix = if value != 0 { alt_prefix(spec) } else { "" };

    emit_number(None, prefix, &digits[64 - digit_count..], spec, out);
}

/// Render an integer discovered through the `?` modifier.
///
/// Signed values print with a sign in decimal conversions; in octal and
/// hex they print as the two's complement of their natural width.
pub fn format_integer(value: Integer, spec: &FormatSpec, out: &mut String) {
    match value {
        Integer::Signed { value, .. } if int_base(spec.conversion).0 == 10 => {
            format_signed(value, spec, out);
        }
        other => format_unsigned(other.to_bits(), spec, out),
    }
}

/// Render a floating-point value for `%f`, `%e` or `%E`.
pub fn format_float(value: f64, spec: &FormatSpec, out: &mut String) {
    let precision = match spec.precision {
        Precision::Fixed(p) => p.min(MAX_PRECISION),
        Precision::None => DEFAULT_FLOAT_PRECISION,
    };
    let uppercase = spec.conversion.is_ascii_uppercase();

    if value.is_nan() {
        let s = if uppercase { "NAN" } else { "nan" };
        return format_text(s, spec, out);
    }
    if value.is_infinite() {
        let body = if uppercase { "INF" } else { "inf" };
        let s = if value < 0.0 {
            format!("-{body}")
        } else if spec.flags.force_sign {
            format!("+{body}")
        } else {
            body.to_string()
        };
        return format_text(&s, spec, out);
    }

    let body = match spec.conversion {
        'e' | 'E' => format_e(value.abs(), precision, uppercase, spec.flags.alt_form),
        _ => format_f(value.abs(), precision, spec.flags.alt_form),
    };

    let sign = if value.is_sign_negative() {
        Some('-')
    } else if spec.flags.force_sign {
        Some('+')
    } else {
        None
    };

    emit_number(sign, "", body.as_bytes(), spec, out);
}

/// Render a string. Only width and justification apply.
pub fn format_str(s: &str, spec: &FormatSpec, out: &mut String) {
    format_text(s, spec, out);
}

/// Render a single character. Only width and justification apply.
pub fn format_char(c: char, spec: &FormatSpec, out: &mut String) {
    let pad_total = resolve_width(spec).saturating_sub(1);

    if !spec.flags.left_justify {
        pad(out, ' ', pad_total);
    }
    out.push(c);
    if spec.flags.left_justify {
        pad(out, ' ', pad_total);
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Lay out `sign`, `prefix` and ASCII `body` inside the field width.
fn emit_number(
    sign: Option<char>,
    prefix: &str,
    body: &[u8],
    spec: &FormatSpec,
    out: &mut String,
) {
    let content_len = usize::from(sign.is_some()) + prefix.len() + body.len();
    let pad_total = resolve_width(spec).saturating_sub(content_len);

    if !spec.flags.left_justify {
        let fill = if spec.flags.zero_pad { '0' } else { ' ' };
        pad(out, fill, pad_total);
    }
    if let Some(s) = sign {
        out.push(s);
    }
    out.push_str(prefix);
    out.extend(body.iter().map(|&b| char::from(b)));
    if spec.flags.left_justify {
        pad(out, ' ', pad_total);
    }
}

/// Space-padded text; never zero-filled.
fn format_text(s: &str, spec: &FormatSpec, out: &mut String) {
    let pad_total = resolve_width(spec).saturating_sub(s.chars().count());

    if !spec.flags.left_justify {
        pad(out, ' ', pad_total);
    }
    out.push_str(s);
    if spec.flags.left_justify {
        pad(out, ' ', pad_total);
    }
}

fn resolve_width(spec: &FormatSpec) -> usize {
    match spec.width {
        Width::Fixed(w) => w,
        Width::None => 0,
    }
}

fn int_base(conversion: char) -> (u64, bool) {
    match conversion {
        'o' => (8, false),
        'x' => (16, false),
        'X' => (16, true),
        _ => (10, false),
    }
}

/// Render `value` in the given `base` into the END of `buf`.
/// Returns the number of digits written. Digits are placed right-aligned.
fn render_digits(mut value: u64, base: u64, uppercase: bool, buf: &mut [u8; 64]) -> usize {
    if value == 0 {
        buf[63] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut pos = 64;
    while value > 0 && pos > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
    }
    64 - pos
}

fn alt_prefix(spec: &FormatSpec) -> &'static str {
    if !spec.flags.alt_form {
        return "";
    }
    match spec.conversion {
        'o' => "0",
        'x' => "0x",
        'X' => "0X",
        _ => "",
    }
}

fn pad(out: &mut String, fill: char, count: usize) {
    out.extend(std::iter::repeat_n(fill, count.min(MAX_PAD)));
}

/// Fixed-point digits of a non-negative finite value.
fn format_f(value: f64, precision: usize, alt_form: bool) -> String {
    let mut s = format!("{value:.precision$}");
    if precision == 0 && alt_form {
        s.push('.');
    }
    s
}

/// Scientific digits of a non-negative finite value: `d.ddddde±XX`.
fn format_e(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    // Rust prints `1.5e0`; normalise the exponent to a sign and two digits.
    let raw = format!("{value:.precision$e}");
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    let mut s = String::with_capacity(mantissa.len() + 5);
    s.push_str(mantissa);
    if precision == 0 && alt_form {
        s.push('.');
    }
    s.push(if uppercase { 'E' } else { 'e' });
    s.push(if exp < 0 { '-' } else { '+' });
    s.push_str(&format!("{:02}", exp.unsigned_abs()));
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printf::spec::{FormatFlags, LengthMod};

    fn spec(conversion: char, flags: FormatFlags, width: usize, precision: usize) -> FormatSpec {
        FormatSpec {
            flags,
            width: if width == 0 {
                Width::None
            } else {
                Width::Fixed(width)
            },
            precision: if precision == 0 {
                Precision::None
            } else {
                Precision::Fixed(precision)
            },
            length: LengthMod::None,
            conversion,
        }
    }

    fn run(f: impl FnOnce(&mut String)) -> String {
        let mut out = String::new();
        f(&mut out);
        out
    }

    #[test]
    fn test_format_signed_basic() {
        let s = FormatSpec::plain('d');
        assert_eq!(run(|o| format_signed(42, &s, o)), "42");
        assert_eq!(run(|o| format_signed(-123, &s, o)), "-123");
    }

    #[test]
    fn test_format_signed_width_pad() {
        let s = spec('d', FormatFlags::default(), 8, 0);
        assert_eq!(run(|o| format_signed(42, &s, o)), "      42");
    }

    #[test]
    fn test_format_signed_zero_fill_leads_sign() {
        let flags = FormatFlags {
            zero_pad: true,
            ..Default::default()
        };
        let s = spec('d', flags, 6, 0);
        assert_eq!(run(|o| format_signed(-42, &s, o)), "000-42");
        assert_eq!(run(|o| format_signed(-1, &spec('d', flags, 5, 0), o)), "000-1");
        assert_eq!(run(|o| format_signed(42, &s, o)), "000042");
    }

    #[test]
    fn test_format_signed_left_justify_ignores_zero_pad() {
        let flags = FormatFlags {
            left_justify: true,
            zero_pad: true,
            ..Default::default()
        };
        let s = spec('d', flags, 8, 0);
        assert_eq!(run(|o| format_signed(42, &s, o)), "42      ");
    }

    #[test]
    fn test_force_sign() {
        let flags = FormatFlags {
            force_sign: true,
            ..Default::default()
        };
        let s = spec('d', flags, 0, 0);
        assert_eq!(run(|o| format_signed(42, &s, o)), "+42");
        assert_eq!(run(|o| format_signed(0, &s, o)), "+0");
        let u = spec('u', flags, 0, 0);
        assert_eq!(run(|o| format_unsigned(42, &u, o)), "42");
    }

    #[test]
    fn test_integer_precision_ignored() {
        let s = spec('d', FormatFlags::default(), 0, 5);
        assert_eq!(run(|o| format_signed(7, &s, o)), "7");
    }

    #[test]
    fn test_i64_min() {
        let s = FormatSpec::plain('d');
        assert_eq!(
            run(|o| format_signed(i64::MIN, &s, o)),
            "-9223372036854775808"
        );
    }

    #[test]
    fn test_format_unsigned_bases() {
        assert_eq!(
            run(|o| format_unsigned(255, &FormatSpec::plain('x'), o)),
            "ff"
        );
        assert_eq!(
            run(|o| format_unsigned(255, &FormatSpec::plain('X'), o)),
            "FF"
        );
        assert_eq!(
            run(|o| format_unsigned(8, &FormatSpec::plain('o'), o)),
            "10"
        );
        assert_eq!(
            run(|o| format_unsigned(u64::MAX, &FormatSpec::plain('u'), o)),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_format_unsigned_alt_prefix() {
        let flags = FormatFlags {
            alt_form: true,
            ..Default::default()
        };
        assert_eq!(
            run(|o| format_unsigned(255, &spec('x', flags, 0, 0), o)),
            "0xff"
        );
        assert_eq!(
            run(|o| format_unsigned(255, &spec('X', flags, 0, 0), o)),
            "0XFF"
        );
        assert_eq!(
            run(|o| format_unsigned(8, &spec('o', flags, 0, 0), o)),
            "010"
        );
        assert_eq!(
            run(|o| format_unsigned(0, &spec('x', flags, 0, 0), o)),
            "0"
        );
        assert_eq!(
            run(|o| format_unsigned(10, &spec('u', flags, 0, 0), o)),
            "10"
        );
    }

    #[test]
    fn test_zero_fill_leads_prefix() {
        let flags = FormatFlags {
            alt_form: true,
            zero_pad: true,
            ..Default::default()
        };
        assert_eq!(
            run(|o| format_unsigned(255, &spec('x', flags, 8, 0), o)),
            "00000xff"
        );
    }

    #[test]
    fn test_format_integer_signed_hex_uses_natural_width() {
        let x = FormatSpec::plain('x');
        let short = Integer::Signed {
            value: -1,
            bits: 16,
        };
        let int = Integer::Signed {
            value: -1,
            bits: 32,
        };
        assert_eq!(run(|o| format_integer(short, &x, o)), "ffff");
        assert_eq!(run(|o| format_integer(int, &x, o)), "ffffffff");
        assert_eq!(
            run(|o| format_integer(int, &FormatSpec::plain('u'), o)),
            "-1"
        );
        assert_eq!(
            run(|o| format_integer(Integer::Unsigned(9), &FormatSpec::plain('o'), o)),
            "11"
        );
    }

    #[test]
    fn test_format_float_default_precision() {
        let s = FormatSpec::plain('f');
        assert_eq!(run(|o| format_float(1.5, &s, o)), "1.500000");
        assert_eq!(run(|o| format_float(-0.25, &s, o)), "-0.250000");
        assert_eq!(
            run(|o| format_float(core::f64::consts::PI, &s, o)),
            "3.141593"
        );
    }

    #[test]
    fn test_format_float_precision_and_width() {
        let s = spec('f', FormatFlags::default(), 8, 2);
        assert_eq!(run(|o| format_float(3.14159, &s, o)), "    3.14");
        let flags = FormatFlags {
            zero_pad: true,
            force_sign: true,
            ..Default::default()
        };
        let z = spec('f', flags, 8, 2);
        assert_eq!(run(|o| format_float(3.14159, &z, o)), "000+3.14");
        let neg = spec('f', FormatFlags { zero_pad: true, ..Default::default() }, 10, 2);
        assert_eq!(run(|o| format_float(-3.5, &neg, o)), "00000-3.50");
    }

    #[test]
    fn test_format_float_scientific() {
        let e = FormatSpec::plain('e');
        assert_eq!(run(|o| format_float(1.5, &e, o)), "1.500000e+00");
        assert_eq!(run(|o| format_float(0.0, &e, o)), "0.000000e+00");
        assert_eq!(run(|o| format_float(-12345.678, &e, o)), "-1.234568e+04");
        let upper = spec('E', FormatFlags::default(), 0, 3);
        assert_eq!(run(|o| format_float(0.00012, &upper, o)), "1.200E-04");
        assert_eq!(run(|o| format_float(1e300, &upper, o)), "1.000E+300");
    }

    #[test]
    fn test_format_float_alt_form_with_zero_precision() {
        let flags = FormatFlags {
            alt_form: true,
            ..Default::default()
        };
        let mut f = spec('f', flags, 0, 0);
        f.precision = Precision::Fixed(0);
        assert_eq!(run(|o| format_float(2.0, &f, o)), "2.");
        let mut e = spec('e', flags, 0, 0);
        e.precision = Precision::Fixed(0);
        assert_eq!(run(|o| format_float(2.0, &e, o)), "2.e+00");
    }

    #[test]
    fn test_format_float_non_finite() {
        let flags = FormatFlags {
            zero_pad: true,
            ..Default::default()
        };
        let f = spec('f', flags, 5, 0);
        assert_eq!(run(|o| format_float(f64::NAN, &f, o)), "  nan");
        assert_eq!(
            run(|o| format_float(f64::NEG_INFINITY, &FormatSpec::plain('E'), o)),
            "-INF"
        );
        assert_eq!(
            run(|o| format_float(f64::INFINITY, &FormatSpec::plain('f'), o)),
            "inf"
        );
    }

    #[test]
    fn test_format_float_force_sign_on_infinity() {
        let flags = FormatFlags {
            force_sign: true,
            ..Default::default()
        };
        assert_eq!(
            run(|o| format_float(f64::INFINITY, &spec('f', flags, 0, 0), o)),
            "+inf"
        );
        assert_eq!(
            run(|o| format_float(f64::INFINITY, &spec('E', flags, 6, 0), o)),
            "  +INF"
        );
        assert_eq!(
            run(|o| format_float(f64::NEG_INFINITY, &spec('f', flags, 0, 0), o)),
            "-inf"
        );
        assert_eq!(
            run(|o| format_float(f64::NAN, &spec('f', flags, 0, 0), o)),
            "nan"
        );
    }

    #[test]
    fn test_format_str_width_only() {
        let flags = FormatFlags {
            zero_pad: true,
            ..Default::default()
        };
        let s = spec('s', flags, 6, 2);
        assert_eq!(run(|o| format_str("hello", &s, o)), " hello");
        let left = spec(
            's',
            FormatFlags {
                left_justify: true,
                ..Default::default()
            },
            4,
            0,
        );
        assert_eq!(run(|o| format_str("ab", &left, o)), "ab  ");
        let wide = spec('s', FormatFlags::default(), 3, 0);
        assert_eq!(run(|o| format_str("日本", &wide, o)), " 日本");
    }

    #[test]
    fn test_format_char() {
        let s = spec('c', FormatFlags::default(), 5, 0);
        assert_eq!(run(|o| format_char('A', &s, o)), "    A");
    }

    #[test]
    fn test_padding_is_bounded() {
        let s = spec('d', FormatFlags::default(), usize::MAX, 0);
        let out = run(|o| format_signed(1, &s, o));
        assert_eq!(out.len(), MAX_PAD + 1);
    }

    #[test]
    fn test_float_precision_is_bounded() {
        let s = spec('f', FormatFlags::default(), 0, usize::MAX);
        let out = run(|o| format_float(1.0, &s, o));
        assert_eq!(out.len(), 2 + MAX_PRECISION);
        assert!(out.starts_with("1.000"));
    }
}
