//! Applying one format specifier to one argument
//!
//! Output follows the usual `printf` conventions for the conversions listed
//! below. Flags that make no sense for a conversion are rejected, and
//! floating point values are rounded half up from their shortest decimal
//! representation.
//!
//! | conversion | argument |
//! |---|---|
//! | `s` `S` | any, rendered as text |
//! | `b` `B` | any; only `Bool(false)` renders `false` |
//! | `c` `C` | `Char`, or `Int` as a code point |
//! | `d` `o` `x` `X` | `Int` |
//! | `e` `E` `f` `g` `G` | `Float` |
//! | `%` `n` | none |

use std::ops::Range;

use thiserror::Error;

use super::{Argument, FormatSpecifier};

/// Why a specifier could not be applied to its argument
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unknown conversion '{0}'")]
    UnknownConversion(char),

    #[error("{0} conversions are not supported")]
    Unsupported(String),

    #[error("'%{conversion}' cannot format {argument} values")]
    ArgumentMismatch {
        conversion: char,
        argument: &'static str,
    },

    #[error("flag '{0}' given more than once")]
    DuplicateFlag(char),

    #[error("flags '{flags}' cannot be used with '%{conversion}'")]
    FlagsMismatch { flags: String, conversion: char },

    #[error("flags '{0}' cannot be combined")]
    IllegalFlags(String),

    #[error("flag '{0}' requires a width")]
    MissingWidth(char),

    #[error("precision is not allowed with '%{0}'")]
    IllegalPrecision(char),

    #[error("width is not allowed with '%{0}'")]
    IllegalWidth(char),

    #[error("'<' refers to a previous argument, but each specifier formats one argument")]
    NoPreviousArgument,

    #[error("{0} is not a valid code point")]
    InvalidCodePoint(i64),

    #[error("number {0} is too large")]
    NumberTooLarge(String),

    #[error("no argument available")]
    MissingArgument,
}

/// Output of a single conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Where the value itself sits inside `text`, excluding width padding
    pub value: Range<usize>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Flags {
    left: bool,
    alternate: bool,
    plus: bool,
    space: bool,
    zero: bool,
    group: bool,
    parens: bool,
    previous: bool,
}

impl Flags {
    fn parse(s: &str) -> Result<Self, ConversionError> {
        let mut flags = Flags::default();
        for c in s.chars() {
            let slot = match c {
                '-' => &mut flags.left,
                '#' => &mut flags.alternate,
                '+' => &mut flags.plus,
                ' ' => &mut flags.space,
                '0' => &mut flags.zero,
                ',' => &mut flags.group,
                '(' => &mut flags.parens,
                '<' => &mut flags.previous,
                // The scanner only lets the characters above through
                _ => continue,
            };
            if *slot {
                return Err(ConversionError::DuplicateFlag(c));
            }
            *slot = true;
        }
        Ok(flags)
    }

    fn is_empty(&self) -> bool {
        !(self.left
            || self.alternate
            || self.plus
            || self.space
            || self.zero
            || self.group
            || self.parens
            || self.previous)
    }
}

/// Apply `spec` to `arg`
///
/// `arg` may be `None` only for `%%` and `%n`.
pub fn render(spec: &FormatSpecifier, arg: Option<&Argument>) -> Result<Rendered, ConversionError> {
    let flags = Flags::parse(&spec.flags)?;
    let conversion = spec.conversion;

    if let Some(prefix) = spec.time_prefix {
        return Err(ConversionError::Unsupported(format!(
            "date/time (%{}{})",
            prefix, conversion
        )));
    }

    match conversion {
        '%' | 'n' => literal(spec, &flags),
        's' | 'S' | 'b' | 'B' => {
            check_general(spec, &flags)?;
            general(spec, &flags, require(arg, &flags)?)
        }
        'c' | 'C' => {
            check_character(spec, &flags)?;
            character(spec, &flags, require(arg, &flags)?)
        }
        'd' | 'o' | 'x' | 'X' => {
            check_integer(spec, &flags)?;
            integer(spec, &flags, require(arg, &flags)?)
        }
        'e' | 'E' | 'f' | 'g' | 'G' => {
            check_float(spec, &flags)?;
            float(spec, &flags, require(arg, &flags)?)
        }
        'a' | 'A' => Err(ConversionError::Unsupported("hexadecimal floating point".into())),
        'h' | 'H' => Err(ConversionError::Unsupported("hash code".into())),
        other => Err(ConversionError::UnknownConversion(other)),
    }
}

fn require<'a>(arg: Option<&'a Argument>, flags: &Flags) -> Result<&'a Argument, ConversionError> {
    if flags.previous {
        return Err(ConversionError::NoPreviousArgument);
    }
    arg.ok_or(ConversionError::MissingArgument)
}

fn mismatch(spec: &FormatSpecifier, arg: &Argument) -> ConversionError {
    ConversionError::ArgumentMismatch {
        conversion: spec.conversion,
        argument: arg.type_name(),
    }
}

fn bad_flags(spec: &FormatSpecifier, present: &[(bool, char)]) -> Result<(), ConversionError> {
    let flags: String = present
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, c)| *c)
        .collect();
    if flags.is_empty() {
        Ok(())
    } else {
        Err(ConversionError::FlagsMismatch {
            flags,
            conversion: spec.conversion,
        })
    }
}

fn check_general(spec: &FormatSpecifier, flags: &Flags) -> Result<(), ConversionError> {
    if spec.width.is_none() && flags.left {
        return Err(ConversionError::MissingWidth('-'));
    }
    bad_flags(
        spec,
        &[
            (flags.alternate, '#'),
            (flags.plus, '+'),
            (flags.space, ' '),
            (flags.zero, '0'),
            (flags.group, ','),
            (flags.parens, '('),
        ],
    )
}

fn check_character(spec: &FormatSpecifier, flags: &Flags) -> Result<(), ConversionError> {
    if spec.precision.is_some() {
        return Err(ConversionError::IllegalPrecision(spec.conversion));
    }
    check_general(spec, flags)
}

fn check_numeric(spec: &FormatSpecifier, flags: &Flags) -> Result<(), ConversionError> {
    if spec.width.is_none() {
        if flags.left {
            return Err(ConversionError::MissingWidth('-'));
        }
        if flags.zero {
            return Err(ConversionError::MissingWidth('0'));
        }
    }
    if flags.plus && flags.space {
        return Err(ConversionError::IllegalFlags("+ ".into()));
    }
    if flags.left && flags.zero {
        return Err(ConversionError::IllegalFlags("-0".into()));
    }
    Ok(())
}

fn check_integer(spec: &FormatSpecifier, flags: &Flags) -> Result<(), ConversionError> {
    check_numeric(spec, flags)?;
    if spec.precision.is_some() {
        return Err(ConversionError::IllegalPrecision(spec.conversion));
    }
    if spec.conversion == 'd' {
        bad_flags(spec, &[(flags.alternate, '#')])
    } else {
        // Radix output is the raw bit pattern, so it has no sign
        bad_flags(
            spec,
            &[
                (flags.plus, '+'),
                (flags.space, ' '),
                (flags.group, ','),
                (flags.parens, '('),
            ],
        )
    }
}

fn check_float(spec: &FormatSpecifier, flags: &Flags) -> Result<(), ConversionError> {
    check_numeric(spec, flags)?;
    match spec.conversion {
        'e' | 'E' => bad_flags(spec, &[(flags.group, ',')]),
        'g' | 'G' => bad_flags(spec, &[(flags.alternate, '#')]),
        _ => Ok(()),
    }
}

fn literal(spec: &FormatSpecifier, flags: &Flags) -> Result<Rendered, ConversionError> {
    if spec.precision.is_some() {
        return Err(ConversionError::IllegalPrecision(spec.conversion));
    }
    if spec.conversion == 'n' {
        if spec.width.is_some() {
            return Err(ConversionError::IllegalWidth('n'));
        }
        if !flags.is_empty() {
            return Err(ConversionError::IllegalFlags(spec.flags.clone()));
        }
        return Ok(justify("\n".to_string(), None, false));
    }

    // `-` is the only flag a literal percent accepts
    let others = Flags { left: false, ..*flags };
    if !others.is_empty() {
        return Err(ConversionError::IllegalFlags(spec.flags.clone()));
    }
    if spec.width.is_none() && flags.left {
        return Err(ConversionError::MissingWidth('-'));
    }
    Ok(justify("%".to_string(), spec.width, flags.left))
}

fn general(spec: &FormatSpecifier, flags: &Flags, arg: &Argument) -> Result<Rendered, ConversionError> {
    let mut s = match spec.conversion {
        'b' | 'B' => match arg {
            Argument::Bool(b) => b.to_string(),
            _ => "true".to_string(),
        },
        _ => arg.to_string(),
    };

    if let Some(precision) = spec.precision {
        if let Some((cut, _)) = s.char_indices().nth(precision) {
            s.truncate(cut);
        }
    }
    if spec.conversion.is_ascii_uppercase() {
        s = s.to_uppercase();
    }
    Ok(justify(s, spec.width, flags.left))
}

fn character(spec: &FormatSpecifier, flags: &Flags, arg: &Argument) -> Result<Rendered, ConversionError> {
    let c = match arg {
        Argument::Char(c) => *c,
        Argument::Int(i) => u32::try_from(*i)
            .ok()
            .and_then(char::from_u32)
            .ok_or(ConversionError::InvalidCodePoint(*i))?,
        other => return Err(mismatch(spec, other)),
    };

    let mut s = c.to_string();
    if spec.conversion == 'C' {
        s = s.to_uppercase();
    }
    Ok(justify(s, spec.width, flags.left))
}

fn integer(spec: &FormatSpecifier, flags: &Flags, arg: &Argument) -> Result<Rendered, ConversionError> {
    let Argument::Int(value) = *arg else {
        return Err(mismatch(spec, arg));
    };

    let mut s = String::new();
    match spec.conversion {
        'd' => {
            let neg = value < 0;
            push_leading_sign(&mut s, flags, neg);
            let mut digits = value.unsigned_abs().to_string();
            if flags.group {
                digits = group_thousands(&digits);
            }
            let width = adjusted_width(spec.width, flags, neg);
            push_zero_padded(&mut s, &digits, width, flags);
            if neg && flags.parens {
                s.push(')');
            }
        }
        conversion => {
            // Negative values print as their 64-bit two's complement
            let bits = value as u64;
            let (digits, prefix) = match conversion {
                'o' => (format!("{:o}", bits), "0"),
                'x' => (format!("{:x}", bits), "0x"),
                _ => (format!("{:X}", bits), "0X"),
            };
            if flags.alternate {
                s.push_str(prefix);
            }
            push_zero_padded(&mut s, &digits, spec.width, flags);
        }
    }

    Ok(justify(s, spec.width, flags.left))
}

fn float(spec: &FormatSpecifier, flags: &Flags, arg: &Argument) -> Result<Rendered, ConversionError> {
    let Argument::Float(value) = *arg else {
        return Err(mismatch(spec, arg));
    };
    let upper = spec.conversion.is_ascii_uppercase();

    if value.is_nan() {
        let s = if upper { "NAN" } else { "NaN" };
        return Ok(justify(s.to_string(), spec.width, flags.left));
    }

    let neg = value < 0.0 || (value == 0.0 && value.is_sign_negative());
    let mut s = String::new();
    push_leading_sign(&mut s, flags, neg);

    if value.is_infinite() {
        s.push_str(if upper { "INFINITY" } else { "Infinity" });
    } else {
        let decimal = Decimal::from_f64(value.abs());
        let (mut mantissa, exponent) = match spec.conversion {
            'e' | 'E' => decimal.scientific(spec.precision.unwrap_or(6), upper),
            'f' => (decimal.fixed(spec.precision.unwrap_or(6)), String::new()),
            _ => decimal.general(spec.precision, upper),
        };
        if flags.alternate && !mantissa.contains('.') {
            mantissa.push('.');
        }
        if flags.group {
            mantissa = match mantissa.split_once('.') {
                Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
                None => group_thousands(&mantissa),
            };
        }
        let width = adjusted_width(spec.width, flags, neg).map(|w| w.saturating_sub(exponent.len()));
        push_zero_padded(&mut s, &mantissa, width, flags);
        s.push_str(&exponent);
    }

    if neg && flags.parens {
        s.push(')');
    }
    Ok(justify(s, spec.width, flags.left))
}

fn push_leading_sign(s: &mut String, flags: &Flags, neg: bool) {
    if neg {
        s.push(if flags.parens { '(' } else { '-' });
    } else if flags.plus {
        s.push('+');
    } else if flags.space {
        s.push(' ');
    }
}

/// Width left for sign and digits once a trailing `)` is accounted for
fn adjusted_width(width: Option<usize>, flags: &Flags, neg: bool) -> Option<usize> {
    width.map(|w| if neg && flags.parens { w.saturating_sub(1) } else { w })
}

/// Append `digits`, inserting zeros before them when the `0` flag asks for it
///
/// `s` already holds any sign or prefix; zeros go between it and the digits.
fn push_zero_padded(s: &mut String, digits: &str, width: Option<usize>, flags: &Flags) {
    if let (true, Some(width)) = (flags.zero, width) {
        let len = s.chars().count() + digits.chars().count();
        s.extend(std::iter::repeat('0').take(width.saturating_sub(len)));
    }
    s.push_str(digits);
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Pad `s` with spaces to `width` characters
fn justify(s: String, width: Option<usize>, left: bool) -> Rendered {
    let pad = width
        .map(|w| w.saturating_sub(s.chars().count()))
        .unwrap_or(0);
    let padding = " ".repeat(pad);
    if left {
        let value = 0..s.len();
        Rendered {
            text: s + &padding,
            value,
        }
    } else {
        let value = pad..pad + s.len();
        Rendered {
            text: padding + &s,
            value,
        }
    }
}

/// Decimal digits of a non-negative finite value
///
/// The value is `0.d0 d1 d2 ... × 10^(exp + 1)`, so `digits[k]` carries the
/// weight `10^(exp - k)`. Digits start out as the shortest representation
/// that round-trips, which is what HALF_UP rounding is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: Vec<u8>,
    exp: i32,
}

impl Decimal {
    fn from_f64(value: f64) -> Self {
        if value == 0.0 {
            return Decimal {
                digits: vec![0],
                exp: 0,
            };
        }
        let s = format!("{:e}", value);
        let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
        Decimal {
            digits: mantissa
                .bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect(),
            exp: exp.parse().unwrap_or(0),
        }
    }

    fn digit(&self, k: i32) -> char {
        let d = usize::try_from(k)
            .ok()
            .and_then(|k| self.digits.get(k))
            .copied()
            .unwrap_or(0);
        char::from(b'0' + d)
    }

    /// Keep `keep` significant digits, rounding half up
    fn round(&self, keep: i32) -> Decimal {
        let Ok(keep) = usize::try_from(keep) else {
            return Decimal {
                digits: Vec::new(),
                exp: self.exp,
            };
        };
        if keep >= self.digits.len() {
            return self.clone();
        }

        let mut digits = self.digits[..keep].to_vec();
        let mut exp = self.exp;
        if self.digits[keep] >= 5 {
            let mut i = keep;
            loop {
                if i == 0 {
                    digits.insert(0, 1);
                    exp += 1;
                    break;
                }
                i -= 1;
                if digits[i] == 9 {
                    digits[i] = 0;
                } else {
                    digits[i] += 1;
                    break;
                }
            }
        }
        Decimal { digits, exp }
    }

    /// `%f` with `precision` fractional digits
    fn fixed(&self, precision: usize) -> String {
        let precision = i32::try_from(precision).unwrap_or(i32::MAX);
        let r = self.round(self.exp.saturating_add(1).saturating_add(precision));

        let mut s = String::new();
        if r.exp >= 0 {
            for k in 0..=r.exp {
                s.push(r.digit(k));
            }
        } else {
            s.push('0');
        }
        if precision > 0 {
            s.push('.');
            for k in 1..=precision {
                s.push(r.digit(r.exp.saturating_add(k)));
            }
        }
        s
    }

    /// `%e` mantissa and exponent suffix with `precision` fractional digits
    fn scientific(&self, precision: usize, upper: bool) -> (String, String) {
        let precision = i32::try_from(precision).unwrap_or(i32::MAX);
        let r = self.round(precision.saturating_add(1));

        let mut mantissa = String::new();
        mantissa.push(r.digit(0));
        if precision > 0 {
            mantissa.push('.');
            for k in 1..=precision {
                mantissa.push(r.digit(k));
            }
        }

        let exp = if r.digits.iter().all(|d| *d == 0) { 0 } else { r.exp };
        let exponent = format!(
            "{}{}{:02}",
            if upper { 'E' } else { 'e' },
            if exp < 0 { '-' } else { '+' },
            exp.unsigned_abs()
        );
        (mantissa, exponent)
    }

    /// `%g`: fixed notation for magnitudes in `[1e-4, 10^precision)`, scientific otherwise
    fn general(&self, precision: Option<usize>, upper: bool) -> (String, String) {
        let precision = match precision {
            None => 6,
            Some(0) => 1,
            Some(p) => p,
        };
        let is_zero = self.digits.iter().all(|d| *d == 0);
        if is_zero {
            return (self.fixed(precision - 1), String::new());
        }

        let p = i32::try_from(precision).unwrap_or(i32::MAX);
        let rounded = self.round(p);
        if rounded.exp >= -4 && rounded.exp < p {
            let fraction = usize::try_from(p - 1 - rounded.exp).unwrap_or(0);
            (self.fixed(fraction), String::new())
        } else {
            self.scientific(precision - 1, upper)
        }
    }
}
