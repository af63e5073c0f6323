//! Argument values substituted into templates

use std::fmt;

use crate::text::AnnotatedText;

/// A value a specifier can be applied to
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Str(String),
    Int(i64),
    Float(f64),
    Char(char),
    Bool(bool),
    /// Already-annotated text; its annotations are carried into the output
    Annotated(AnnotatedText),
}

impl Argument {
    /// Short name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Argument::Str(_) => "string",
            Argument::Int(_) => "integer",
            Argument::Float(_) => "float",
            Argument::Char(_) => "char",
            Argument::Bool(_) => "bool",
            Argument::Annotated(_) => "annotated text",
        }
    }

    pub fn as_annotated(&self) -> Option<&AnnotatedText> {
        match self {
            Argument::Annotated(text) => Some(text),
            _ => None,
        }
    }
}

/// The text `%s` produces for a value
///
/// Floats always show at least one fractional digit and switch to
/// scientific notation (`1.5E10`) outside `[1e-3, 1e7)`.
impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Str(s) => f.write_str(s),
            Argument::Int(i) => write!(f, "{}", i),
            Argument::Float(v) => f.write_str(&float_string(*v)),
            Argument::Char(c) => write!(f, "{}", c),
            Argument::Bool(b) => write!(f, "{}", b),
            Argument::Annotated(text) => f.write_str(text.as_str()),
        }
    }
}

fn float_string(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = v.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let s = format!("{}", v);
        if s.contains('.') {
            s
        } else {
            format!("{}.0", s)
        }
    } else {
        // `{:e}` gives `1.5e10` or `1e7`
        let s = format!("{:e}", v);
        let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Str(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Str(s)
    }
}

impl From<&String> for Argument {
    fn from(s: &String) -> Self {
        Argument::Str(s.clone())
    }
}

macro_rules! int_argument {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Argument {
                fn from(v: $t) -> Self {
                    Argument::Int(i64::from(v))
                }
            }
        )*
    };
}

int_argument!(i8, i16, i32, i64, u8, u16, u32);

// Widen through the shortest `f32` digits, so `0.1f32` stays `0.1`
impl From<f32> for Argument {
    fn from(v: f32) -> Self {
        Argument::Float(v.to_string().parse().unwrap_or(f64::from(v)))
    }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self {
        Argument::Float(v)
    }
}

impl From<char> for Argument {
    fn from(c: char) -> Self {
        Argument::Char(c)
    }
}

impl From<bool> for Argument {
    fn from(b: bool) -> Self {
        Argument::Bool(b)
    }
}

impl From<AnnotatedText> for Argument {
    fn from(text: AnnotatedText) -> Self {
        Argument::Annotated(text)
    }
}

/// Build a `Vec<Argument>` from heterogeneous values
///
/// ```rust
/// use stylable_string::{args, Argument};
///
/// let values = args!["apples", 3, 1.5];
/// assert_eq!(values[1], Argument::Int(3));
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::Argument::from($value)),*]
    };
}
