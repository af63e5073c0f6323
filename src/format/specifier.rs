//! Locating and splitting `printf`-style format specifiers
//!
//! The grammar is
//!
//! ```text
//! %[argIndex$][flags][width][.precision][t|T]conversion
//! ```
//!
//! where flags are any of `-#+ 0,(<` and the conversion is a single ASCII
//! letter or `%`. Nothing else in a template is treated as a placeholder.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ConversionError;

static SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([0-9]+\$)?([-#+ 0,(<]*)([0-9]+)?(\.[0-9]+)?([tT])?([a-zA-Z%])")
        .expect("specifier pattern is valid")
});

/// One placeholder occurrence, split into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpecifier {
    /// Explicit 1-based argument index from an `N$` prefix
    ///
    /// Indices too large to represent saturate, which keeps them out of range.
    pub arg_index: Option<usize>,
    pub flags: String,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    /// `t` or `T` date/time prefix
    pub time_prefix: Option<char>,
    pub conversion: char,
}

/// A specifier found in a template, with the byte range it occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierMatch {
    pub range: Range<usize>,
    pub specifier: Result<FormatSpecifier, ConversionError>,
}

impl FormatSpecifier {
    fn from_captures(caps: &Captures<'_>) -> Result<Self, ConversionError> {
        let arg_index = caps.get(1).map(|m| {
            let digits = m.as_str().trim_end_matches('$');
            digits.parse().unwrap_or(usize::MAX)
        });
        let width = caps
            .get(3)
            .map(|m| parse_number(m.as_str()))
            .transpose()?;
        let precision = caps
            .get(4)
            .map(|m| parse_number(&m.as_str()[1..]))
            .transpose()?;

        Ok(Self {
            arg_index,
            flags: caps.get(2).map_or_else(String::new, |m| m.as_str().to_string()),
            width,
            precision,
            time_prefix: caps.get(5).and_then(|m| m.as_str().chars().next()),
            conversion: caps
                .get(6)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('%'),
        })
    }

    /// Whether `flag` appears among the flags
    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    /// Conversions that never read an argument
    pub fn is_literal(&self) -> bool {
        self.time_prefix.is_none() && matches!(self.conversion, '%' | 'n')
    }

    /// The specifier with its explicit index stripped
    ///
    /// This is the form applied to the single selected argument.
    pub fn bare(&self) -> String {
        let mut s = String::from("%");
        s.push_str(&self.flags);
        if let Some(width) = self.width {
            s.push_str(&width.to_string());
        }
        if let Some(precision) = self.precision {
            s.push('.');
            s.push_str(&precision.to_string());
        }
        if let Some(t) = self.time_prefix {
            s.push(t);
        }
        s.push(self.conversion);
        s
    }
}

impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg_index {
            Some(index) => write!(f, "%{}${}", index, &self.bare()[1..]),
            None => f.write_str(&self.bare()),
        }
    }
}

/// Widths and precisions are capped at `i32::MAX`
fn parse_number(digits: &str) -> Result<usize, ConversionError> {
    digits
        .parse::<usize>()
        .ok()
        .filter(|&n| n <= i32::MAX as usize)
        .ok_or_else(|| ConversionError::NumberTooLarge(digits.to_string()))
}

/// Find the first specifier starting at or after byte `start` of `haystack`
pub fn find_specifier(haystack: &str, start: usize) -> Option<SpecifierMatch> {
    let caps = SPECIFIER.captures_at(haystack, start)?;
    let whole = caps.get(0)?;
    Some(SpecifierMatch {
        range: whole.range(),
        specifier: FormatSpecifier::from_captures(&caps),
    })
}
