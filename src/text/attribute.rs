//! Attributes that can be attached to ranges of annotated text

use std::fmt;

/// A 32-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

/// Named colors accepted in addition to hex notation
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("darkgrey", 0xFF44_4444),
    ("grey", 0xFF88_8888),
    ("lightgrey", 0xFFCC_CCCC),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

impl Color {
    /// Build an opaque color from its red, green and blue channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Build a color from all four channels
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Alpha channel
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Parse `#rgb`, `#rrggbb`, `#aarrggbb` or a named color
    ///
    /// Names are matched case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let value = u32::from_str_radix(hex, 16).ok()?;
            return match hex.len() {
                3 => {
                    let r = ((value >> 8) & 0xF) as u8;
                    let g = ((value >> 4) & 0xF) as u8;
                    let b = (value & 0xF) as u8;
                    Some(Self::rgb(r * 0x11, g * 0x11, b * 0x11))
                }
                6 => Some(Color(0xFF00_0000 | value)),
                8 => Some(Color(value)),
                _ => None,
            };
        }

        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, value)| Color(*value))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// A visual attribute carried by an annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Absolute text size in pixels
    TextSize(u32),
    ForegroundColor(Color),
    BackgroundColor(Color),
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::TextSize(px) => write!(f, "size {}px", px),
            Attribute::ForegroundColor(c) => write!(f, "color {}", c),
            Attribute::BackgroundColor(c) => write!(f, "background {}", c),
            Attribute::Bold => write!(f, "bold"),
            Attribute::Italic => write!(f, "italic"),
            Attribute::Underline => write!(f, "underline"),
            Attribute::Strikethrough => write!(f, "strikethrough"),
        }
    }
}

/// Whether text inserted exactly at an annotation's edge joins the annotation
///
/// The first half names the start edge, the second half the end edge. An
/// inclusive edge absorbs insertions made at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Boundary {
    #[default]
    ExclusiveExclusive,
    ExclusiveInclusive,
    InclusiveExclusive,
    InclusiveInclusive,
}

impl Boundary {
    pub fn start_inclusive(self) -> bool {
        matches!(
            self,
            Boundary::InclusiveExclusive | Boundary::InclusiveInclusive
        )
    }

    pub fn end_inclusive(self) -> bool {
        matches!(
            self,
            Boundary::ExclusiveInclusive | Boundary::InclusiveInclusive
        )
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Boundary::ExclusiveExclusive => "exclusive-exclusive",
            Boundary::ExclusiveInclusive => "exclusive-inclusive",
            Boundary::InclusiveExclusive => "inclusive-exclusive",
            Boundary::InclusiveInclusive => "inclusive-inclusive",
        };
        f.write_str(s)
    }
}
