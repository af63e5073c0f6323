//! Style tables: which visual attributes apply to which argument
//!
//! A style table is a list of raw `"<index>|<styleName>"` rows. Each style
//! name is looked up through a [`StyleResolver`]; the resolved styles are
//! grouped by 1-based argument index.

mod table;

pub use table::StyleTable;

use std::collections::HashMap;

use crate::text::{Attribute, Color};

/// Category passed to resolvers when the caller does not choose one
pub const DEFAULT_STYLE_CATEGORY: &str = "style";

/// Namespace passed to resolvers when the caller does not choose one
pub const DEFAULT_STYLE_NAMESPACE: &str = "stylable_string";

/// The visual attributes a named style resolves to
///
/// An absent field means the attribute is not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolvedStyle {
    pub size_px: Option<u32>,
    pub color: Option<Color>,
}

impl ResolvedStyle {
    pub fn new(size_px: Option<u32>, color: Option<Color>) -> Self {
        Self { size_px, color }
    }

    pub fn with_size(mut self, size_px: u32) -> Self {
        self.size_px = Some(size_px);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Attributes to attach, size before color
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        let size = self.size_px.map(Attribute::TextSize);
        let color = self.color.map(Attribute::ForegroundColor);
        size.into_iter().chain(color)
    }
}

/// Looks up named styles
///
/// `category` and `namespace` are scoping parameters passed through
/// unchanged from the caller. Implementations must be free of side effects.
pub trait StyleResolver {
    fn resolve_style(&self, name: &str, category: &str, namespace: &str) -> Option<ResolvedStyle>;
}

impl StyleResolver for HashMap<String, ResolvedStyle> {
    fn resolve_style(&self, name: &str, _category: &str, _namespace: &str) -> Option<ResolvedStyle> {
        self.get(name).copied()
    }
}

impl<F> StyleResolver for F
where
    F: Fn(&str, &str, &str) -> Option<ResolvedStyle>,
{
    fn resolve_style(&self, name: &str, category: &str, namespace: &str) -> Option<ResolvedStyle> {
        self(name, category, namespace)
    }
}
