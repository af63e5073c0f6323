//! Immutable annotated text

use std::fmt;
use std::ops::Range;

use super::{AnnotatedTextBuilder, Attribute, Boundary};

/// An attribute applied to a byte range of text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub range: Range<usize>,
    pub attribute: Attribute,
    pub boundary: Boundary,
}

impl Annotation {
    pub fn new(range: Range<usize>, attribute: Attribute, boundary: Boundary) -> Self {
        Self {
            range,
            attribute,
            boundary,
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} {} ({})",
            self.range.start, self.range.end, self.attribute, self.boundary
        )
    }
}

/// A block of text with attributes applied to byte ranges within it
///
/// Values are produced by [`AnnotatedTextBuilder::build`] and never change
/// afterwards. Annotations are kept in the order they were applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedText {
    pub(crate) text: String,
    pub(crate) annotations: Vec<Annotation>,
}

impl AnnotatedText {
    /// Create annotated text with no annotations
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Vec::new(),
        }
    }

    /// Start a builder over `text`
    pub fn builder(text: impl Into<String>) -> AnnotatedTextBuilder {
        AnnotatedTextBuilder::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// All annotations, in application order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Attributes covering the byte at `index`
    pub fn annotations_at(&self, index: usize) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |a| a.range.contains(&index))
    }

    /// Annotations overlapping `range`
    pub fn annotations_for_range(&self, range: Range<usize>) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |a| a.range.start < range.end && a.range.end > range.start)
    }

    /// Turn this value back into a builder for further edits
    pub fn into_builder(self) -> AnnotatedTextBuilder {
        AnnotatedTextBuilder::from(self)
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for AnnotatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for AnnotatedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for AnnotatedText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnnotatedText {
        let mut builder = AnnotatedText::builder("Hello!");
        builder
            .annotate(1..3, Attribute::Bold, Boundary::ExclusiveExclusive)
            .unwrap();
        builder
            .annotate(2..5, Attribute::Italic, Boundary::ExclusiveInclusive)
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_annotations_at() {
        let text = sample();
        assert_eq!(text.annotations_at(0).count(), 0);
        assert_eq!(text.annotations_at(2).count(), 2);

        let at_four: Vec<_> = text.annotations_at(4).map(|a| &a.attribute).collect();
        assert_eq!(at_four, vec![&Attribute::Italic]);
    }

    #[test]
    fn test_annotations_for_range() {
        let text = sample();
        assert_eq!(text.annotations_for_range(0..1).count(), 0);
        assert_eq!(text.annotations_for_range(0..2).count(), 1);
        assert_eq!(text.annotations_for_range(3..6).count(), 1);
        assert_eq!(text.annotations_for_range(5..6).count(), 0);
    }

    #[test]
    fn test_display_is_plain_text() {
        let text = sample();
        assert_eq!(text.to_string(), "Hello!");
        assert_eq!(text.len(), 6);
        assert_eq!(
            text.annotations()[1].to_string(),
            "2..5 italic (exclusive-inclusive)"
        );
    }

    #[test]
    fn test_into_builder_keeps_annotations() {
        let mut builder = sample().into_builder();
        builder.push_str(" World");
        let text = builder.build();
        assert_eq!(text.as_str(), "Hello! World");
        assert_eq!(text.annotations().len(), 2);
    }
}
