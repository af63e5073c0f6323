//! Mutable buffer used while assembling annotated text

use std::ops::Range;

use super::error::validate_range;
use super::{AnnotatedText, Annotation, Attribute, Boundary, TextError};

/// Mutable text plus annotations that follow the text through edits
///
/// Two kinds of edit are supported. [`replace_range`](Self::replace_range)
/// swaps a region for new text and never grows neighbouring annotations.
/// [`insert_str`](Self::insert_str) and [`push_str`](Self::push_str) insert
/// at a point and honour each annotation's [`Boundary`].
#[derive(Debug, Clone, Default)]
pub struct AnnotatedTextBuilder {
    text: String,
    annotations: Vec<Annotation>,
}

impl AnnotatedTextBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Vec::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Apply `attribute` over `range`
    pub fn annotate(
        &mut self,
        range: Range<usize>,
        attribute: Attribute,
        boundary: Boundary,
    ) -> Result<&mut Self, TextError> {
        validate_range(&self.text, &range)?;
        self.annotations
            .push(Annotation::new(range, attribute, boundary));
        Ok(self)
    }

    /// Replace `range` with `replacement`
    ///
    /// Offsets after the range shift by the change in length. Annotation
    /// starts inside the range collapse to its start, annotation ends inside
    /// it move to the end of the replacement.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> Result<(), TextError> {
        validate_range(&self.text, &range)?;
        self.text.replace_range(range.clone(), replacement);

        let inserted_end = range.start + replacement.len();
        let remap = |offset: usize, is_end: bool| -> usize {
            if offset <= range.start {
                offset
            } else if offset >= range.end {
                offset - range.end + inserted_end
            } else if is_end {
                inserted_end
            } else {
                range.start
            }
        };

        for annotation in &mut self.annotations {
            let start = remap(annotation.range.start, false);
            let end = remap(annotation.range.end, true);
            annotation.range = start..end.max(start);
        }
        Ok(())
    }

    /// Insert `s` at byte `offset`, growing annotations with inclusive edges there
    pub fn insert_str(&mut self, offset: usize, s: &str) -> Result<(), TextError> {
        validate_range(&self.text, &(offset..offset))?;
        self.text.insert_str(offset, s);

        let len = s.len();
        for annotation in &mut self.annotations {
            let Range { start, end } = annotation.range;
            let boundary = annotation.boundary;

            let new_start = if start > offset || (start == offset && !boundary.start_inclusive()) {
                start + len
            } else {
                start
            };
            let new_end = if end > offset || (end == offset && boundary.end_inclusive()) {
                end + len
            } else {
                end
            };
            annotation.range = new_start..new_end.max(new_start);
        }
        Ok(())
    }

    /// Append `s`, growing annotations whose end is inclusive and sits at the end
    pub fn push_str(&mut self, s: &str) {
        let len = self.text.len();
        // The end of the text is always a char boundary
        let _ = self.insert_str(len, s);
    }

    pub fn build(self) -> AnnotatedText {
        AnnotatedText {
            text: self.text,
            annotations: self.annotations,
        }
    }
}

impl From<AnnotatedText> for AnnotatedTextBuilder {
    fn from(value: AnnotatedText) -> Self {
        Self {
            text: value.text,
            annotations: value.annotations,
        }
    }
}
