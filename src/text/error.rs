//! Error types for annotated text buffers

use thiserror::Error;

/// Errors raised when an annotation range does not fit the text it targets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// The range starts after it ends
    #[error("invalid range {start}..{end} (start > end) for text of len {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The range reaches past the end of the text
    #[error("range {start}..{end} out of bounds for text of len {len}")]
    InvalidBounds { start: usize, end: usize, len: usize },

    /// One endpoint splits a UTF-8 code point
    #[error("range {start}..{end}: {endpoint} index {index} is not on a char boundary")]
    NotOnCharBoundary {
        start: usize,
        end: usize,
        endpoint: Endpoint,
        index: usize,
    },
}

/// Which end of a range failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Check that `range` is well formed for `text`
pub(crate) fn validate_range(text: &str, range: &std::ops::Range<usize>) -> Result<(), TextError> {
    let len = text.len();
    if range.start > range.end {
        return Err(TextError::InvalidRange {
            start: range.start,
            end: range.end,
            len,
        });
    }
    if range.end > len {
        return Err(TextError::InvalidBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    for (endpoint, index) in [(Endpoint::Start, range.start), (Endpoint::End, range.end)] {
        if !text.is_char_boundary(index) {
            return Err(TextError::NotOnCharBoundary {
                start: range.start,
                end: range.end,
                endpoint,
                index,
            });
        }
    }
    Ok(())
}
