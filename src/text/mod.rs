//! Annotated text: a string plus attributes applied to byte ranges of it
//!
//! [`AnnotatedText`] is the finished, immutable value. [`AnnotatedTextBuilder`]
//! is the mutable buffer used while a value is being assembled; annotations
//! follow the text through its edits.
//!
//! Offsets are UTF-8 byte offsets and must fall on char boundaries.

mod annotated;
mod attribute;
mod builder;
mod error;

pub use annotated::{AnnotatedText, Annotation};
pub use attribute::{Attribute, Boundary, Color};
pub use builder::AnnotatedTextBuilder;
pub use error::{Endpoint, TextError};
