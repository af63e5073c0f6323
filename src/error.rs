//! Error types for template formatting

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::format::ConversionError;
use crate::text::TextError;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

/// Coarse classification of a [`FormatError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A template or style table reference could not be resolved
    InvalidArgument,
    /// The argument list was empty
    NoArguments,
    /// A style table row was not of the form `index|styleName`
    MalformedStyleRow,
    /// A specifier referred to an argument that was not supplied
    ArgumentIndexOutOfRange,
    /// A specifier could not be applied to its argument
    IllegalFormat,
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("style table not found: {id}")]
    StyleTableNotFound { id: String },

    #[error("no arguments supplied")]
    NoArguments,

    #[error("malformed style row '{row}': {reason}")]
    MalformedStyleRow { row: String, reason: String },

    /// `index` is 1-based, as written in the template or implied by position
    #[error("argument {index} requested but only {available} supplied")]
    ArgumentIndexOutOfRange {
        index: usize,
        available: usize,
        span: Span,
    },

    #[error("cannot apply '{specifier}': {reason}")]
    Conversion {
        specifier: String,
        reason: ConversionError,
        span: Span,
    },

    #[error("invalid annotation: {0}")]
    Text(#[from] TextError),
}

impl FormatError {
    pub(crate) fn malformed_row(row: &str, reason: impl Into<String>) -> Self {
        Self::MalformedStyleRow {
            row: row.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatError::TemplateNotFound { .. }
            | FormatError::StyleTableNotFound { .. }
            | FormatError::Text(_) => ErrorKind::InvalidArgument,
            FormatError::NoArguments => ErrorKind::NoArguments,
            FormatError::MalformedStyleRow { .. } => ErrorKind::MalformedStyleRow,
            FormatError::ArgumentIndexOutOfRange { .. } => ErrorKind::ArgumentIndexOutOfRange,
            FormatError::Conversion { .. } => ErrorKind::IllegalFormat,
        }
    }

    /// Location of the offending specifier in the original template, if any
    pub fn span(&self) -> Option<&Span> {
        match self {
            FormatError::ArgumentIndexOutOfRange { span, .. }
            | FormatError::Conversion { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Format the error with template context using ariadne
    ///
    /// Errors without a location fall back to their plain message.
    pub fn report(&self, template: &str, name: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };

        let label = match self {
            FormatError::ArgumentIndexOutOfRange { available, .. } => {
                format!("this specifier has no argument ({} supplied)", available)
            }
            FormatError::Conversion { reason, .. } => reason.to_string(),
            _ => self.to_string(),
        };

        let span = char_span(template, span);
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, name, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((name, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((name, Source::from(template)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Convert a byte span of `text` to the char offsets ariadne counts in
fn char_span(text: &str, span: &Span) -> Span {
    let chars = |offset: usize| text.get(..offset).map_or(offset, |s| s.chars().count());
    chars(span.start)..chars(span.end)
}
