//! Template formatting
//!
//! - [`specifier`]: finds placeholders and splits them into fields
//! - [`printf`]: renders one argument for one specifier
//! - [`formatter`]: drives substitution and annotation over a whole template

mod argument;
pub mod formatter;
pub mod printf;
pub mod specifier;

pub use argument::Argument;
pub use formatter::format_template;
pub use printf::{render, ConversionError, Rendered};
pub use specifier::{find_specifier, FormatSpecifier, SpecifierMatch};
