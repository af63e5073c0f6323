//! Stylable String - printf-style templates that come out as annotated text
//!
//! A template such as `"Hello %1$s, you have %2$d messages"` is filled in
//! with arguments, and each substituted value can be annotated with the text
//! size and color its argument index is mapped to in a style table.
//!
//! # Example
//!
//! ```rust
//! use stylable_string::{args, format, Color, ResolvedStyle, StyleTable};
//!
//! let mut table = StyleTable::empty();
//! table.push(2, ResolvedStyle::default().with_color(Color::rgb(255, 0, 0)));
//!
//! let text = format("%s costs %s", &table, &args!["Tea", "3 EUR"]).unwrap();
//! assert_eq!(text.as_str(), "Tea costs 3 EUR");
//! assert_eq!(text.annotations()[0].range, 10..15);
//! ```

pub mod error;
pub mod format;
pub mod resources;
pub mod style;
pub mod text;

pub use error::{ErrorKind, FormatError, Span};
pub use format::{format_template, Argument, ConversionError, FormatSpecifier};
pub use resources::{ResourceBundle, ResourceError};
pub use style::{
    ResolvedStyle, StyleResolver, StyleTable, DEFAULT_STYLE_CATEGORY, DEFAULT_STYLE_NAMESPACE,
};
pub use text::{
    AnnotatedText, AnnotatedTextBuilder, Annotation, Attribute, Boundary, Color, TextError,
};

/// Pass as the style table id to format without styles
pub const NO_STYLE_TABLE: Option<&str> = None;

/// Looks up templates and style tables by id
pub trait ResourceSource {
    fn resolve_template(&self, id: &str) -> Option<String>;

    /// Raw `"<index>|<styleName>"` rows of a style table
    fn resolve_style_table(&self, id: &str) -> Option<Vec<String>>;
}

/// Configuration for formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Category passed to the style resolver
    pub style_category: String,
    /// Namespace passed to the style resolver
    pub style_namespace: String,
    /// Whether `%%` and `%n` take a position in the sequential argument order
    ///
    /// When set (the default), each of them reads the next argument, fails
    /// if it is missing, and gets that argument's styles.
    pub percent_consumes_argument: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            style_category: DEFAULT_STYLE_CATEGORY.to_string(),
            style_namespace: DEFAULT_STYLE_NAMESPACE.to_string(),
            percent_consumes_argument: true,
        }
    }
}

impl FormatConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_category(mut self, category: impl Into<String>) -> Self {
        self.style_category = category.into();
        self
    }

    pub fn with_style_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.style_namespace = namespace.into();
        self
    }

    pub fn with_percent_consumes_argument(mut self, consumes: bool) -> Self {
        self.percent_consumes_argument = consumes;
        self
    }
}

/// Format `template` with default configuration
pub fn format(
    template: &str,
    table: &StyleTable,
    args: &[Argument],
) -> Result<AnnotatedText, FormatError> {
    format_template(template, table, args, &FormatConfig::default())
}

/// Look up a template and its style table, then format it
///
/// Pass [`NO_STYLE_TABLE`] to format without styles.
///
/// # Example
///
/// ```rust
/// use stylable_string::{args, format_resource, FormatConfig, ResourceBundle};
///
/// let bundle = ResourceBundle::from_str(r##"
///     [strings]
///     greeting = "Hello %s"
///
///     [style_tables]
///     greeting = ["1|Name"]
///
///     [styles.Name]
///     color = "red"
/// "##).unwrap();
///
/// let text = format_resource(
///     &bundle,
///     &bundle,
///     "greeting",
///     Some("greeting"),
///     &args!["World"],
///     &FormatConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(text.as_str(), "Hello World");
/// assert_eq!(text.annotations()[0].range, 6..11);
/// ```
pub fn format_resource<S, R>(
    source: &S,
    resolver: &R,
    template_id: &str,
    style_table_id: Option<&str>,
    args: &[Argument],
    config: &FormatConfig,
) -> Result<AnnotatedText, FormatError>
where
    S: ResourceSource + ?Sized,
    R: StyleResolver + ?Sized,
{
    if args.is_empty() {
        return Err(FormatError::NoArguments);
    }

    let template = source
        .resolve_template(template_id)
        .ok_or_else(|| FormatError::TemplateNotFound {
            id: template_id.to_string(),
        })?;

    let table = match style_table_id {
        Some(id) => {
            let rows = source
                .resolve_style_table(id)
                .ok_or_else(|| FormatError::StyleTableNotFound { id: id.to_string() })?;
            StyleTable::build(&rows, resolver, &config.style_category, &config.style_namespace)?
        }
        None => StyleTable::empty(),
    };

    format_template(&template, &table, args, config)
}

/// [`format_resource`] with default configuration
pub fn format_resource_default<S, R>(
    source: &S,
    resolver: &R,
    template_id: &str,
    style_table_id: Option<&str>,
    args: &[Argument],
) -> Result<AnnotatedText, FormatError>
where
    S: ResourceSource + ?Sized,
    R: StyleResolver + ?Sized,
{
    format_resource(
        source,
        resolver,
        template_id,
        style_table_id,
        args,
        &FormatConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn bundle() -> ResourceBundle {
        ResourceBundle::from_str(
            r##"
[strings]
price = "%1$s: %2$.2f"
broken = "%s"

[style_tables]
price = ["2|Amount", "2|Missing"]
malformed = ["two|Amount"]

[styles.Amount]
size = 20
color = "#00ff00"
"##,
        )
        .unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = FormatConfig::new()
            .with_style_category("text")
            .with_style_namespace("app")
            .with_percent_consumes_argument(false);
        assert_eq!(config.style_category, "text");
        assert_eq!(config.style_namespace, "app");
        assert!(!config.percent_consumes_argument);
        assert!(FormatConfig::default().percent_consumes_argument);
    }

    #[test]
    fn test_format_resource_with_styles() {
        let bundle = bundle();
        let text = format_resource_default(
            &bundle,
            &bundle,
            "price",
            Some("price"),
            &args!["Tea", 3.5],
        )
        .unwrap();
        assert_eq!(text.as_str(), "Tea: 3.50");
        let attrs: Vec<_> = text
            .annotations()
            .iter()
            .map(|a| (a.range.clone(), a.attribute.clone()))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (5..9, Attribute::TextSize(20)),
                (5..9, Attribute::ForegroundColor(Color(0xFF00_FF00))),
            ]
        );
    }

    #[test]
    fn test_format_resource_without_style_table() {
        let bundle = bundle();
        let text = format_resource_default(&bundle, &bundle, "price", NO_STYLE_TABLE, &args!["Tea", 1.0])
            .unwrap();
        assert_eq!(text.as_str(), "Tea: 1.00");
        assert!(text.annotations().is_empty());
    }

    #[test]
    fn test_format_resource_errors() {
        let bundle = bundle();
        let missing = format_resource_default(&bundle, &bundle, "nope", NO_STYLE_TABLE, &args!["x"]);
        assert!(matches!(missing, Err(FormatError::TemplateNotFound { ref id }) if id == "nope"));
        assert_eq!(missing.unwrap_err().kind(), ErrorKind::InvalidArgument);

        let no_table = format_resource_default(&bundle, &bundle, "broken", Some("nope"), &args!["x"]);
        assert!(matches!(no_table, Err(FormatError::StyleTableNotFound { .. })));

        let malformed =
            format_resource_default(&bundle, &bundle, "broken", Some("malformed"), &args!["x"]);
        assert_eq!(malformed.unwrap_err().kind(), ErrorKind::MalformedStyleRow);

        let empty = format_resource_default(&bundle, &bundle, "nope", NO_STYLE_TABLE, &[]);
        assert_eq!(empty.unwrap_err().kind(), ErrorKind::NoArguments);
    }

    #[test]
    fn test_custom_category_hides_bundle_styles() {
        let bundle = bundle();
        let config = FormatConfig::default().with_style_category("other");
        let text = format_resource(
            &bundle,
            &bundle,
            "price",
            Some("price"),
            &args!["Tea", 2.0],
            &config,
        )
        .unwrap();
        assert!(text.annotations().is_empty());
    }

    #[test]
    fn test_format_with_closure_resolver() {
        let bundle = bundle();
        let resolver = |name: &str, _: &str, _: &str| {
            (name == "Amount").then(|| ResolvedStyle::default().with_size(9))
        };
        let text = format_resource_default(&bundle, &resolver, "price", Some("price"), &args!["a", 0.5])
            .unwrap();
        assert_eq!(text.annotations().len(), 1);
        assert_eq!(text.annotations()[0].attribute, Attribute::TextSize(9));
    }
}
