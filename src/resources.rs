//! Resource bundles: templates, style tables and named styles in one TOML file
//!
//! ```toml
//! [metadata]
//! name = "demo"
//! namespace = "stylable_string"
//!
//! [strings]
//! greeting = "Hello %1$s, you have %2$d messages"
//!
//! [style_tables]
//! greeting = ["1|Name", "2|Count"]
//!
//! [styles.Name]
//! size = 18
//! color = "#2196f3"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::style::{ResolvedStyle, StyleResolver, DEFAULT_STYLE_CATEGORY};
use crate::text::Color;
use crate::ResourceSource;

/// Errors that can occur when loading a resource bundle
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to read resource file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse resource TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("style '{style}' has invalid color '{value}'")]
    InvalidColor { style: String, value: String },
}

/// Templates, style tables and styles loaded from TOML
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    pub name: Option<String>,
    /// When set, styles only resolve for this namespace
    pub namespace: Option<String>,
    pub strings: HashMap<String, String>,
    pub style_tables: HashMap<String, Vec<String>>,
    pub styles: HashMap<String, ResolvedStyle>,
}

#[derive(Deserialize)]
struct TomlBundle {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    strings: HashMap<String, String>,
    #[serde(default)]
    style_tables: HashMap<String, Vec<String>>,
    #[serde(default)]
    styles: HashMap<String, TomlStyle>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    namespace: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlStyle {
    size: Option<u32>,
    color: Option<String>,
}

impl ResourceBundle {
    /// Load a bundle from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a bundle from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ResourceError> {
        let parsed: TomlBundle = toml::from_str(content)?;

        let styles = parsed
            .styles
            .into_iter()
            .map(|(name, style)| {
                let color = match style.color {
                    Some(value) => Some(Color::parse(&value).ok_or_else(|| {
                        ResourceError::InvalidColor {
                            style: name.clone(),
                            value,
                        }
                    })?),
                    None => None,
                };
                Ok((name, ResolvedStyle::new(style.size, color)))
            })
            .collect::<Result<HashMap<_, _>, ResourceError>>()?;

        Ok(ResourceBundle {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            namespace: parsed.metadata.and_then(|m| m.namespace),
            strings: parsed.strings,
            style_tables: parsed.style_tables,
            styles,
        })
    }

    /// Template ids close to `id`, nearest first
    pub fn similar_templates(&self, id: &str) -> Vec<String> {
        find_similar(self.strings.keys(), id, 2)
    }

    /// Style table ids close to `id`, nearest first
    pub fn similar_style_tables(&self, id: &str) -> Vec<String> {
        find_similar(self.style_tables.keys(), id, 2)
    }
}

impl ResourceSource for ResourceBundle {
    fn resolve_template(&self, id: &str) -> Option<String> {
        self.strings.get(id).cloned()
    }

    fn resolve_style_table(&self, id: &str) -> Option<Vec<String>> {
        self.style_tables.get(id).cloned()
    }
}

impl StyleResolver for ResourceBundle {
    fn resolve_style(&self, name: &str, category: &str, namespace: &str) -> Option<ResolvedStyle> {
        if category != DEFAULT_STYLE_CATEGORY {
            return None;
        }
        if self.namespace.as_deref().is_some_and(|ns| ns != namespace) {
            return None;
        }
        self.styles.get(name).copied()
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    // Single rolling row: prev[j] is the distance between a[..i] and b[..j]
    let mut prev: Vec<usize> = (0..=n).collect();
    for (i, ca) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; n + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j + 1] + 1).min(current[j] + 1).min(prev[j] + cost);
        }
        prev = current;
    }
    prev[n]
}

fn find_similar<'a>(
    defined: impl Iterator<Item = &'a String>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = defined
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then(|| (name.clone(), dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name)
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r##"
[metadata]
name = "demo"
namespace = "app"

[strings]
greeting = "Hello %1$s"
farewell = "Bye %s"

[style_tables]
greeting = ["1|Name"]

[styles.Name]
size = 18
color = "#2196f3"

[styles.Muted]
color = "gray"
"##;

    #[test]
    fn test_parse_bundle() {
        let bundle = ResourceBundle::from_str(BUNDLE).unwrap();
        assert_eq!(bundle.name.as_deref(), Some("demo"));
        assert_eq!(bundle.namespace.as_deref(), Some("app"));
        assert_eq!(bundle.resolve_template("greeting").as_deref(), Some("Hello %1$s"));
        assert_eq!(
            bundle.resolve_style_table("greeting"),
            Some(vec!["1|Name".to_string()])
        );
        assert_eq!(bundle.resolve_template("missing"), None);
    }

    #[test]
    fn test_styles_resolve_in_scope() {
        let bundle = ResourceBundle::from_str(BUNDLE).unwrap();
        assert_eq!(
            bundle.resolve_style("Name", "style", "app"),
            Some(ResolvedStyle::new(Some(18), Some(Color(0xFF21_96F3))))
        );
        assert_eq!(
            bundle.resolve_style("Muted", "style", "app"),
            Some(ResolvedStyle::new(None, Some(Color(0xFF88_8888))))
        );
        assert_eq!(bundle.resolve_style("Name", "color", "app"), None);
        assert_eq!(bundle.resolve_style("Name", "style", "other"), None);
        assert_eq!(bundle.resolve_style("Unknown", "style", "app"), None);
    }

    #[test]
    fn test_bundle_without_namespace_accepts_any() {
        let bundle = ResourceBundle::from_str("[styles.Big]\nsize = 30\n").unwrap();
        assert!(bundle.resolve_style("Big", "style", "anything").is_some());
        assert!(bundle.strings.is_empty());
    }

    #[test]
    fn test_invalid_color() {
        let err = ResourceBundle::from_str("[styles.Bad]\ncolor = \"#12\"\n").unwrap_err();
        assert!(matches!(
            err,
            ResourceError::InvalidColor { ref style, ref value } if style == "Bad" && value == "#12"
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ResourceBundle::from_str("[strings\n").unwrap_err();
        assert!(matches!(err, ResourceError::Parse(_)));
    }

    #[test]
    fn test_similar_templates() {
        let bundle = ResourceBundle::from_str(BUNDLE).unwrap();
        assert_eq!(bundle.similar_templates("greting"), vec!["greeting".to_string()]);
        assert!(bundle.similar_templates("zzzzzzzz").is_empty());
        assert_eq!(bundle.similar_style_tables("greetin"), vec!["greeting".to_string()]);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
