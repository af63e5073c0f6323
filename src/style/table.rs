//! Building a style table from raw rows

use std::collections::BTreeMap;

use log::{trace, warn};

use super::{ResolvedStyle, StyleResolver};
use crate::error::FormatError;

/// Resolved styles grouped by 1-based argument index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    styles: BTreeMap<usize, Vec<ResolvedStyle>>,
}

impl StyleTable {
    /// A table with no entries; every lookup yields no styles
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `"<index>|<styleName>"` rows and resolve each style name
    ///
    /// Malformed rows abort the build. A style name the resolver does not
    /// know is logged and contributes nothing. Rows sharing an index append
    /// in input order.
    pub fn build<S, R>(
        rows: &[S],
        resolver: &R,
        category: &str,
        namespace: &str,
    ) -> Result<Self, FormatError>
    where
        S: AsRef<str>,
        R: StyleResolver + ?Sized,
    {
        let mut table = Self::empty();

        for row in rows {
            let row = row.as_ref();
            let (index, name) = parse_row(row)?;
            trace!("style row {}: argument {} -> '{}'", row, index, name);

            match resolver.resolve_style(name, category, namespace) {
                Some(style) => table.push(index, style),
                None => {
                    warn!(
                        "style not found: '{}' (category '{}', namespace '{}'); argument {} stays unstyled",
                        name, category, namespace, index
                    );
                }
            }
        }

        Ok(table)
    }

    /// Append `style` to the list for the 1-based `arg_index`
    pub fn push(&mut self, arg_index: usize, style: ResolvedStyle) {
        self.styles.entry(arg_index).or_default().push(style);
    }

    /// Styles for the 1-based `arg_index`, in row order
    pub fn styles_for(&self, arg_index: usize) -> &[ResolvedStyle] {
        self.styles
            .get(&arg_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of argument indices with at least one style
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[ResolvedStyle])> {
        self.styles.iter().map(|(i, s)| (*i, s.as_slice()))
    }
}

/// Split a row into its argument index and style name
fn parse_row(row: &str) -> Result<(usize, &str), FormatError> {
    let fields: Vec<&str> = row.split('|').collect();
    let [index, name] = fields.as_slice() else {
        return Err(FormatError::malformed_row(
            row,
            format!("expected 'index|styleName', found {} field(s)", fields.len()),
        ));
    };

    let index: usize = index
        .parse()
        .map_err(|_| FormatError::malformed_row(row, format!("'{}' is not an argument index", index)))?;
    if index == 0 {
        return Err(FormatError::malformed_row(row, "argument indices start at 1"));
    }
    if name.is_empty() {
        return Err(FormatError::malformed_row(row, "missing style name"));
    }

    Ok((index, *name))
}
