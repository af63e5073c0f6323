//! The scan, substitute and annotate loop

use std::ops::Range;

use log::debug;

use super::{find_specifier, printf, Argument, FormatSpecifier, Rendered};
use crate::error::{FormatError, Span};
use crate::style::StyleTable;
use crate::text::{AnnotatedText, AnnotatedTextBuilder, Boundary};
use crate::FormatConfig;

/// Substitute `args` into `template` and annotate the substituted values
///
/// Specifiers are found left to right in the buffer as it is being
/// rewritten, so every offset already accounts for earlier substitutions.
/// Text outside specifiers is copied unchanged and never annotated.
///
/// An [`Argument::Annotated`] value rendered with `%s` or `%S` keeps its own
/// annotations, moved to where its text landed; the style table is not
/// consulted for it. Every other argument gets the table's styles for its
/// 1-based index over the whole substituted range, padding included.
pub fn format_template(
    template: &str,
    table: &StyleTable,
    args: &[Argument],
    config: &FormatConfig,
) -> Result<AnnotatedText, FormatError> {
    if args.is_empty() {
        return Err(FormatError::NoArguments);
    }

    let mut out = AnnotatedTextBuilder::new(template);
    let mut cursor = 0;
    let mut sequential = 0usize;
    // Output length minus template length for everything before the cursor
    let mut shift = 0isize;

    while cursor < out.len() {
        let Some(found) = find_specifier(out.as_str(), cursor) else {
            break;
        };
        let range = found.range;
        let span = original_span(&range, shift);

        let spec = found.specifier.map_err(|reason| FormatError::Conversion {
            specifier: out.as_str()[range.clone()].to_string(),
            reason,
            span: span.clone(),
        })?;

        let selected = if spec.is_literal() && !config.percent_consumes_argument {
            None
        } else {
            let position = match spec.arg_index {
                Some(explicit) => explicit,
                None => {
                    sequential += 1;
                    sequential
                }
            };
            let arg = position
                .checked_sub(1)
                .and_then(|i| args.get(i))
                .ok_or_else(|| FormatError::ArgumentIndexOutOfRange {
                    index: position,
                    available: args.len(),
                    span: span.clone(),
                })?;
            Some((position, arg))
        };

        let rendered = printf::render(&spec, selected.map(|(_, arg)| arg)).map_err(|reason| {
            FormatError::Conversion {
                specifier: spec.to_string(),
                reason,
                span: span.clone(),
            }
        })?;

        out.replace_range(range.clone(), &rendered.text)?;
        let inserted = range.start..range.start + rendered.text.len();
        debug!(
            "substituted {} at {}..{} -> {:?} (argument {:?})",
            spec,
            span.start,
            span.end,
            rendered.text,
            selected.map(|(position, _)| position)
        );

        if let Some((position, arg)) = selected {
            match arg {
                Argument::Annotated(value) => {
                    if renders_argument_text(&spec) {
                        carry_annotations(&mut out, value, &rendered, inserted.start, spec.conversion == 'S')?;
                    }
                }
                _ => {
                    for style in table.styles_for(position) {
                        for attribute in style.attributes() {
                            out.annotate(inserted.clone(), attribute, Boundary::ExclusiveInclusive)?;
                        }
                    }
                }
            }
        }

        shift += rendered.text.len() as isize - range.len() as isize;
        cursor = inserted.end;
    }

    Ok(out.build())
}

/// Map a range in the rewritten buffer back to the template
fn original_span(range: &Range<usize>, shift: isize) -> Span {
    let back = |offset: usize| offset.checked_add_signed(-shift).unwrap_or(0);
    back(range.start)..back(range.end)
}

/// Conversions whose output is the argument's own text
fn renders_argument_text(spec: &FormatSpecifier) -> bool {
    spec.time_prefix.is_none() && matches!(spec.conversion, 's' | 'S')
}

/// Copy `value`'s annotations onto the rendered text placed at `offset`
///
/// Annotations are clipped to the part of the value that survived precision
/// truncation; ones left empty are dropped. With `upper` the offsets are
/// remapped onto the upper-cased text, whose byte length may differ.
fn carry_annotations(
    out: &mut AnnotatedTextBuilder,
    value: &AnnotatedText,
    rendered: &Rendered,
    offset: usize,
    upper: bool,
) -> Result<(), FormatError> {
    let visible = &rendered.text[rendered.value.clone()];
    let remap = |index: usize| {
        if upper {
            upper_case_offset(value.as_str(), index)
        } else {
            index
        }
    };

    for annotation in value.annotations() {
        let start = floor_char_boundary(visible, remap(annotation.range.start));
        let end = floor_char_boundary(visible, remap(annotation.range.end));
        if start >= end {
            continue;
        }
        let base = offset + rendered.value.start;
        out.annotate(
            base + start..base + end,
            annotation.attribute.clone(),
            annotation.boundary,
        )?;
    }
    Ok(())
}

/// Byte offset in `text.to_uppercase()` of the char at `index` in `text`
fn upper_case_offset(text: &str, index: usize) -> usize {
    text[..floor_char_boundary(text, index)]
        .chars()
        .flat_map(char::to_uppercase)
        .map(char::len_utf8)
        .sum()
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
