//! Turns raw source text into the plain text laid out in the document.
//!
//! The text is normalized the way the tokenizer expects its input, marked up
//! by the tokenizer, stripped of that markup again and finally has every run
//! of consecutive newlines collapsed into one.

use std::borrow::Cow;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::highlight::LanguageCatalog;

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static RE_NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Options controlling [`clean`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanOptions {
    /// Run the tokenizer markup round trip.
    pub highlight: bool,
    /// Tab stop width; `0` leaves tabs untouched.
    pub tab_width: usize,
    /// Print `<`, `>` and `&` literally instead of as `&lt;`, `&gt;` and `&amp;`.
    pub decode_entities: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            tab_width: crate::config::DEFAULT_TAB_WIDTH,
            decode_entities: false,
        }
    }
}

/// Result of [`clean`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    /// Name of the tokenizer that was actually used.
    pub language: String,
}

/// Produces the cleaned text for `raw` using the tokenizer named by `language`.
///
/// Unknown languages fall back to plain text without an error.
pub fn clean(
    raw: &str,
    language: &str,
    catalog: &LanguageCatalog,
    options: CleanOptions,
) -> Result<Cleaned> {
    let syntax = catalog.resolve(language);
    let normalized = normalize_source(raw);

    let plain = if options.highlight {
        let marked = catalog.mark_up(&normalized, syntax)?;
        debug!(
            "tokenized {} bytes as {} into {} bytes of markup",
            normalized.len(),
            syntax.name,
            marked.len()
        );
        let source = html_escape::decode_html_entities(&strip_markup(&marked)).into_owned();
        escape_delimiters(source, options.decode_entities)
    } else {
        escape_delimiters(normalized, options.decode_entities)
    };

    let mut text = collapse_newlines(&plain).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }

    Ok(Cleaned {
        text: expand_tabs(&text, options.tab_width).into_owned(),
        language: syntax.name.clone(),
    })
}

/// Normalizes line endings, strips leading and trailing newlines and ensures
/// the text ends with exactly one line terminator.
///
/// Empty input, or input made only of newlines, yields an empty string.
pub fn normalize_source(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = unified.trim_matches('\n');
    if trimmed.is_empty() {
        return String::new();
    }
    let mut text = String::with_capacity(trimmed.len() + 1);
    text.push_str(trimmed);
    text.push('\n');
    text
}

/// Removes every `<...>` tag, leaving the tokenizer's entities in place.
pub fn strip_markup(marked: &str) -> String {
    RE_TAG.replace_all(marked, "").into_owned()
}

/// Escapes `&`, `<` and `>` unless `decode` asks for the literal source text.
///
/// Cleaned text never contains the tag delimiters `<` and `>` by default.
fn escape_delimiters(source: String, decode: bool) -> String {
    if decode {
        source
    } else {
        html_escape::encode_text(&source).into_owned()
    }
}

/// Replaces every run of two or more newlines with a single newline.
pub fn collapse_newlines(text: &str) -> Cow<'_, str> {
    RE_NEWLINE_RUN.replace_all(text, "\n")
}

/// Expands tab characters to the next multiple of `width` columns.
pub fn expand_tabs(text: &str, width: usize) -> Cow<'_, str> {
    if width == 0 || !text.contains('\t') {
        return Cow::Borrowed(text);
    }

    let mut expanded = String::with_capacity(text.len() + text.len() / 4);
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = width - column % width;
                expanded.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' => {
                expanded.push(ch);
                column = 0;
            }
            _ => {
                expanded.push(ch);
                column += 1;
            }
        }
    }
    Cow::Owned(expanded)
}
