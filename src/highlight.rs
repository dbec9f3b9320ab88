//! Tokenizer catalog and markup generation.
//!
//! The catalog wraps the syntax definitions bundled with [`syntect`]. Running a
//! syntax over a text produces classed HTML: every token is wrapped in a
//! `<span class="...">` tag naming its lexical scope and the characters `<`,
//! `>`, `&` and `"` are entity-escaped. [`crate::clean`] strips that markup
//! again, so only the whitespace normalization survives into the document.

use log::debug;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{ConvertError, Result};

/// Identifiers that name the plain-text tokenizer in addition to its own name.
const PLAIN_TEXT_ALIASES: &[&str] = &["text", "plain", "plaintext", "txt", "none"];

/// Common short names that are neither a syntax name nor one of its extensions.
const ALIASES: &[(&str, &str)] = &[
    ("bash", "Bourne Again Shell (bash)"),
    ("shell", "Bourne Again Shell (bash)"),
    ("javascript", "JavaScript"),
    ("golang", "Go"),
    ("c++", "C++"),
    ("csharp", "C#"),
    ("yml", "YAML"),
];

/// A language known to the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageInfo {
    pub name: String,
    pub extensions: Vec<String>,
}

/// The set of tokenizers available for conversion.
pub struct LanguageCatalog {
    syntaxes: SyntaxSet,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageCatalog {
    /// Loads the syntax definitions bundled with `syntect`.
    pub fn new() -> Self {
        Self::from_syntax_set(SyntaxSet::load_defaults_newlines())
    }

    /// Wraps an existing syntax set. The set must be built for newline-terminated lines.
    pub fn from_syntax_set(syntaxes: SyntaxSet) -> Self {
        Self { syntaxes }
    }

    /// The generic tokenizer that treats its input as opaque text.
    pub fn plain_text(&self) -> &SyntaxReference {
        self.syntaxes.find_syntax_plain_text()
    }

    /// Looks up a tokenizer by name, alias or file extension.
    ///
    /// Names match case-insensitively. Returns `None` for unknown or blank
    /// identifiers; callers decide on the fallback.
    pub fn lookup(&self, identifier: &str) -> Option<&SyntaxReference> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }

        if PLAIN_TEXT_ALIASES
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(identifier))
        {
            return Some(self.plain_text());
        }

        let by_name = self
            .syntaxes
            .syntaxes()
            .iter()
            .find(|syntax| syntax.name.eq_ignore_ascii_case(identifier));
        if by_name.is_some() {
            return by_name;
        }

        if let Some((_, name)) = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(identifier))
        {
            if let Some(syntax) = self.syntaxes.find_syntax_by_name(name) {
                return Some(syntax);
            }
        }

        let extension = identifier.trim_start_matches('.');
        self.syntaxes
            .find_syntax_by_extension(extension)
            .or_else(|| {
                self.syntaxes
                    .find_syntax_by_extension(&extension.to_ascii_lowercase())
            })
    }

    /// Looks up `identifier`, falling back to the plain-text tokenizer.
    pub fn resolve(&self, identifier: &str) -> &SyntaxReference {
        match self.lookup(identifier) {
            Some(syntax) => syntax,
            None => {
                debug!("unknown language '{identifier}', using plain text");
                self.plain_text()
            }
        }
    }

    /// Lists the visible languages, sorted by name.
    pub fn languages(&self) -> Vec<LanguageInfo> {
        let mut languages: Vec<LanguageInfo> = self
            .syntaxes
            .syntaxes()
            .iter()
            .filter(|syntax| !syntax.hidden)
            .map(|syntax| LanguageInfo {
                name: syntax.name.clone(),
                extensions: syntax.file_extensions.clone(),
            })
            .collect();
        languages.sort_by_key(|info| info.name.to_lowercase());
        languages
    }

    /// Runs `syntax` over `text` and returns the classed HTML markup.
    pub fn mark_up(&self, text: &str, syntax: &SyntaxReference) -> Result<String> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(text) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| ConvertError::processing("tokenizer", err))?;
        }
        Ok(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_aliases_and_extensions() {
        let catalog = LanguageCatalog::new();
        assert_eq!(catalog.lookup("JSON").map(|s| s.name.as_str()), Some("JSON"));
        assert_eq!(
            catalog.lookup("python").map(|s| s.name.as_str()),
            Some("Python")
        );
        assert_eq!(catalog.lookup("py").map(|s| s.name.as_str()), Some("Python"));
        assert_eq!(catalog.lookup(".rs").map(|s| s.name.as_str()), Some("Rust"));
        assert_eq!(
            catalog.lookup("text").map(|s| s.name.as_str()),
            Some(catalog.plain_text().name.as_str())
        );
    }

    #[test]
    fn unknown_identifier_has_no_match() {
        let catalog = LanguageCatalog::new();
        assert!(catalog.lookup("no-such-language").is_none());
        assert!(catalog.lookup("   ").is_none());
        assert_eq!(
            catalog.resolve("no-such-language").name,
            catalog.plain_text().name
        );
    }

    #[test]
    fn markup_wraps_tokens_and_escapes_text() {
        let catalog = LanguageCatalog::new();
        let syntax = catalog.resolve("json");
        let marked = catalog
            .mark_up("{\"a\": \"<b>\"}\n", syntax)
            .expect("markup succeeds");
        assert!(marked.contains("<span class=\""));
        assert!(marked.contains("&lt;b&gt;"));
    }

    #[test]
    fn languages_are_sorted_and_visible() {
        let catalog = LanguageCatalog::new();
        let languages = catalog.languages();
        assert!(languages.iter().any(|info| info.name == "Rust"));
        let names: Vec<String> = languages.iter().map(|l| l.name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
