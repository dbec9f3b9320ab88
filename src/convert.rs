//! Top-level conversion: load, clean, lay out and write.

use std::error::Error as _;
use std::path::PathBuf;

use log::info;

use crate::clean::{self, CleanOptions};
use crate::config::ConversionConfig;
use crate::error::{ConvertError, Result};
use crate::highlight::LanguageCatalog;
use crate::loader;
use crate::writer;

/// Outcome of a successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Name of the tokenizer that processed the text.
    pub language: String,
    pub lines: usize,
    pub pages: usize,
    pub bytes: usize,
}

/// Converts `config.input` into a PDF at `config.output`.
///
/// The input is read completely before the output is touched, so a missing
/// input never creates an output file.
pub fn convert(config: &ConversionConfig) -> Result<ConversionReport> {
    let catalog = LanguageCatalog::new();
    convert_with_catalog(config, &catalog)
}

/// Like [`convert`], reusing an already loaded tokenizer catalog.
pub fn convert_with_catalog(
    config: &ConversionConfig,
    catalog: &LanguageCatalog,
) -> Result<ConversionReport> {
    let raw = loader::load_source(config.input())?;

    let cleaned = clean::clean(
        &raw,
        &config.language,
        catalog,
        CleanOptions {
            highlight: config.highlight,
            tab_width: config.tab_width,
            decode_entities: config.decode_entities,
        },
    )?;

    let rendered = writer::write_document(&cleaned.text, config, config.output())?;

    let report = ConversionReport {
        input: config.input.clone(),
        output: config.output.clone(),
        language: cleaned.language,
        lines: rendered.line_count(),
        pages: rendered.page_count(),
        bytes: rendered.bytes.len(),
    };
    info!(
        "converted {} ({}) into {} pages at {}",
        report.input.display(),
        report.language,
        report.pages,
        report.output.display()
    );
    Ok(report)
}

/// Runs [`convert`] and prints the outcome instead of returning it.
///
/// Prints a confirmation naming both paths on success, or the error with its
/// causes on failure. Returns whether the conversion succeeded.
pub fn convert_and_report(config: &ConversionConfig) -> bool {
    match convert(config) {
        Ok(report) => {
            println!(
                "Successfully converted {} to {}",
                report.input.display(),
                report.output.display()
            );
            true
        }
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            false
        }
    }
}

/// Formats an error and its chain of causes for display.
pub fn failure_message(err: &ConvertError) -> String {
    let mut message = format!("Error ({}): {}", err.kind(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io;

    #[test]
    fn missing_input_reports_not_found_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("out.pdf");
        let config = ConversionConfig::new(dir.path().join("missing.dsl"), &output);

        let err = convert(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!output.exists());
        assert!(!convert_and_report(&config));
    }

    #[test]
    fn failure_message_lists_causes() {
        let err = ConvertError::Write {
            path: PathBuf::from("/readonly/out.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let message = failure_message(&err);
        assert!(message.starts_with("Error (I/O error): failed to write /readonly/out.pdf"));
        assert!(message.ends_with("caused by: permission denied"));
    }
}
