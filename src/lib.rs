//! Converts plain-text and DSL source files into paginated PDF listings.
//!
//! The pipeline reads the input ([`loader`]), runs it through a tokenizer and
//! strips the resulting markup ([`highlight`], [`clean`]), lays the text out on
//! fixed-size pages ([`layout`]) and writes the PDF ([`writer`]). [`convert`]
//! chains the stages.

pub mod builder;
pub mod clean;
pub mod config;
pub mod convert;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod highlight;
pub mod layout;
pub mod loader;
pub mod writer;

pub use config::{ConversionConfig, PageSetup, PaperFormat};
pub use convert::{convert, convert_and_report, convert_with_catalog, ConversionReport};
pub use error::{ConvertError, ErrorKind};
pub use highlight::LanguageCatalog;
