//! Conversion settings.
//!
//! [`ConversionConfig`] gathers every knob of a conversion run in one value that
//! is passed explicitly into [`crate::convert`]. The defaults reproduce the
//! classic listing layout: A4 paper, 10mm margins, a bold 12pt title, 10pt
//! monospace body text on 5mm rows and an italic 8pt page number.

use std::path::{Path, PathBuf};

/// Default input file read when no path is given.
pub const DEFAULT_INPUT: &str = "input.dsl";

/// Default output file written when no path is given.
pub const DEFAULT_OUTPUT: &str = "output.pdf";

/// Language used when none is requested or the requested one is unknown.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Title printed at the top of every page.
pub const DEFAULT_TITLE: &str = "DSL File Content";

/// Tab stops used when expanding tab characters.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Supported paper formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaperFormat {
    /// ISO A4, 210mm x 297mm.
    #[default]
    A4,
    /// US Letter, 8.5in x 11in.
    Letter,
    /// US Legal, 8.5in x 14in.
    Legal,
}

impl PaperFormat {
    pub(crate) fn to_genpdf(self) -> genpdf::PaperSize {
        match self {
            Self::A4 => genpdf::PaperSize::A4,
            Self::Letter => genpdf::PaperSize::Letter,
            Self::Legal => genpdf::PaperSize::Legal,
        }
    }
}

/// Page geometry and typography of the produced document.
///
/// All lengths are in millimetres and all font sizes in points.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSetup {
    pub paper: PaperFormat,
    pub margin_mm: f64,
    pub header_font_size: u8,
    pub header_height_mm: f64,
    pub body_font_size: u8,
    pub line_height_mm: f64,
    pub footer_font_size: u8,
    pub footer_height_mm: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper: PaperFormat::A4,
            margin_mm: 10.0,
            header_font_size: 12,
            header_height_mm: 10.0,
            body_font_size: 10,
            line_height_mm: 5.0,
            footer_font_size: 8,
            footer_height_mm: 15.0,
        }
    }
}

/// Complete description of a single conversion run.
#[derive(Clone, Debug)]
pub struct ConversionConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Name, alias or file extension of the tokenizer to run.
    pub language: String,
    pub title: String,
    pub page: PageSetup,
    /// Directory searched first for the font files.
    pub fonts_dir: Option<PathBuf>,
    /// Reference the PDF builtin Courier/Helvetica fonts instead of embedding.
    pub builtin_fonts: bool,
    /// Tab stop width; `0` keeps tab characters as they are.
    pub tab_width: usize,
    /// Run the tokenizer markup round trip before cleaning.
    pub highlight: bool,
    /// Print `<`, `>` and `&` literally instead of as entities.
    pub decode_entities: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            language: DEFAULT_LANGUAGE.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            page: PageSetup::default(),
            fonts_dir: None,
            builtin_fonts: true,
            tab_width: DEFAULT_TAB_WIDTH,
            highlight: true,
            decode_entities: false,
        }
    }
}

impl ConversionConfig {
    /// Creates a configuration converting `input` into `output` with the defaults.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Sets the language identifier and returns the updated configuration.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the page title and returns the updated configuration.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the page setup and returns the updated configuration.
    pub fn with_page_setup(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Sets the paper format and returns the updated configuration.
    pub fn with_paper(mut self, paper: PaperFormat) -> Self {
        self.page.paper = paper;
        self
    }

    /// Sets the font directory searched first and returns the updated configuration.
    pub fn with_fonts_dir(mut self, dir: impl Into<Option<PathBuf>>) -> Self {
        self.fonts_dir = dir.into();
        self
    }

    /// Selects builtin (`true`) or embedded (`false`) fonts.
    pub fn with_builtin_fonts(mut self, builtin: bool) -> Self {
        self.builtin_fonts = builtin;
        self
    }

    /// Sets the tab stop width and returns the updated configuration.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Enables or disables the tokenizer markup round trip.
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Prints source `<`, `>` and `&` literally when `decode` is set.
    pub fn with_decode_entities(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}
