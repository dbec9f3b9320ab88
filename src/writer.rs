//! Lays out cleaned text as a paginated PDF and writes it to disk.

use std::fs;
use std::path::Path;

use genpdf::style::Style;
use genpdf::{Alignment, Margins};
use log::{debug, warn};

use crate::builder::{BandSpec, DocumentBuilder};
use crate::config::{ConversionConfig, PageSetup};
use crate::elements::{mm_from_f64, FixedLine, Listing, ListingLayout};
use crate::error::{ConvertError, Result};
use crate::fonts;
use crate::layout::{Page, PageMetrics};

/// A rendered document together with the layout it was printed from.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub metrics: PageMetrics,
    pub pages: Vec<Page>,
}

impl RenderedPdf {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|page| page.lines.len()).sum()
    }
}

/// Renders `text` into PDF bytes without touching the output path.
pub fn render_document(text: &str, config: &ConversionConfig) -> Result<RenderedPdf> {
    let listing_fonts = fonts::load_listing_fonts(config.fonts_dir.as_deref(), config.builtin_fonts)?;
    let page = &config.page;

    if config.builtin_fonts {
        let replaced = text
            .chars()
            .chain(config.title.chars())
            .filter(|ch| !ch.is_control() && !fonts::is_windows_1252(*ch))
            .count();
        if replaced > 0 {
            warn!(
                "{replaced} characters cannot be printed with the builtin fonts and are shown as '?'; \
                 embed the fonts to keep them"
            );
        }
    }

    let mut document = DocumentBuilder::new()
        .with_paper_size(page.paper.to_genpdf())
        .with_margins(Margins::all(mm_from_f64(page.margin_mm)))
        .with_title(config.title.clone())
        .with_header(header_band(&config.title, page, config.builtin_fonts))
        .with_footer(footer_band(page))
        .build(listing_fonts);

    let listing = Listing::new(
        text,
        Style::new().with_font_size(page.body_font_size),
        mm_from_f64(page.line_height_mm),
    )
    .with_builtin_fonts(config.builtin_fonts);
    let layout_slot = listing.layout_slot();
    document.push(listing);

    let mut bytes = Vec::new();
    document
        .render(&mut bytes)
        .map_err(|err| ConvertError::processing("PDF rendering", err))?;

    let layout = layout_slot.borrow_mut().take();
    let ListingLayout { metrics, pages } = layout
        .ok_or_else(|| ConvertError::processing("PDF rendering", "the body was never laid out"))?;
    debug!(
        "rendered {} pages of {}x{} characters into {} bytes",
        pages.len(),
        metrics.columns,
        metrics.rows,
        bytes.len()
    );

    Ok(RenderedPdf {
        bytes,
        metrics,
        pages,
    })
}

/// Renders `text` and writes the document to `path`, replacing any existing file.
pub fn write_document(text: &str, config: &ConversionConfig, path: &Path) -> Result<RenderedPdf> {
    let rendered = render_document(text, config)?;
    fs::write(path, &rendered.bytes).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {} bytes to {}", rendered.bytes.len(), path.display());
    Ok(rendered)
}

fn header_band(title: &str, page: &PageSetup, builtin: bool) -> BandSpec {
    let title = fonts::printable_line(title, builtin).into_owned();
    let size = page.header_font_size;
    let height = mm_from_f64(page.header_height_mm);
    BandSpec::new(height, move |info| {
        let mut style = Style::new()
            .with_font_family(info.chrome)
            .with_font_size(size);
        style.set_bold();
        FixedLine::new(title.clone(), style, height).with_alignment(Alignment::Center)
    })
}

fn footer_band(page: &PageSetup) -> BandSpec {
    let size = page.footer_font_size;
    let band = mm_from_f64(page.footer_height_mm);
    // the caption sits in the upper part of the band, leaving the rest as bottom padding
    let row = mm_from_f64(page.footer_height_mm * 2.0 / 3.0);
    BandSpec::new(band, move |info| {
        let mut style = Style::new()
            .with_font_family(info.chrome)
            .with_font_size(size);
        style.set_italic();
        FixedLine::new(format!("Page {}", info.number), style, row)
            .with_alignment(Alignment::Center)
    })
}
