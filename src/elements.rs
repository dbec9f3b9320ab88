//! `genpdf` elements used by the listing document.
//!
//! [`FixedLine`] prints one line of text in a row of fixed height and is used
//! for the page header and footer. [`Listing`] is the document body: it
//! measures the first page it is given, paginates the text with
//! [`crate::layout::paginate`] and prints one laid out page per document page.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Size};

use crate::fonts;
use crate::layout::{self, Page, PageMetrics};

/// Slack absorbing floating point noise when fitting rows and columns.
const FIT_EPSILON: f64 = 1e-6;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// A single line of text occupying a row of fixed height.
pub struct FixedLine {
    text: String,
    style: Style,
    alignment: Alignment,
    height: Mm,
}

impl FixedLine {
    /// Creates a left aligned line.
    pub fn new(text: impl Into<String>, style: Style, height: Mm) -> Self {
        Self {
            text: text.into(),
            style,
            alignment: Alignment::Left,
            height,
        }
    }

    /// Sets the alignment and returns the updated element.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Element for FixedLine {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let style = style.and(self.style);
        let available_width = area.size().width;
        let text = fit_to_width(&self.text, available_width, |text| {
            StyledString::new(text.to_owned(), style).width(&context.font_cache)
        });
        let string = StyledString::new(text.into_owned(), style);
        let width = string.width(&context.font_cache);
        let slack = (available_width - width).max(Mm::default());
        let x_offset = match self.alignment {
            Alignment::Left => Mm::default(),
            Alignment::Center => slack / 2.0,
            Alignment::Right => slack,
        };

        if let Some(mut section) =
            area.text_section(&context.font_cache, Position::new(x_offset, 0), style)
        {
            section.print_str(&string.s, style)?;
        } else {
            result.has_more = true;
            return Ok(result);
        }

        result.size = Size::new(width, self.height);
        area.add_offset(Position::new(0, self.height));
        Ok(result)
    }
}

/// Cuts characters off the end of `text` until `width_of` fits it into `available`.
fn fit_to_width(text: &str, available: Mm, width_of: impl Fn(&str) -> Mm) -> Cow<'_, str> {
    if width_of(text) <= available {
        return Cow::Borrowed(text);
    }
    let mut end = 0;
    for (index, _) in text.char_indices().rev() {
        if width_of(&text[..index]) <= available {
            end = index;
            break;
        }
    }
    Cow::Owned(text[..end].to_owned())
}

/// Layout recorded by a [`Listing`] once it has measured its first page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingLayout {
    pub metrics: PageMetrics,
    pub pages: Vec<Page>,
}

/// Shared handle through which the layout of a rendered [`Listing`] can be read.
pub type LayoutSlot = Rc<RefCell<Option<ListingLayout>>>;

/// Monospace body text split over as many pages as it needs.
pub struct Listing {
    text: String,
    style: Style,
    row_height: Mm,
    builtin_fonts: bool,
    pending: Option<VecDeque<Page>>,
    layout_slot: LayoutSlot,
}

impl Listing {
    /// Creates a listing printing `text` with `style` on rows of `row_height`.
    pub fn new(text: impl Into<String>, style: Style, row_height: Mm) -> Self {
        Self {
            text: text.into(),
            style,
            row_height,
            builtin_fonts: false,
            pending: None,
            layout_slot: LayoutSlot::default(),
        }
    }

    /// Restricts printed characters to what the builtin PDF fonts can encode.
    pub fn with_builtin_fonts(mut self, builtin: bool) -> Self {
        self.builtin_fonts = builtin;
        self
    }

    /// Returns a handle that holds the layout after the first render call.
    pub fn layout_slot(&self) -> LayoutSlot {
        Rc::clone(&self.layout_slot)
    }

    fn measure(&self, context: &genpdf::Context, size: Size, style: Style) -> PageMetrics {
        let advance = StyledString::new("M".to_owned(), style).width(&context.font_cache);
        let columns = fit(size.width, advance);
        let rows = fit(size.height, self.row_height);
        PageMetrics::new(columns, rows)
    }
}

fn fit(available: Mm, unit: Mm) -> usize {
    let unit = mm_to_f64(unit);
    if unit <= 0.0 {
        return 0;
    }
    (mm_to_f64(available) / unit + FIT_EPSILON).floor().max(0.0) as usize
}

impl Element for Listing {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);

        if self.pending.is_none() {
            let metrics = self.measure(context, area.size(), style);
            if metrics.columns == 0 || metrics.rows == 0 {
                return Err(Error::new(
                    format!(
                        "Body area fits {} columns and {} rows; enlarge the paper or shrink the margins",
                        metrics.columns, metrics.rows
                    ),
                    ErrorKind::PageSizeExceeded,
                ));
            }
            let pages = layout::paginate(&self.text, metrics);
            *self.layout_slot.borrow_mut() = Some(ListingLayout {
                metrics,
                pages: pages.clone(),
            });
            self.pending = Some(pages.into());
        }

        let mut result = RenderResult::default();
        let Some(page) = self.pending.as_mut().and_then(VecDeque::pop_front) else {
            return Ok(result);
        };

        let mut widest = Mm::default();
        for line in &page.lines {
            let text = fonts::printable_line(&line.text, self.builtin_fonts);
            if !text.is_empty() {
                let string = StyledString::new(text.into_owned(), style);
                widest = widest.max(string.width(&context.font_cache));
                let Some(mut section) =
                    area.text_section(&context.font_cache, Position::new(0, 0), style)
                else {
                    return Err(Error::new(
                        format!("Line {} does not fit on page {}", line.text, page.number),
                        ErrorKind::PageSizeExceeded,
                    ));
                };
                section.print_str(&string.s, style)?;
            }
            area.add_offset(Position::new(0, self.row_height));
        }

        let rows = page.lines.len() as f64;
        result.size = Size::new(widest, mm_from_f64(mm_to_f64(self.row_height) * rows));
        result.has_more = self
            .pending
            .as_ref()
            .map_or(false, |pending| !pending.is_empty());
        Ok(result)
    }
}
