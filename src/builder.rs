//! Document construction for the listing PDF.

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{Font, FontFamily};
use genpdf::style;
use genpdf::{self, Element, Margins, Mm, PageDecorator, Position, Size};

use crate::fonts::ListingFonts;

/// What header and footer callbacks know about the page being decorated.
#[derive(Clone, Copy, Debug)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,
    /// Sans-serif family registered for the page chrome.
    pub chrome: FontFamily<Font>,
}

type BandFactory = dyn Fn(&PageInfo) -> Box<dyn Element>;

/// A band of fixed height at the top or bottom of every page.
pub struct BandSpec {
    height: Mm,
    factory: Box<BandFactory>,
}

impl BandSpec {
    /// Creates a band rendered by `factory` within `height`.
    pub fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(&PageInfo) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

/// Builder for `genpdf::Document` instances carrying a header and a footer band.
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    title: Option<String>,
    header: Option<BandSpec>,
    footer: Option<BandSpec>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Configures the header band rendered at the top of every page.
    pub fn with_header(mut self, header: BandSpec) -> Self {
        self.header = Some(header);
        self
    }

    /// Configures the footer band rendered at the bottom of every page.
    pub fn with_footer(mut self, footer: BandSpec) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Builds the document with the body family as its default font.
    pub fn build(self, fonts: ListingFonts) -> genpdf::Document {
        let mut document = genpdf::Document::new(fonts.body);
        let chrome = document.add_font_family(fonts.chrome);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        let decorator = BandDecorator::new(chrome, self.margins, self.header, self.footer);
        document.set_page_decorator(decorator);
        document
    }
}

struct BandDecorator {
    page: usize,
    chrome: FontFamily<Font>,
    margins: Option<Margins>,
    header: Option<BandSpec>,
    footer: Option<BandSpec>,
}

impl BandDecorator {
    fn new(
        chrome: FontFamily<Font>,
        margins: Option<Margins>,
        header: Option<BandSpec>,
        footer: Option<BandSpec>,
    ) -> Self {
        Self {
            page: 0,
            chrome,
            margins,
            header,
            footer,
        }
    }
}

impl PageDecorator for BandDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        let info = PageInfo {
            number: self.page,
            chrome: self.chrome,
        };

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        if let Some(header) = &self.header {
            if header.height > area.size().height {
                return Err(Error::new(
                    "Header height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }
            let mut element = (header.factory)(&info);
            let result = element.render(context, area.clone(), style)?;
            if result.has_more {
                return Err(Error::new(
                    "Header element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }
            area.add_offset(Position::new(0, header.height));
        }

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            if footer.height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.height));
            let mut element = (footer.factory)(&info);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - footer.height);
        }

        Ok(area)
    }
}
