//! Pagination of cleaned text into fixed-size pages.
//!
//! Layout is purely character based: the body uses a monospace font, so a
//! page is described by the number of columns that fit on a line and the
//! number of rows that fit on the page. Lines longer than the page is wide are
//! hard-wrapped; nothing is dropped and the order is preserved, which
//! [`reconstruct`] makes checkable.

/// Capacity of the body area of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMetrics {
    /// Characters per line.
    pub columns: usize,
    /// Lines per page.
    pub rows: usize,
}

impl PageMetrics {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }
}

/// One printed row of body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// The line continues the previous row of the same source line.
    pub continuation: bool,
}

/// A laid out page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number shown in the footer.
    pub number: usize,
    pub lines: Vec<Line>,
}

/// Wraps `text` at `metrics.columns` and distributes the rows over pages.
///
/// Always returns at least one page. Metrics with zero columns or rows are
/// treated as one.
pub fn paginate(text: &str, metrics: PageMetrics) -> Vec<Page> {
    let columns = metrics.columns.max(1);
    let rows = metrics.rows.max(1);

    let mut lines = Vec::new();
    if !text.is_empty() {
        for source_line in text.split('\n') {
            wrap_line(source_line, columns, &mut lines);
        }
    }

    if lines.is_empty() {
        return vec![Page {
            number: 1,
            lines: Vec::new(),
        }];
    }

    let mut pages = Vec::with_capacity(lines.len() / rows + 1);
    let mut remaining = lines.into_iter().peekable();
    while remaining.peek().is_some() {
        pages.push(Page {
            number: pages.len() + 1,
            lines: remaining.by_ref().take(rows).collect(),
        });
    }
    pages
}

fn wrap_line(source_line: &str, columns: usize, lines: &mut Vec<Line>) {
    let mut chars = source_line.chars().peekable();
    let mut continuation = false;
    loop {
        let segment: String = chars.by_ref().take(columns).collect();
        lines.push(Line {
            text: segment,
            continuation,
        });
        if chars.peek().is_none() {
            break;
        }
        continuation = true;
    }
}

/// Joins the page bodies back into the text they were laid out from.
pub fn reconstruct(pages: &[Page]) -> String {
    let mut text = String::new();
    let mut first = true;
    for line in pages.iter().flat_map(|page| page.lines.iter()) {
        if !first && !line.continuation {
            text.push('\n');
        }
        text.push_str(&line.text);
        first = false;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(page: &Page) -> Vec<&str> {
        page.lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn short_text_fits_on_one_page() {
        let pages = paginate("hello\nworld", PageMetrics::new(80, 50));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(texts(&pages[0]), ["hello", "world"]);
    }

    #[test]
    fn empty_text_yields_one_empty_page() {
        let pages = paginate("", PageMetrics::new(80, 50));
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
        assert_eq!(reconstruct(&pages), "");
    }

    #[test]
    fn long_lines_wrap_without_losing_characters() {
        let pages = paginate("abcdefghij\nxy", PageMetrics::new(4, 10));
        assert_eq!(texts(&pages[0]), ["abcd", "efgh", "ij", "xy"]);
        let flags: Vec<bool> = pages[0].lines.iter().map(|l| l.continuation).collect();
        assert_eq!(flags, [false, true, true, false]);
        assert_eq!(reconstruct(&pages), "abcdefghij\nxy");
    }

    #[test]
    fn wrapping_counts_characters_not_bytes() {
        let pages = paginate("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}", PageMetrics::new(2, 10));
        assert_eq!(
            texts(&pages[0]),
            ["\u{e9}\u{e9}", "\u{e9}\u{e9}", "\u{e9}"]
        );
    }

    #[test]
    fn page_numbers_increase_by_one() {
        let text = (1..=23).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let pages = paginate(&text, PageMetrics::new(10, 5));
        assert_eq!(pages.len(), 5);
        for (index, page) in pages.iter().enumerate() {
            assert_eq!(page.number, index + 1);
        }
        assert_eq!(texts(&pages[4]), ["21", "22", "23"]);
        assert_eq!(reconstruct(&pages), text);
    }

    #[test]
    fn exact_page_capacity_does_not_add_a_blank_page() {
        let pages = paginate("a\nb\nc\nd", PageMetrics::new(10, 2));
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn blank_lines_and_whitespace_are_preserved() {
        let text = "  indented\n\n   \ntrailing  ";
        let pages = paginate(text, PageMetrics::new(5, 3));
        assert_eq!(reconstruct(&pages), text);
    }

    #[test]
    fn zero_metrics_are_clamped() {
        let pages = paginate("ab", PageMetrics::new(0, 0));
        assert_eq!(pages.len(), 2);
        assert_eq!(reconstruct(&pages), "ab");
    }
}
