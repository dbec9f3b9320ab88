use dsl2pdf::clean::{self, collapse_newlines, CleanOptions};
use dsl2pdf::layout::{paginate, reconstruct, PageMetrics};
use dsl2pdf::LanguageCatalog;
use once_cell::sync::Lazy;
use proptest::prelude::*;

static CATALOG: Lazy<LanguageCatalog> = Lazy::new(LanguageCatalog::new);

fn source_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 _=:;{}()\\[\\]\"',.]{0,12}",
            Just("<span class=\"x\">".to_owned()),
            Just("</span>".to_owned()),
            Just("&amp; &lt;".to_owned()),
            Just("\n".to_owned()),
            Just("\n\n\n".to_owned()),
            Just("\r\n".to_owned()),
            Just("\t".to_owned()),
            "[\u{e0}-\u{ff}\u{3b1}-\u{3c9}]{1,3}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn cleaned_text_has_no_newline_runs(raw in source_text()) {
        let cleaned = clean::clean(&raw, "text", &CATALOG, CleanOptions::default()).unwrap();
        prop_assert!(!cleaned.text.contains("\n\n"));
        prop_assert!(!cleaned.text.contains('\r'));
        prop_assert!(!cleaned.text.starts_with('\n'));
        prop_assert!(!cleaned.text.ends_with('\n'));
        prop_assert_eq!(collapse_newlines(&cleaned.text).into_owned(), cleaned.text.clone());
    }

    #[test]
    fn markup_round_trip_matches_direct_normalization(raw in source_text()) {
        let plain = CleanOptions { highlight: false, ..CleanOptions::default() };
        for language in ["text", "json", "rust"] {
            let marked = clean::clean(&raw, language, &CATALOG, CleanOptions::default()).unwrap();
            let direct = clean::clean(&raw, language, &CATALOG, plain).unwrap();
            prop_assert_eq!(&marked.text, &direct.text);
        }
    }

    #[test]
    fn unknown_language_behaves_like_text(raw in source_text(), suffix in "[a-z]{4,8}") {
        let unknown = format!("zz-{suffix}");
        let a = clean::clean(&raw, &unknown, &CATALOG, CleanOptions::default()).unwrap();
        let b = clean::clean(&raw, "text", &CATALOG, CleanOptions::default()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn pagination_round_trips(
        raw in source_text(),
        columns in 1usize..30,
        rows in 1usize..12,
    ) {
        let cleaned = clean::clean(&raw, "text", &CATALOG, CleanOptions::default()).unwrap();
        let pages = paginate(&cleaned.text, PageMetrics::new(columns, rows));
        prop_assert!(!pages.is_empty());
        for (index, page) in pages.iter().enumerate() {
            prop_assert_eq!(page.number, index + 1);
            prop_assert!(page.lines.len() <= rows);
            prop_assert!(page.lines.iter().all(|l| l.text.chars().count() <= columns));
        }
        prop_assert_eq!(reconstruct(&pages), cleaned.text);
    }
}

proptest! {
    #[test]
    fn no_angle_brackets_without_source_brackets(raw in "[a-z {}\\[\\]\":,0-9\n\t]{0,200}") {
        for language in ["text", "json", "python"] {
            let cleaned = clean::clean(&raw, language, &CATALOG, CleanOptions::default()).unwrap();
            prop_assert!(!cleaned.text.contains('<'));
            prop_assert!(!cleaned.text.contains('>'));
            prop_assert!(!cleaned.text.contains('&'));
        }
    }

    #[test]
    fn source_delimiters_never_reach_the_page(raw in "[a-z <>&/=\"\n]{0,200}") {
        for language in ["text", "html", "rust"] {
            let cleaned = clean::clean(&raw, language, &CATALOG, CleanOptions::default()).unwrap();
            prop_assert!(!cleaned.text.contains('<'));
            prop_assert!(!cleaned.text.contains('>'));
        }
    }

    #[test]
    fn decoded_entities_match_the_normalized_source(raw in "[a-z <>&;\"'\n]{0,200}") {
        let options = CleanOptions { decode_entities: true, tab_width: 0, ..CleanOptions::default() };
        for language in ["text", "html"] {
            let cleaned = clean::clean(&raw, language, &CATALOG, options).unwrap();
            let expected = collapse_newlines(raw.trim_matches('\n')).into_owned();
            prop_assert_eq!(&cleaned.text, &expected);
        }
    }
}
