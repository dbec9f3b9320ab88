//! Font discovery for the listing document.
//!
//! The body is set in Liberation Mono and the header and footer in Liberation
//! Sans, with DejaVu Sans Mono and DejaVu Sans as fallbacks. `genpdf` needs the
//! TrueType files for glyph metrics even when the PDF only references the
//! builtin Courier and Helvetica fonts, so both families have to be found on disk.

use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use genpdf::fonts::{Builtin, FontData, FontFamily};
use printpdf::BuiltinFont;
use log::{debug, warn};

use crate::error::{ConvertError, Result};

/// Environment variable naming an additional font directory.
pub const FONTS_DIR_ENV: &str = "DSL2PDF_FONTS_DIR";

/// File names of the four styles of one font family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilyFiles {
    pub name: &'static str,
    pub regular: &'static str,
    pub bold: &'static str,
    pub italic: &'static str,
    pub bold_italic: &'static str,
}

impl FamilyFiles {
    fn paths(&self, directory: &Path) -> [PathBuf; 4] {
        [self.regular, self.bold, self.italic, self.bold_italic].map(|file| directory.join(file))
    }

    fn is_complete_in(&self, directory: &Path) -> bool {
        self.paths(directory).iter().all(|path| path.is_file())
    }
}

pub const LIBERATION_MONO: FamilyFiles = FamilyFiles {
    name: "LiberationMono",
    regular: "LiberationMono-Regular.ttf",
    bold: "LiberationMono-Bold.ttf",
    italic: "LiberationMono-Italic.ttf",
    bold_italic: "LiberationMono-BoldItalic.ttf",
};

pub const LIBERATION_SANS: FamilyFiles = FamilyFiles {
    name: "LiberationSans",
    regular: "LiberationSans-Regular.ttf",
    bold: "LiberationSans-Bold.ttf",
    italic: "LiberationSans-Italic.ttf",
    bold_italic: "LiberationSans-BoldItalic.ttf",
};

pub const DEJAVU_SANS_MONO: FamilyFiles = FamilyFiles {
    name: "DejaVuSansMono",
    regular: "DejaVuSansMono.ttf",
    bold: "DejaVuSansMono-Bold.ttf",
    italic: "DejaVuSansMono-Oblique.ttf",
    bold_italic: "DejaVuSansMono-BoldOblique.ttf",
};

pub const DEJAVU_SANS: FamilyFiles = FamilyFiles {
    name: "DejaVuSans",
    regular: "DejaVuSans.ttf",
    bold: "DejaVuSans-Bold.ttf",
    italic: "DejaVuSans-Oblique.ttf",
    bold_italic: "DejaVuSans-BoldOblique.ttf",
};

/// Monospace families for the body text, in order of preference.
pub const BODY_FAMILIES: &[FamilyFiles] = &[LIBERATION_MONO, DEJAVU_SANS_MONO];

/// Sans-serif families for the header and footer, in order of preference.
pub const CHROME_FAMILIES: &[FamilyFiles] = &[LIBERATION_SANS, DEJAVU_SANS];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/liberation-mono",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
];

/// Characters outside ASCII and Latin-1 that Windows-1252 can still encode.
const WINDOWS_1252_EXTRAS: &[char] = &[
    '\u{20ac}', '\u{201a}', '\u{0192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02c6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017d}', '\u{2018}',
    '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02dc}',
    '\u{2122}', '\u{0161}', '\u{203a}', '\u{0153}', '\u{017e}', '\u{0178}',
];

/// The two font families a listing needs.
pub struct ListingFonts {
    pub body: FontFamily<FontData>,
    pub chrome: FontFamily<FontData>,
}

fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(dir) = explicit {
        push(dir.to_path_buf());
    }

    if let Some(value) = env::var_os(FONTS_DIR_ENV) {
        if !value.is_empty() {
            push(PathBuf::from(value));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));

    for dir in SYSTEM_FONT_DIRECTORIES {
        push(PathBuf::from(dir));
    }

    candidates
}

/// Finds the first directory holding a complete family from `families`.
///
/// Directories are searched in candidate order and, within a directory, the
/// families in order of preference.
fn resolve_family(
    families: &'static [FamilyFiles],
    explicit: Option<&Path>,
) -> Result<(&'static FamilyFiles, PathBuf)> {
    let candidates = font_directory_candidates(explicit);
    for candidate in &candidates {
        if let Some(family) = families.iter().find(|family| family.is_complete_in(candidate)) {
            debug!("using {} fonts from {}", family.name, candidate.display());
            return Ok((family, candidate.clone()));
        }
    }

    let wanted = families
        .iter()
        .map(|family| family.name)
        .collect::<Vec<_>>()
        .join(" or ");
    let checked = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ConvertError::Fonts {
        message: format!(
            "no complete {wanted} family found; checked {checked}. \
             Install the Liberation or DejaVu fonts or set {FONTS_DIR_ENV}."
        ),
    })
}

fn load_font(directory: &Path, file: &str, builtin: Option<BuiltinFont>) -> Result<FontData> {
    let path = directory.join(file);
    FontData::load(&path, builtin).map_err(|err| ConvertError::Fonts {
        message: format!("failed to load {}: {}", path.display(), err),
    })
}

fn load_family(
    families: &'static [FamilyFiles],
    explicit: Option<&Path>,
    builtin: Option<Builtin>,
) -> Result<FontFamily<FontData>> {
    let (family, directory) = resolve_family(families, explicit)?;
    if let Some(preferred) = families.first().filter(|preferred| *preferred != family) {
        warn!(
            "{} fonts unavailable; falling back to '{}' from {}",
            preferred.name,
            family.name,
            directory.display()
        );
    }

    let styles = builtin.map(builtin_styles);
    Ok(FontFamily {
        regular: load_font(&directory, family.regular, styles.map(|s| s.regular))?,
        bold: load_font(&directory, family.bold, styles.map(|s| s.bold))?,
        italic: load_font(&directory, family.italic, styles.map(|s| s.italic))?,
        bold_italic: load_font(&directory, family.bold_italic, styles.map(|s| s.bold_italic))?,
    })
}

/// The builtin PDF font for each style of `builtin`, as `genpdf` maps them.
fn builtin_styles(builtin: Builtin) -> FontFamily<BuiltinFont> {
    match builtin {
        Builtin::Times => FontFamily {
            regular: BuiltinFont::TimesRoman,
            bold: BuiltinFont::TimesBold,
            italic: BuiltinFont::TimesItalic,
            bold_italic: BuiltinFont::TimesBoldItalic,
        },
        Builtin::Helvetica => FontFamily {
            regular: BuiltinFont::Helvetica,
            bold: BuiltinFont::HelveticaBold,
            italic: BuiltinFont::HelveticaOblique,
            bold_italic: BuiltinFont::HelveticaBoldOblique,
        },
        Builtin::Courier => FontFamily {
            regular: BuiltinFont::Courier,
            bold: BuiltinFont::CourierBold,
            italic: BuiltinFont::CourierOblique,
            bold_italic: BuiltinFont::CourierBoldOblique,
        },
    }
}

/// Loads the body and header/footer font families.
///
/// With `builtin` set the PDF references the builtin Courier and Helvetica
/// fonts and the files only supply metrics; otherwise the files are embedded.
pub fn load_listing_fonts(explicit: Option<&Path>, builtin: bool) -> Result<ListingFonts> {
    let (body_builtin, chrome_builtin) = if builtin {
        (Some(Builtin::Courier), Some(Builtin::Helvetica))
    } else {
        (None, None)
    };

    Ok(ListingFonts {
        body: load_family(BODY_FAMILIES, explicit, body_builtin)?,
        chrome: load_family(CHROME_FAMILIES, explicit, chrome_builtin)?,
    })
}

/// Indicates whether a body and a header/footer family can be found.
pub fn listing_fonts_available(explicit: Option<&Path>) -> bool {
    resolve_family(BODY_FAMILIES, explicit).is_ok()
        && resolve_family(CHROME_FAMILIES, explicit).is_ok()
}

/// Whether `ch` can be printed with a builtin PDF font.
pub fn is_windows_1252(ch: char) -> bool {
    matches!(ch, '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}') || WINDOWS_1252_EXTRAS.contains(&ch)
}

/// Prepares a single line for printing.
///
/// Control characters become spaces. With builtin fonts every character
/// Windows-1252 cannot encode becomes `?`, so the line keeps its width.
pub fn printable_line(line: &str, builtin: bool) -> Cow<'_, str> {
    let keep = |ch: char| {
        if builtin {
            is_windows_1252(ch)
        } else {
            !ch.is_control()
        }
    };
    if line.chars().all(keep) {
        return Cow::Borrowed(line);
    }

    Cow::Owned(
        line.chars()
            .map(|ch| match ch {
                ch if keep(ch) => ch,
                ch if ch.is_control() => ' ',
                _ => '?',
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let dir = Path::new("/opt/custom-fonts");
        let candidates = font_directory_candidates(Some(dir));
        assert_eq!(candidates.first().map(PathBuf::as_path), Some(dir));
        assert!(candidates
            .iter()
            .any(|c| c == Path::new("/usr/share/fonts/truetype/liberation")));
    }

    #[test]
    fn family_paths_cover_all_styles() {
        let files = DEJAVU_SANS_MONO.paths(Path::new("fonts"));
        assert_eq!(files.len(), 4);
        assert_eq!(files[0], Path::new("fonts/DejaVuSansMono.ttf"));
        assert_eq!(files[3], Path::new("fonts/DejaVuSansMono-BoldOblique.ttf"));
        assert_eq!(
            LIBERATION_MONO.paths(Path::new("fonts"))[3],
            Path::new("fonts/LiberationMono-BoldItalic.ttf")
        );
    }

    fn touch_family(dir: &Path, family: &FamilyFiles) {
        for path in family.paths(dir) {
            std::fs::write(path, b"").expect("create font file");
        }
    }

    #[test]
    fn dejavu_stands_in_for_missing_liberation() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch_family(dir.path(), &DEJAVU_SANS_MONO);
        touch_family(dir.path(), &DEJAVU_SANS);

        let (body, body_dir) = resolve_family(BODY_FAMILIES, Some(dir.path())).expect("body");
        let (chrome, _) = resolve_family(CHROME_FAMILIES, Some(dir.path())).expect("chrome");
        assert_eq!(body.name, "DejaVuSansMono");
        assert_eq!(chrome.name, "DejaVuSans");
        assert_eq!(body_dir, dir.path());
        assert!(listing_fonts_available(Some(dir.path())));
    }

    #[test]
    fn liberation_is_preferred_in_the_same_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch_family(dir.path(), &DEJAVU_SANS_MONO);
        touch_family(dir.path(), &LIBERATION_MONO);

        let (body, _) = resolve_family(BODY_FAMILIES, Some(dir.path())).expect("body");
        assert_eq!(body, &LIBERATION_MONO);
    }

    #[test]
    fn incomplete_family_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(DEJAVU_SANS_MONO.regular), b"").expect("create font file");
        assert!(!DEJAVU_SANS_MONO.is_complete_in(dir.path()));
    }

    #[test]
    fn missing_fonts_report_io_kind() {
        const NO_SUCH_FAMILY: &[FamilyFiles] = &[FamilyFiles {
            name: "NoSuchFamily",
            regular: "NoSuchFamily-Regular.ttf",
            bold: "NoSuchFamily-Bold.ttf",
            italic: "NoSuchFamily-Italic.ttf",
            bold_italic: "NoSuchFamily-BoldItalic.ttf",
        }];
        let dir = tempfile::tempdir().expect("tempdir");
        let err = resolve_family(NO_SUCH_FAMILY, Some(dir.path())).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
        assert!(err.to_string().contains("NoSuchFamily"));
    }

    #[test]
    fn builtin_lines_replace_unencodable_characters() {
        assert_eq!(printable_line("caf\u{e9} \u{2014} ok", true), "caf\u{e9} \u{2014} ok");
        assert_eq!(printable_line("\u{3bb} x \u{1f600}", true), "? x ?");
        assert_eq!(printable_line("a\u{7}b", true), "a b");
    }

    #[test]
    fn embedded_lines_keep_unicode() {
        assert_eq!(printable_line("\u{3bb} x", false), "\u{3bb} x");
        assert_eq!(printable_line("a\u{c}b", false), "a b");
    }
}
