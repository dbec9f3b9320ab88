use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use dsl2pdf::config::{DEFAULT_INPUT, DEFAULT_LANGUAGE, DEFAULT_OUTPUT, DEFAULT_TITLE};
use dsl2pdf::fonts::FONTS_DIR_ENV;
use dsl2pdf::{ConversionConfig, LanguageCatalog, PaperFormat};
use tracing_subscriber::EnvFilter;

/// Converts a DSL or other plain-text file into a paginated PDF listing.
///
/// The body is set in Liberation Mono and the page chrome in Liberation Sans.
/// The font files are looked up in `--fonts-dir`, `DSL2PDF_FONTS_DIR`,
/// `assets/fonts` and the usual system font directories.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Text file to convert.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// PDF file to write.
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Tokenizer name, alias or file extension; unknown values mean plain text.
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Title printed at the top of every page.
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Paper format.
    #[arg(long, value_enum, default_value_t = Paper::A4)]
    paper: Paper,

    /// Directory holding the LiberationMono and LiberationSans TTF files.
    #[arg(long, env = FONTS_DIR_ENV)]
    fonts_dir: Option<PathBuf>,

    /// Embed the fonts instead of referencing the builtin Courier and Helvetica.
    #[arg(long)]
    embed_fonts: bool,

    /// Tab stop width; 0 keeps tabs.
    #[arg(long, default_value_t = dsl2pdf::config::DEFAULT_TAB_WIDTH)]
    tab_width: usize,

    /// Skip the tokenizer pass and normalize whitespace directly.
    #[arg(long)]
    no_highlight: bool,

    /// Print `<`, `>` and `&` from the source literally instead of as entities.
    #[arg(long)]
    decode_entities: bool,

    /// Print the available languages and exit.
    #[arg(long)]
    list_languages: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    A4,
    Letter,
    Legal,
}

impl From<Paper> for PaperFormat {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PaperFormat::A4,
            Paper::Letter => PaperFormat::Letter,
            Paper::Legal => PaperFormat::Legal,
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_languages {
        for language in LanguageCatalog::new().languages() {
            println!("{:<32} {}", language.name, language.extensions.join(", "));
        }
        return ExitCode::SUCCESS;
    }

    let config = ConversionConfig::new(cli.input, cli.output)
        .with_language(cli.language)
        .with_title(cli.title)
        .with_paper(cli.paper.into())
        .with_fonts_dir(cli.fonts_dir)
        .with_builtin_fonts(!cli.embed_fonts)
        .with_tab_width(cli.tab_width)
        .with_highlight(!cli.no_highlight)
        .with_decode_entities(cli.decode_entities);
    log::debug!("converting with {config:?}");

    if dsl2pdf::convert_and_report(&config) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
