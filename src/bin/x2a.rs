//! x2a CLI - Converts a folder of xdoc documents to AsciiDoc

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::Path;
#[cfg(feature = "cli")]
use std::process::ExitCode;
#[cfg(feature = "cli")]
use xdoc2asciidoc::{
    ConversionError, Converter, DuplicateChapterPolicy, StdDocumentStore, WriteMode, X2AOptions,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "x2a")]
#[command(version)]
#[command(about = "Converts xdoc documentation to AsciiDoc", long_about = None)]
struct Cli {
    /// Folder containing the xdoc documents
    input_dir: String,

    /// Folder the AsciiDoc files are written to
    output_dir: String,

    /// Replace output files that already exist
    #[arg(long)]
    overwrite: bool,

    /// Keep replaced outputs under this suffix (implies --overwrite)
    #[arg(long, value_name = "SUFFIX")]
    backup_suffix: Option<String>,

    /// Treat a closing bracket with nothing open as an error
    #[arg(long)]
    strict: bool,

    /// Maximum processing steps for a single line
    #[arg(long, default_value_t = xdoc2asciidoc::data::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Extension of input documents
    #[arg(long, default_value = xdoc2asciidoc::data::XDOC_EXTENSION)]
    input_extension: String,

    /// Extension of output files
    #[arg(long, default_value = xdoc2asciidoc::data::ASCIIDOC_EXTENSION)]
    output_extension: String,

    /// Let a repeated chapter id point to the file seen last
    #[arg(long)]
    allow_duplicate_chapters: bool,

    /// Verbose mode: log chapter registration and phases
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode: only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
impl Cli {
    fn options(&self) -> X2AOptions {
        X2AOptions {
            max_depth: self.max_depth,
            strict: self.strict,
            duplicate_chapters: if self.allow_duplicate_chapters {
                DuplicateChapterPolicy::Overwrite
            } else {
                DuplicateChapterPolicy::Error
            },
            input_extension: self.input_extension.clone(),
            output_extension: self.output_extension.clone(),
            write_mode: WriteMode {
                overwrite: self.overwrite || self.backup_suffix.is_some(),
                backup_suffix: self.backup_suffix.clone(),
            },
        }
    }

    fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<usize, ConversionError> {
    let store = StdDocumentStore::new(&cli.input_dir, &cli.output_dir);
    let mut converter = Converter::new(store, cli.options());
    let summary = converter.execute()?;

    if summary.warnings > 0 {
        log::warn!("{} warnings, review the marked lines", summary.warnings);
    }
    Ok(summary.converted.len())
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    log::info!("Converted documents still need a manual review before publishing");

    if !Path::new(&cli.input_dir).is_dir() {
        eprintln!("Invalid input directory: {}", cli.input_dir);
        return ExitCode::FAILURE;
    }
    if !Path::new(&cli.output_dir).is_dir() {
        eprintln!("Invalid output directory: {}", cli.output_dir);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(count) => {
            println!("All {} files processed OK", count);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install xdoc2asciidoc --features cli");
    eprintln!("  x2a [OPTIONS] <INPUT_DIR> <OUTPUT_DIR>");
}
