//! Tag and rename scanned PDF statements.
//!
//! Usage:
//!   pdftag run --dir ~/scans --output ~/sorted --rules rules.json --text
//!   pdftag extract --rules rules.json 2021_03_03_10_11_12.pdf

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use pdftag::config::default_threads;
use pdftag::pipeline::extract_file;
#[cfg(feature = "pdf")]
use pdftag::source::GlyphSource;
use pdftag::{Coordinator, LayoutConfig, NameRegistry, PipelineConfig, RuleTable, TagPolicy};

#[derive(Parser, Debug)]
#[command(name = "pdftag")]
#[command(
    version,
    about = "Recover text from PDFs, tag them by keyword and rename them by rule",
    long_about = None
)]
struct Cli {
    /// Log per-document decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process every PDF under a directory
    Run(RunArgs),

    /// Print the text and first date of individual files
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Directory to scan recursively
    #[arg(short, long)]
    dir: PathBuf,

    /// Output directory for copies, text files and reports
    #[arg(short, long)]
    output: PathBuf,

    /// JSON rule table
    #[arg(short, long)]
    rules: PathBuf,

    /// Number of documents processed concurrently
    #[arg(long, default_value_t = default_threads())]
    threads: usize,

    /// Process every PDF, not only scanner timestamp names
    #[arg(long)]
    all_files: bool,

    /// Write the recovered text next to each recorded document
    #[arg(short, long)]
    text: bool,

    /// Symlink to the source instead of copying it
    #[arg(long)]
    symlink: bool,

    /// Which documents are recorded in tags.json
    #[arg(long, value_enum, default_value_t = TagMode::All)]
    tags: TagMode,

    /// Reconstruct with the classic layout settings, which drop the last
    /// line of every page
    #[arg(long)]
    reference_layout: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// JSON rule table, used to report matching keywords
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Print only the recovered text
    #[arg(short, long)]
    text: bool,

    /// Reconstruct with the classic layout settings
    #[arg(long)]
    reference_layout: bool,

    /// PDF files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TagMode {
    /// Record every processed document
    All,
    /// Record only documents no rule renamed
    Unmatched,
}

impl From<TagMode> for TagPolicy {
    fn from(mode: TagMode) -> Self {
        match mode {
            TagMode::All => TagPolicy::All,
            TagMode::Unmatched => TagPolicy::UnmatchedOnly,
        }
    }
}

fn layout(reference: bool) -> LayoutConfig {
    if reference {
        LayoutConfig::reference()
    } else {
        LayoutConfig::default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Extract(args) => extract(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let rules = RuleTable::load(&args.rules)
        .with_context(|| format!("Failed to load rules from {}", args.rules.display()))?;
    let registry = NameRegistry::seed_from_dir(&args.output, "pdf")
        .with_context(|| format!("Failed to read output directory {}", args.output.display()))?;

    let config = PipelineConfig::new(&args.dir, &args.output)
        .with_threads(args.threads)
        .with_rename_new_only(!args.all_files)
        .with_write_text(args.text)
        .with_symlink(args.symlink)
        .with_tag_policy(args.tags.into())
        .with_layout(layout(args.reference_layout));

    let coordinator = Coordinator::new(config, rules, registry, glyph_source()?);
    let report = coordinator
        .run()
        .with_context(|| format!("Run over {} failed", args.dir.display()))?;

    println!(
        "{} PDFs found, {} processed, {} renamed, {} words reported",
        report.discovered,
        report.processed,
        report.renamed,
        report.words.len()
    );
    for failure in &report.failures {
        eprintln!("  failed: {}: {}", failure.path.display(), failure.reason);
    }
    Ok(())
}

fn extract(args: ExtractArgs) -> Result<()> {
    let rules = args
        .rules
        .as_deref()
        .map(|path| {
            RuleTable::load(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))
        })
        .transpose()?;
    let source = glyph_source()?;
    let layout = layout(args.reference_layout);

    let mut failed = 0;
    for path in &args.files {
        match extract_file(&source, path, &layout, rules.as_ref()) {
            Ok(extraction) if args.text => println!("{}", extraction.text),
            Ok(extraction) => {
                println!("{}", path.display());
                println!("  date: {}", display_or_none(&extraction.first_date));
                if rules.is_some() {
                    let tags: Vec<&str> = extraction.tags.iter().map(String::as_str).collect();
                    println!("  tags: {}", display_or_none(&tags.join(" ")));
                }
                println!("{}", extraction.text);
            },
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed += 1;
            },
        }
    }

    if failed > 0 {
        bail!("{} of {} files could not be read", failed, args.files.len());
    }
    Ok(())
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}

#[cfg(feature = "pdf")]
fn glyph_source() -> Result<impl GlyphSource> {
    Ok(pdftag::source::PdfOxideSource::new())
}

#[cfg(not(feature = "pdf"))]
fn glyph_source() -> Result<pdftag::source::MemorySource> {
    bail!("pdftag was built without the `pdf` feature and cannot decode files")
}
