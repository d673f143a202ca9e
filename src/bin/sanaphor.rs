//! sanaphor - refine coreference clusters with entity links
//!
//! # Usage
//!
//! ```bash
//! # Refine with the default file names in the current directory
//! sanaphor refine
//!
//! # Explicit inputs, JSON report
//! sanaphor refine --coref corefs.txt --entities linked.txt \
//!     --conll test.conll --output test.new.conll --format json
//!
//! # Produce the entity stream from a label dictionary
//! sanaphor link --labels labels.tsv --redirects redirects.nt \
//!     --disambiguations disambiguations.nt --types types.tsv --depths depths.tsv \
//!     --coref corefs.txt --output linked.txt
//!
//! # Look up a few surface forms
//! sanaphor lookup --labels labels.tsv --redirects redirects.nt \
//!     --disambiguations disambiguations.nt "Donald Trump" Paris
//! ```
//!
//! Changed tag lines are logged as warnings by default. Set `RUST_LOG=debug`
//! to see every split and merge decision, or `RUST_LOG=error` to silence them.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;

use sanaphor::pipeline::{link_stream, run, RunSummary};
use sanaphor::{Evaluator, RefineConfig};
use sanaphor_linker::{LinkerIndex, LinkerPaths};

// ============================================================================
// CLI Structure
// ============================================================================

/// Refine coreference clusters using entity-linking evidence
#[derive(Parser)]
#[command(name = "sanaphor", author, version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split and merge clusters, rewrite the CoNLL file and report scores
    #[command(visible_alias = "r")]
    Refine(RefineArgs),

    /// Link every mention of a coreference stream, writing an entity stream
    #[command(visible_alias = "l")]
    Link(LinkArgs),

    /// Link surface forms and print their types
    Lookup(LookupArgs),
}

/// Report format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON summary
    Json,
}

#[derive(Args)]
struct RefineArgs {
    /// Coreference stream
    #[arg(long, value_name = "PATH")]
    coref: Option<PathBuf>,

    /// Entity-linking stream, row-aligned with the coreference stream
    #[arg(long, value_name = "PATH")]
    entities: Option<PathBuf>,

    /// CoNLL file to rewrite
    #[arg(long, value_name = "PATH")]
    conll: Option<PathBuf>,

    /// Where to write the rewritten CoNLL file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// TOML file with the four paths; flags override it
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    format: OutputFormat,
}

#[derive(Args)]
struct IndexArgs {
    /// Label dictionary (label<TAB>uri)
    #[arg(long, value_name = "PATH")]
    labels: PathBuf,

    /// Redirect triples
    #[arg(long, value_name = "PATH")]
    redirects: PathBuf,

    /// Disambiguation triples
    #[arg(long, value_name = "PATH")]
    disambiguations: PathBuf,

    /// Entity types (uri<TAB>type)
    #[arg(long, value_name = "PATH")]
    types: Option<PathBuf>,

    /// Type depths (type<TAB>level)
    #[arg(long, value_name = "PATH")]
    depths: Option<PathBuf>,
}

impl IndexArgs {
    fn paths(&self) -> LinkerPaths {
        LinkerPaths {
            labels: self.labels.clone(),
            redirects: self.redirects.clone(),
            disambiguations: self.disambiguations.clone(),
            types: self.types.clone(),
            depths: self.depths.clone(),
        }
    }

    fn load(&self) -> Result<LinkerIndex, String> {
        LinkerIndex::load(&self.paths()).map_err(|e| format!("failed to load linker index: {}", e))
    }
}

#[derive(Args)]
struct LinkArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Coreference stream to link
    #[arg(long, value_name = "PATH")]
    coref: PathBuf,

    /// Where to write the entity stream
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,
}

#[derive(Args)]
struct LookupArgs {
    #[command(flatten)]
    index: IndexArgs,

    /// Surface forms to link
    #[arg(required = true)]
    mentions: Vec<String>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result: Result<(), String> = match cli.command {
        Commands::Refine(args) => cmd_refine(args),
        Commands::Link(args) => cmd_link(args),
        Commands::Lookup(args) => cmd_lookup(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let prefix = paint(io::stderr().is_terminal(), "31", "error:");
            eprintln!("{} {}", prefix, e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_refine(args: RefineArgs) -> Result<(), String> {
    let base = match &args.config {
        Some(path) => RefineConfig::load(path).map_err(|e| e.to_string())?,
        None => RefineConfig::default(),
    };
    let config = base.with_overrides(args.coref, args.entities, args.conll, args.output);

    let summary = run(&config).map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Human => print_summary(&summary),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("failed to serialize report: {}", e))?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_link(args: LinkArgs) -> Result<(), String> {
    link_stream(&args.index.paths(), &args.coref, &args.output).map_err(|e| e.to_string())?;
    println!("{} {}", color("32", "wrote"), args.output.display());
    Ok(())
}

fn cmd_lookup(args: LookupArgs) -> Result<(), String> {
    let index = args.index.load()?;
    for mention in &args.mentions {
        let Some(uri) = index.link(mention) else {
            println!("{}\t{}", mention, color("90", "NO ENTITY"));
            continue;
        };
        println!("{}\t{}", color("1", mention), uri);
        for ty in index.types(&uri).unwrap_or_default() {
            println!("  {}", ty);
        }
        if let Some(deepest) = index.deepest_type(&uri) {
            println!("  {} {}", color("1;33", "deepest type:"), deepest);
        }
    }
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn print_summary(summary: &RunSummary) {
    println!("Total annotated: {}", summary.linked_rows);
    println!("{}", summary.report);
    println!();
    println!("{}:", color("1;33", "Scores"));
    let r = &summary.report;
    print_scores("split (before)", &r.split_before);
    print_scores("split (after)", &r.split_after);
    print_scores("merge (before)", &r.merge_before);
    print_scores("merge (after)", &r.merge_after);
    println!();
    println!(
        "{} documents, {} splits, {} clusters merged, {} tag lines changed",
        summary.documents, r.splits, r.merges, summary.mismatches
    );
}

fn print_scores(name: &str, eval: &Evaluator) {
    println!(
        "  {:<15} P={:.3} R={:.3} F1={:.3} ({} pairs)",
        name,
        eval.precision(),
        eval.recall(),
        eval.f1(),
        eval.total()
    );
}

fn color(code: &str, text: &str) -> String {
    paint(io::stdout().is_terminal(), code, text)
}

fn paint(tty: bool, code: &str, text: &str) -> String {
    if tty {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
