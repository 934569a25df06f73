use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use mta_rust_goimports_core::{
    format_output, resolve_root_prefix, ImportScanner, OutputFormat, ParseFailurePolicy,
    ScanConfig,
};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "goimports-map")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map every Go package directory to the imports it declares")]
#[command(long_about = "Walks a directory tree, reads the import section of every .go file \
    and prints a map from package directory to imported paths. Directory keys are made \
    relative to $GOPATH/src/ ($HOME/go/src/ when GOPATH is unset).\n\n\
    Directories whose path contains the exclude marker (default: vendor) are skipped. \
    Directories whose files fail to parse are left out of the map.")]
pub struct Args {
    /// Directory to search from
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Output format [text|json|yaml]; any other value prints nothing
    #[arg(short = 'o', long = "output", default_value = "text")]
    pub output: String,

    /// Skip directories whose path contains this substring
    #[arg(short = 'x', long, default_value = mta_rust_goimports_core::config::DEFAULT_EXCLUDE)]
    pub exclude: String,

    /// Do not descend into excluded directories
    #[arg(long)]
    pub prune_excluded: bool,

    /// Keep imports from the files of a directory that did parse
    #[arg(long)]
    pub keep_partial: bool,

    /// Prefix stripped from directory keys (overrides GOPATH)
    #[arg(long)]
    pub root_prefix: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log skipped directories and run statistics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let colorize = !args.no_color && io::stdout().is_terminal();
    if !colorize {
        colored::control::set_override(false);
    }

    match run(&args, colorize) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args, colorize: bool) -> anyhow::Result<()> {
    let root_prefix = args.root_prefix.clone().unwrap_or_else(resolve_root_prefix);
    tracing::debug!(root_prefix = %root_prefix, "resolved root prefix");

    let policy = if args.keep_partial {
        ParseFailurePolicy::SkipFile
    } else {
        ParseFailurePolicy::SkipDirectory
    };

    let config = ScanConfig::new(args.dir.clone())
        .with_exclude(args.exclude.clone())
        .with_prune_excluded(args.prune_excluded)
        .with_failure_policy(policy)
        .with_root_prefix(root_prefix);

    let (import_map, stats) = ImportScanner::new(config)
        .scan_with_stats()
        .with_context(|| format!("scanning {}", args.dir.display()))?;

    tracing::debug!(
        walked = stats.directories_walked,
        recorded = stats.directories_recorded,
        skipped = stats.directories_skipped,
        files_parsed = stats.files_parsed,
        files_failed = stats.files_failed,
        "scan finished"
    );

    if import_map.is_empty() {
        return Ok(());
    }

    let Some(format) = OutputFormat::from_name(&args.output) else {
        tracing::debug!(format = %args.output, "unknown output format, nothing printed");
        return Ok(());
    };

    let output = format_output(&import_map, format, colorize)
        .context("error marshalling")?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
