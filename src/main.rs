//! CLI entry point for repodoc

use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use repodoc::walk::normalize;
use repodoc::{
    AppConfig, RuleOptions, RuleSet, TreeWalker, print_json, print_stats, render_document,
    render_tree,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "repodoc")]
#[command(about = "Document the structure and contents of a repository as one text file")]
#[command(version)]
#[command(
    after_help = "To ignore no types: --ignore-types none. To include only *.py: --include-files '*.py'"
)]
struct Args {
    /// Repository root to document
    #[arg(short = 'r', long = "repo-path", default_value = ".")]
    repo_path: PathBuf,

    /// Output file (default comes from configuration)
    #[arg(short = 'o', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Restrict the walk to one subdirectory (relative to the root)
    #[arg(long = "scope-to", value_name = "DIR")]
    scope_to: Option<String>,

    /// Only include files matching these glob patterns
    #[arg(long = "include-files", num_args = 0.., value_name = "GLOB")]
    include_files: Option<Vec<String>>,

    /// Exclude directories by bare name (anywhere) or relative path (exact); 'none' clears
    #[arg(long = "exclude-dir", num_args = 0.., value_name = "NAME|PATH")]
    exclude_dir: Option<Vec<String>>,

    /// Ignore files by exact name or glob; 'none' clears
    #[arg(long = "ignore-files", num_args = 0.., value_name = "NAME|GLOB")]
    ignore_files: Option<Vec<String>>,

    /// Ignore files with these extensions; 'none' disables the default blacklist
    #[arg(long = "ignore-types", num_args = 0.., value_name = "EXT")]
    ignore_types: Option<Vec<String>>,

    /// Also ignore settings/configuration files (.ini, .json, .yaml, ...)
    #[arg(long = "ignore-settings")]
    ignore_settings: bool,

    /// Produce only the tree section, without file contents
    #[arg(long = "no-content")]
    no_content: bool,

    /// Walk and report to stdout without writing the output file
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print the filtered tree as JSON to stdout instead of writing the document
    #[arg(long = "json", conflicts_with = "dry_run")]
    json: bool,

    /// Log each exclusion decision to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// JSON configuration file with extension categories
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum file size to embed in the document (suffixes: K, M, G)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Without a suffix the value is taken as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = match s.strip_suffix('B').unwrap_or(&s) {
        v if v.ends_with('G') => (&v[..v.len() - 1], 1024 * 1024 * 1024),
        v if v.ends_with('M') => (&v[..v.len() - 1], 1024 * 1024),
        v if v.ends_with('K') => (&v[..v.len() - 1], 1024),
        v => (v, 1),
    };
    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;
    Ok(num * multiplier)
}

/// The rule-set form of the output path: root-relative when it points inside
/// the root, bare file name otherwise, so the document never swallows itself.
fn output_file_matcher(output: &Path, root: &Path) -> Option<String> {
    let inside = if output.is_absolute() {
        output.strip_prefix(root).ok().map(|p| p.to_path_buf())
    } else if normalize(&output.to_string_lossy())
        .split('/')
        .any(|c| c == "..")
    {
        None
    } else {
        Some(output.to_path_buf())
    };
    match inside {
        Some(rel) => Some(normalize(&rel.to_string_lossy())),
        None => output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned()),
    }
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "repodoc=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();

    if let Some(ref size_str) = args.max_file_size {
        match parse_file_size(size_str) {
            Ok(size) => repodoc::content::set_max_content_size(size),
            Err(e) => {
                eprintln!("repodoc: invalid --max-file-size '{}': {}", size_str, e);
                process::exit(1);
            }
        }
    }

    let config = match &args.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("repodoc: {}", e);
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    let root = if args.repo_path.is_absolute() {
        args.repo_path.clone()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(&args.repo_path)
    };
    if !root.is_dir() {
        eprintln!(
            "repodoc: '{}' is not a valid directory",
            args.repo_path.display()
        );
        process::exit(1);
    }

    let output_file = args
        .output_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.default_output_file));

    let opts = RuleOptions {
        output_file: output_file_matcher(&output_file, &root),
        scope_to: args.scope_to.clone(),
        include_files: args.include_files.clone(),
        exclude_dirs: args.exclude_dir.clone(),
        ignore_files: args.ignore_files.clone(),
        ignore_types: args.ignore_types.clone(),
        ignore_settings: args.ignore_settings,
        no_content: args.no_content,
    };

    let rules = match RuleSet::build(opts, &config) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("repodoc: {}", e);
            process::exit(1);
        }
    };
    let include_content = rules.include_content();

    let outcome = TreeWalker::new(rules).walk(&root);
    for path in &outcome.stats.unreadable_dirs {
        eprintln!("repodoc: warning: could not read directory '{}'", path);
    }

    let result = if args.json {
        print_json(&outcome.tree)
    } else if args.dry_run {
        print!("{}", render_tree(&outcome.tree));
        println!();
        print_stats(&outcome.stats, should_use_color(args.color))
    } else {
        write_document(&output_file, &outcome, &root, include_content).map(|_| {
            println!(
                "repodoc: {} -> {}",
                outcome.stats.summary(),
                output_file.display()
            );
        })
    };

    if let Err(e) = result {
        eprintln!("repodoc: error writing output: {}", e);
        process::exit(1);
    }

    if args.verbose && !args.dry_run && !args.json {
        if let Err(e) = print_stats(&outcome.stats, should_use_color(args.color)) {
            eprintln!("repodoc: error writing output: {}", e);
            process::exit(1);
        }
    }
}

fn write_document(
    output_file: &Path,
    outcome: &repodoc::WalkOutcome,
    root: &Path,
    include_content: bool,
) -> std::io::Result<()> {
    let file = File::create(output_file)?;
    let mut writer = BufWriter::new(file);
    render_document(&mut writer, &outcome.tree, root, include_content)?;
    writer.flush()
}
