//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::core::config::ManifestConfig;
use crate::core::paths::resolve_project_root;
use crate::core::util::{format_timestamp, now};
use crate::manifest::render::{render_entries, render_manifest, ListFormat};
use crate::manifest::{collect_entries, generate_manifest};

/// mkappcache - write a browser application-cache manifest for a project's assets.
#[derive(Parser, Debug)]
#[command(name = "mkappcache")]
#[command(
    author,
    version,
    about,
    long_about = r#"mkappcache walks the project's asset directories and writes an
application-cache manifest listing every file to cache offline.

With no arguments it lists src/, styles/ and js/ into cache.appcache, skipping
media files (.mp3 .mp4 .ogv .ogg .webm), .excss files, .DS_Store and anything
under .svn/. Running it from the project's scripts/ directory works the same
as running it from the project root.

Examples:
    mkappcache
    mkappcache --dir assets --dir vendor --output offline.appcache
    mkappcache list --format jsonl
    mkappcache generate --stdout
"#
)]
pub struct Cli {
    /// Project root (defaults to the current directory, or its parent inside scripts/).
    #[arg(
        long,
        global = true,
        value_name = "ROOT",
        long_help = "Project root. Source directories and the output file are resolved\n\
against it, and manifest entries are relative to it.\n\n\
If omitted, the current directory is used; when the current directory is a\n\
scripts directory its parent is used instead."
    )]
    pub root: Option<PathBuf>,

    /// JSON config file (defaults to ROOT/mkappcache.json when present).
    #[arg(long, global = true, env = "MKAPPCACHE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Manifest file to write, relative to ROOT.
    #[arg(long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Source directory to list (repeatable; replaces the configured list).
    #[arg(
        short,
        long = "dir",
        global = true,
        value_name = "DIR",
        long_help = "Source directory to list, relative to ROOT. Repeat to list several;\n\
directories are written in the order given. Replaces the configured list."
    )]
    pub dirs: Vec<PathBuf>,

    /// Extra extension to exclude, including the dot (repeatable).
    #[arg(short = 'x', long = "exclude", global = true, value_name = "EXT")]
    pub excludes: Vec<String>,

    /// Extra directory name to skip entirely (repeatable).
    #[arg(long = "ignore-dir", global = true, value_name = "NAME")]
    pub ignore_dirs: Vec<String>,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the manifest (the default when no command is given).
    #[command(
        long_about = "Walk every source directory and overwrite the manifest file with a\n\
fresh timestamp, the cached entries and the NETWORK: * fallback section.\n\n\
Examples:\n\
  mkappcache generate\n\
  mkappcache generate --stdout > preview.appcache\n"
    )]
    Generate {
        /// Print the manifest to stdout instead of writing the output file.
        #[arg(long)]
        stdout: bool,
    },

    /// Print the entries that would be cached, without writing anything.
    #[command(
        long_about = "Walk every source directory and print the manifest entries.\n\n\
Output formats:\n\
- text: one path per line (default)\n\
- jsonl: one {\"source_dir\", \"path\"} object per line\n\
- json: a single JSON array\n"
    )]
    List {
        /// Output format (text/jsonl/json).
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: String,
    },
}

/// Install the stderr tracing subscriber; `RUST_LOG` overrides the flag-derived level.
pub fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Project root and effective config after discovery and CLI overrides
fn resolve(cli: &Cli) -> Result<(PathBuf, ManifestConfig)> {
    let explicit = match &cli.config {
        Some(path) => Some(
            ManifestConfig::from_path(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
        ),
        None => None,
    };

    let (root, mut config) = match (&cli.root, explicit) {
        (Some(root), explicit) => {
            let root = root.canonicalize().unwrap_or_else(|_| root.clone());
            let config = match explicit {
                Some(config) => config,
                None => ManifestConfig::discover(&root)
                    .with_context(|| format!("Failed to load config from {}", root.display()))?,
            };
            (root, config)
        }
        (None, Some(config)) => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            (resolve_project_root(&cwd, &config.script_dirs), config)
        }
        (None, None) => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            ManifestConfig::discover_from_cwd(&cwd)
                .with_context(|| format!("Failed to load config near {}", cwd.display()))?
        }
    };

    apply_overrides(cli, &mut config);
    debug!(root = %root.display(), ?config, "resolved configuration");
    Ok((root, config))
}

fn apply_overrides(cli: &Cli, config: &mut ManifestConfig) {
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if !cli.dirs.is_empty() {
        config.source_dirs = cli.dirs.clone();
    }
    config.excluded_extensions.extend(cli.excludes.iter().cloned());
    config.ignored_dirs.extend(cli.ignore_dirs.iter().cloned());
}

pub fn run(cli: Cli) -> Result<()> {
    let (root, config) = resolve(&cli)?;

    match cli.command {
        None | Some(Commands::Generate { stdout: false }) => run_generate(&root, &config),
        Some(Commands::Generate { stdout: true }) => run_print(&root, &config),
        Some(Commands::List { format }) => {
            let format: ListFormat = format.parse().map_err(anyhow::Error::msg)?;
            run_list(&root, &config, format)
        }
    }
}

fn run_generate(root: &Path, config: &ManifestConfig) -> Result<()> {
    let timestamp = format_timestamp(&now());
    let summary = generate_manifest(root, config, &timestamp).with_context(|| {
        format!(
            "Failed to generate manifest {}",
            config.output_path(root).display()
        )
    })?;
    info!(
        output = %summary.output.display(),
        entries = summary.entries,
        "wrote manifest"
    );
    Ok(())
}

fn run_print(root: &Path, config: &ManifestConfig) -> Result<()> {
    let entries = collect_entries(root, config).context("Failed to collect manifest entries")?;
    print!("{}", render_manifest(&format_timestamp(&now()), &entries));
    Ok(())
}

fn run_list(root: &Path, config: &ManifestConfig, format: ListFormat) -> Result<()> {
    let entries = collect_entries(root, config).context("Failed to collect manifest entries")?;
    let rendered = render_entries(&entries, format);
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}
