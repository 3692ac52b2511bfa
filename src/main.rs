use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pirepe::config::{CONFIG_PATH, PirepeConfig, default_config_template};
use pirepe::error::PirepeError;
use pirepe::format::OutputFormat;
use pirepe::import::ImportSummary;
use pirepe::model::item::ItemKind;
use pirepe::model::library::Library;
use pirepe::model::slug::Slug;
use pirepe::reconcile::Policy;
use pirepe::store::{JsonFileStore, LibraryStore};
use pirepe::{export, import, telemetry};

/// Pattern library toolkit
///
/// pirepe stores four collections of block content — patterns, templates,
/// template parts, and synced patterns — in a local JSON library, and moves
/// them between sites as portable JSON bundles.
///
/// Importing a bundle reconciles it against the stored library by slug:
/// new items are appended, duplicates are either kept ('skip', the default)
/// or replaced in place ('overwrite'). Every import prints a per-collection
/// change report.
///
/// QUICK START:
///
///   pirepe init
///   pirepe import their-patterns.json
///   pirepe list
///
///   # Replace duplicates instead of keeping yours:
///   pirepe import their-patterns.json --policy overwrite
///
///   # Hand your library to someone else:
///   pirepe export
#[derive(Parser)]
#[command(name = "pirepe")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'pirepe <command> --help' for more information on a specific command.")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "PIREPE_CONFIG", default_value = CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize pirepe in the current directory
    ///
    /// Writes a commented default config to .pirepe/config.toml.
    /// Safe to run multiple times — an existing config is left untouched.
    Init,

    /// Import a JSON bundle into the library
    ///
    /// Duplicate slugs are resolved by the policy: 'skip' keeps the stored
    /// item, 'overwrite' replaces it in place. Items missing a slug, title,
    /// or content are dropped before reconciliation.
    Import {
        /// Bundle file to import
        file: PathBuf,

        /// Duplicate policy: skip or overwrite (default from config)
        #[arg(long)]
        policy: Option<String>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export the library as a JSON bundle
    Export {
        /// Output file (default from config, normally pirepe-patterns.json)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print the bundle to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Emit compact JSON regardless of config
        #[arg(long)]
        compact: bool,
    },

    /// List the stored library
    List {
        /// Show one collection only: patterns, templates, template-parts,
        /// or synced-patterns
        #[arg(long)]
        kind: Option<String>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();
    let config = PirepeConfig::load(&cli.config).map_err(PirepeError::from)?;

    match cli.command {
        Commands::Init => cmd_init(&cli.config),
        Commands::Import {
            file,
            policy,
            format,
        } => cmd_import(&config, &file, policy.as_deref(), &format),
        Commands::Export {
            out,
            stdout,
            compact,
        } => cmd_export(&config, out, stdout, compact),
        Commands::List { kind, format } => cmd_list(&config, kind.as_deref(), &format),
    }
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn cmd_init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Already initialized — {} left untouched.", config_path.display());
        return Ok(());
    }
    if let Some(dir) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }
    std::fs::write(config_path, default_config_template())
        .with_context(|| format!("could not write {}", config_path.display()))?;
    println!("Initialized pirepe — config written to {}.", config_path.display());
    println!();
    println!("Next: pirepe import <file>");
    Ok(())
}

// ---------------------------------------------------------------------------
// import
// ---------------------------------------------------------------------------

fn cmd_import(
    config: &PirepeConfig,
    file: &Path,
    policy: Option<&str>,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let policy = match policy {
        Some(s) => s.parse::<Policy>()?,
        None => config.import.policy,
    };

    let payload = match std::fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PirepeError::MissingFile {
                path: file.to_owned(),
            }
            .into());
        }
        Err(e) => return Err(PirepeError::Io(e).into()),
    };

    let store = JsonFileStore::new(&config.library.path);
    let summary = import::run(&store, &payload, policy, config.import.report_limit)?;

    match format {
        OutputFormat::Text => print_summary(&summary),
        OutputFormat::Json => println!("{}", format.serialize(&summary)?),
    }
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    println!("Imported with policy '{}':", summary.policy);
    for c in &summary.collections {
        let mut line = format!("  {:<16} {} added", c.kind.to_string(), c.added);
        if c.skipped_total > 0 {
            line.push_str(&format!(
                ", {} skipped ({})",
                c.skipped_total,
                slug_list(&c.skipped, c.skipped_total)
            ));
        }
        if c.overwritten_total > 0 {
            line.push_str(&format!(
                ", {} overwritten ({})",
                c.overwritten_total,
                slug_list(&c.overwritten, c.overwritten_total)
            ));
        }
        if c.dropped > 0 {
            line.push_str(&format!(", {} dropped as invalid", c.dropped));
        }
        println!("{line}");
    }
    println!();
    println!("Next: pirepe list");
}

fn slug_list(shown: &[Slug], total: usize) -> String {
    let mut joined = shown
        .iter()
        .map(Slug::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if total > shown.len() {
        joined.push_str(", ...");
    }
    joined
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

fn cmd_export(
    config: &PirepeConfig,
    out: Option<PathBuf>,
    stdout: bool,
    compact: bool,
) -> Result<()> {
    let pretty = config.export.pretty && !compact;
    let store = JsonFileStore::new(&config.library.path);
    let json = export::run(&store, pretty)?;

    if stdout {
        println!("{json}");
        return Ok(());
    }

    let path = out.unwrap_or_else(|| config.export.filename.clone());
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("could not write {}", path.display()))?;
    println!("Exported library to {}.", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn cmd_list(config: &PirepeConfig, kind: Option<&str>, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let kind = kind.map(str::parse::<ItemKind>).transpose()?;

    let store = JsonFileStore::new(&config.library.path);
    let library = store.load()?;

    match format {
        OutputFormat::Json => {
            let value = serde_json::to_value(&library)?;
            match kind {
                Some(k) => println!("{}", format.serialize(&value[bundle_key(k)])?),
                None => println!("{}", format.serialize(&value)?),
            }
        }
        OutputFormat::Text => print_library(&library, kind),
    }
    Ok(())
}

const fn bundle_key(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Patterns => "patterns",
        ItemKind::Templates => "templates",
        ItemKind::TemplateParts => "templateParts",
        ItemKind::SyncedPatterns => "syncedPatterns",
    }
}

fn print_library(library: &Library, only: Option<ItemKind>) {
    if library.is_empty() {
        println!("Library is empty.");
        println!();
        println!("Next: pirepe import <file>");
        return;
    }

    let kinds: Vec<ItemKind> = match only {
        Some(k) => vec![k],
        None => ItemKind::ALL.to_vec(),
    };

    for kind in kinds {
        let rows: Vec<(String, String)> = match kind {
            ItemKind::Patterns => library
                .patterns
                .iter()
                .map(|i| (i.slug.to_string(), i.title.clone()))
                .collect(),
            ItemKind::Templates => library
                .templates
                .iter()
                .map(|i| (i.slug.to_string(), i.title.clone()))
                .collect(),
            ItemKind::TemplateParts => library
                .template_parts
                .iter()
                .map(|i| (i.slug.to_string(), i.title.clone()))
                .collect(),
            ItemKind::SyncedPatterns => library
                .synced_patterns
                .iter()
                .map(|i| (i.slug.to_string(), i.title.clone()))
                .collect(),
        };

        if rows.is_empty() && only.is_none() {
            continue;
        }
        println!("{kind} ({}):", rows.len());
        for (slug, title) in rows {
            println!("  {slug}\t{title}");
        }
    }
}
