use clap::{Parser, Subcommand};
use colored::Colorize;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ctxgen_core::{Config, ContextSet, Dialect, PhraseSet};
use ctxgen_engine::{ContextGenerator, InlinePhrases, ValueSearchRequest};
use ctxgen_match::TemplateResolver;

/// ctxgen - Build parameterized NL2SQL context sets
#[derive(Parser)]
#[command(name = "ctxgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ctxgen.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace value phrases in a SQL/intent pair with placeholders
    Parameterize {
        #[arg(long)]
        sql: String,

        #[arg(long)]
        intent: String,

        /// Phrases as JSON (`{"New York": ["city"]}`), or @file
        #[arg(short, long)]
        phrases: String,

        /// SQL dialect (postgresql, mysql, googlesql)
        #[arg(short, long)]
        dialect: Option<String>,
    },

    /// Generalize a natural-language text into a manifest
    Manifest {
        #[arg(long)]
        text: String,

        /// Phrases as JSON, or @file
        #[arg(short, long)]
        phrases: String,
    },

    /// Generate templates from a JSON array of question/SQL items
    Templates {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Generate facets from a JSON array of intent/SQL snippet items
    Facets {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Convert a golden question/SQL file into templates
    ConvertGoldens {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Generate a value search from a match template
    ValueSearch {
        #[arg(long)]
        table: String,

        #[arg(long)]
        column: String,

        /// Semantic type of the column values (e.g. City)
        #[arg(long)]
        concept_type: String,

        /// Match function (see list-functions)
        #[arg(short, long)]
        match_function: String,

        /// Database engine (default from config)
        #[arg(short, long)]
        engine: Option<String>,

        /// Database engine version (default from config)
        #[arg(long)]
        db_version: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List available match functions
    ListFunctions {
        #[arg(short, long)]
        engine: Option<String>,

        #[arg(long)]
        db_version: Option<String>,
    },
}

#[derive(clap::Args)]
struct BatchArgs {
    /// Input JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file mapping each text to its detected phrases
    #[arg(long)]
    phrases_file: Option<PathBuf>,

    /// SQL dialect (postgresql, mysql, googlesql)
    #[arg(short, long)]
    dialect: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Write the context set to this file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append to the output file instead of replacing it
    #[arg(short, long)]
    attach: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new(Config::FILE_NAME).exists() {
        Config::from_file(Path::new(Config::FILE_NAME))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    if cli.verbose {
        eprintln!("{} dialect: {}", "Using".cyan(), config.dialect);
    }

    match cli.command {
        Commands::Parameterize { sql, intent, phrases, dialect } => {
            parameterize_command(&config, &sql, &intent, &phrases, dialect.as_deref())
        }
        Commands::Manifest { text, phrases } => manifest_command(&text, &phrases),
        Commands::Templates { batch } => batch_command(&config, BatchKind::Templates, &batch, cli.verbose).await,
        Commands::Facets { batch } => batch_command(&config, BatchKind::Facets, &batch, cli.verbose).await,
        Commands::ConvertGoldens { batch } => {
            batch_command(&config, BatchKind::Goldens, &batch, cli.verbose).await
        }
        Commands::ValueSearch {
            table,
            column,
            concept_type,
            match_function,
            engine,
            db_version,
            description,
            output,
        } => {
            let request = ValueSearchRequest {
                table,
                column,
                concept_type,
                match_function,
                engine: engine.unwrap_or_else(|| config.value_search.engine.clone()),
                version: db_version.or_else(|| config.value_search.version.clone()),
                description,
            };
            value_search_command(&config, &request, &output, cli.verbose)
        }
        Commands::ListFunctions { engine, db_version } => {
            let engine = engine.unwrap_or_else(|| config.value_search.engine.clone());
            let version = db_version.or_else(|| config.value_search.version.clone());
            list_functions_command(&engine, version.as_deref())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Dialect from the command line, falling back to the config
fn resolve_dialect(config: &Config, dialect: Option<&str>) -> Result<Dialect> {
    match dialect {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.dialect),
    }
}

/// Parse phrases given inline or as @file, in either accepted shape
fn load_phrases(arg: &str) -> Result<PhraseSet> {
    let json = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read phrases file {}", path))?,
        None => arg.to_string(),
    };

    PhraseSet::from_json(&json).context("Phrases must be a JSON object of phrase -> [types]")
}

/// Parameterize command - substitute phrases in one SQL/intent pair
fn parameterize_command(
    config: &Config,
    sql: &str,
    intent: &str,
    phrases: &str,
    dialect: Option<&str>,
) -> Result<()> {
    let dialect = resolve_dialect(config, dialect)?;
    let phrases = load_phrases(phrases)?;

    let result = ctxgen_param::parameterize(&phrases, sql, intent, dialect);

    tracing::debug!(substituted = result.substitutions.len(), total = phrases.len(), "parameterized");

    let json = serde_json::json!({
        "sql": result.sql,
        "intent": result.intent,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

/// Manifest command - generalize a text
fn manifest_command(text: &str, phrases: &str) -> Result<()> {
    let phrases = load_phrases(phrases)?;
    println!("{}", ctxgen_param::generate_manifest(text, &phrases));
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum BatchKind {
    Templates,
    Facets,
    Goldens,
}

/// Templates / facets / convert-goldens commands
async fn batch_command(config: &Config, kind: BatchKind, args: &BatchArgs, verbose: bool) -> Result<()> {
    let dialect = resolve_dialect(config, args.dialect.as_deref())?;

    if verbose {
        eprintln!("{} {}", "Reading input from:".cyan(), args.input.display());
    }

    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Input file '{}' not found", args.input.display()))?;

    let extractor = match &args.phrases_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read phrases file {}", path.display()))?;
            InlinePhrases::from_json(&json)?
        }
        None => InlinePhrases::new(),
    };

    let generator = ContextGenerator::new(dialect, &extractor);

    let set = match kind {
        BatchKind::Templates => generator.templates_from_json(&input).await?,
        BatchKind::Facets => generator.facets_from_json(&input).await?,
        BatchKind::Goldens => generator.convert_goldens_json(&input).await?,
    };

    if verbose {
        eprintln!("{} {} entries ({:?}, {})", "Generated".green(), set.len(), kind, dialect);
    }

    emit(config, set, &args.output, verbose)
}

/// Value search command - resolve and fill a match template
fn value_search_command(
    config: &Config,
    request: &ValueSearchRequest,
    output: &OutputArgs,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!(
            "{} {} for {}.{}",
            "Resolving".cyan(),
            request.match_function,
            request.table,
            request.column
        );
    }

    let set = ctxgen_engine::generate_value_search(request)?;
    emit(config, set, output, verbose)
}

/// List functions command
fn list_functions_command(engine: &str, version: Option<&str>) -> Result<()> {
    let resolver = TemplateResolver::builtin();
    let functions = resolver.list_functions(engine, version)?;

    println!("{}", format!("Match functions for {}:", engine).bold());
    for name in functions {
        let description = resolver
            .resolve(engine, name, version)
            .map(|record| record.description.as_str())
            .unwrap_or_default();
        println!("  {} {}", name.green(), description);
    }

    Ok(())
}

/// Print, save or attach a generated context set
fn emit(config: &Config, set: ContextSet, output: &OutputArgs, verbose: bool) -> Result<()> {
    let target = match (&output.output, output.attach) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => config.output.as_ref().map(|p| config.resolve_path(p)),
        (None, false) => None,
    };

    match target {
        Some(path) if output.attach => {
            let combined = set.attach_to_file(&path)?;
            if verbose {
                eprintln!(
                    "{} {} ({} entries total)",
                    "Attached to:".green(),
                    path.display(),
                    combined.len()
                );
            }
        }
        Some(path) => {
            set.save_to_file(&path)?;
            if verbose {
                eprintln!("{} {}", "Context set saved to:".green(), path.display());
            }
        }
        None if output.attach => {
            anyhow::bail!("--attach needs --output or an `output` path in {}", Config::FILE_NAME);
        }
        None => println!("{}", set.to_json()?),
    }

    Ok(())
}
