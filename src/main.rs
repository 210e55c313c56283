//! pwconf CLI
//!
//! Entry point for the `pwconf` command-line tool.

use clap::{Parser, Subcommand};
use pwconf::{generate, ConfigSource, GenerationSummary, GeneratorOptions, NamedDocument, PipelineError, VendorDefaults};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pwconf")]
#[command(about = "Render PipeWire configuration from defaults and overrides", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render and write every configuration file
    Generate {
        /// Path to the options file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Directory with <name>.conf.json vendor defaults (default: built-in)
        #[arg(long)]
        defaults: Option<PathBuf>,

        /// Output root; documents land in <out>/pipewire/
        #[arg(long, short = 'o')]
        out: PathBuf,

        /// Output the generation summary in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print one rendered document to stdout
    Render {
        /// Document to render
        #[arg(value_enum)]
        document: NamedDocument,

        /// Path to the options file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Directory with <name>.conf.json vendor defaults (default: built-in)
        #[arg(long)]
        defaults: Option<PathBuf>,
    },

    /// Validate the options and render everything without writing
    Check {
        /// Path to the options file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Directory with <name>.conf.json vendor defaults (default: built-in)
        #[arg(long)]
        defaults: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            defaults,
            out,
            json,
        } => run_generate(config.as_deref(), defaults.as_deref(), &out, json),
        Commands::Render {
            document,
            config,
            defaults,
        } => run_render(document, config.as_deref(), defaults.as_deref()),
        Commands::Check { config, defaults } => run_check(config.as_deref(), defaults.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Log to stderr, filtered by RUST_LOG (default: info)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Load the options file (or built-in options) and the vendor defaults
fn load_inputs(
    config_path: Option<&Path>,
    defaults_dir: Option<&Path>,
) -> Result<(GeneratorOptions, VendorDefaults, Vec<ConfigSource>), PipelineError> {
    let defaults = match defaults_dir {
        Some(dir) => VendorDefaults::from_dir(dir)?,
        None => VendorDefaults::builtin()?,
    };
    let mut sources = defaults.sources().to_vec();

    let options = match config_path {
        Some(path) => {
            let (options, source) = GeneratorOptions::from_file(path)?;
            sources.push(source);
            options
        }
        None => GeneratorOptions::default(),
    };

    Ok((options, defaults, sources))
}

fn run_generate(
    config_path: Option<&Path>,
    defaults_dir: Option<&Path>,
    out: &Path,
    json: bool,
) -> Result<(), PipelineError> {
    let (options, defaults, sources) = load_inputs(config_path, defaults_dir)?;
    let generation = generate(&options, &defaults)?;
    let written = generation.write_to(out)?;

    let summary = GenerationSummary::new(&generation, sources, written);
    if json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{}", summary.to_human());
    }
    Ok(())
}

fn run_render(
    document: NamedDocument,
    config_path: Option<&Path>,
    defaults_dir: Option<&Path>,
) -> Result<(), PipelineError> {
    let (options, defaults, _) = load_inputs(config_path, defaults_dir)?;
    let generation = generate(&options, &defaults)?;

    match generation.document(document) {
        Some(text) => print!("{}", text),
        None => eprintln!("Generation disabled by options; nothing to render"),
    }
    Ok(())
}

fn run_check(config_path: Option<&Path>, defaults_dir: Option<&Path>) -> Result<(), PipelineError> {
    let (options, defaults, sources) = load_inputs(config_path, defaults_dir)?;
    let generation = generate(&options, &defaults)?;

    let summary = GenerationSummary::new(&generation, sources, Vec::new());
    println!("Configuration valid");
    println!();
    println!("{}", summary.to_human());
    Ok(())
}
