use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use pattern_display::config::{AppConfig, Catalog};
use pattern_display::core::SourceContext;
use pattern_display::display::parse_context_pair;
use pattern_display::types::PatternDisplaySettings;
use pattern_display::{load_settings, PatternDisplay};
use std::path::PathBuf;
use std::process::ExitCode;

/// pattern-display - Map source fields onto display pattern slots
#[derive(Parser, Debug)]
#[command(name = "pattern-display")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Catalog of patterns and source fields (overrides the config)
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0", global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the mapping form as JSON
    Form {
        /// Source tag (e.g., entity_display)
        #[arg(short = 't', long = "tag")]
        tag: String,

        /// Context value offered to the source registry (repeatable)
        #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
        context: Vec<(String, String)>,

        /// Current settings used for default values
        #[arg(long = "current", value_name = "FILE")]
        current: Option<PathBuf>,
    },
    /// Normalize submitted form values and print the configuration
    Normalize {
        /// Submitted settings JSON
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the source tags known to the catalog
    Tags,
    /// Write the effective configuration to the config file
    SaveConfig,
    /// Print the destination slot of a source field
    Lookup {
        /// Normalized settings JSON
        #[arg(value_name = "FILE")]
        file: PathBuf,
        plugin: String,
        source: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Level 0 (default): warn only; RUST_LOG overrides the flag
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    let catalog = match cli.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => Catalog::load_from_path(path)?,
        None => {
            info!("No catalog configured, using built-in catalog");
            Catalog::builtin()
        }
    };

    let display = PatternDisplay::new(
        Box::new(catalog.pattern_registry()),
        Box::new(catalog.source_registry()),
        config.format.clone(),
    );

    match cli.command {
        Command::Form {
            tag,
            context,
            current,
        } => {
            let current = match current {
                Some(path) => load_settings(&path)?,
                None => PatternDisplaySettings::default(),
            };
            let context: SourceContext = context.into_iter().collect();
            let form = display.form(&tag, &context, &current);
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        Command::Normalize { file } => {
            let submitted = load_settings(&file)?;
            let normalized = display.normalize(&submitted)?;
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }
        Command::Tags => {
            for tag in catalog.source_registry().list_tags() {
                println!("{}", tag);
            }
        }
        Command::SaveConfig => {
            let written = config.save(cli.config.as_deref())?;
            println!("{}", written.display());
        }
        Command::Lookup {
            file,
            plugin,
            source,
        } => {
            let settings = load_settings(&file)?;
            match display.destination(&plugin, &source, &settings) {
                Some(slot) => println!("{}", slot),
                None => println!("(unmapped)"),
            }
        }
    }
    Ok(())
}
