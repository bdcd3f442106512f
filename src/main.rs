//! smile-audit: online presence audit for dental practices

use anyhow::{Context, Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use smile_audit::{
    cli,
    config::{self, AppConfig, ConfigPreset},
    model::ContactForm,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "smile-audit")]
#[command(version)]
#[command(about = "Online presence audit and Smile Score for dental practices", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Audit completed
    1  Smile Score below --min-score
    2  Invalid form input or configuration
    3  Error occurred

EXAMPLES:
    # Audit a practice and write an HTML report
    smile-audit audit --website brightsmiles.example --email front@brightsmiles.example \\
        --phone \"555 010 2030\" --practice-name \"Bright Smiles\" \\
        --address \"12 Main St, Springfield\" -o report.html

    # Suggest form values from a website
    smile-audit prefill brightsmiles.example

    # Score known signals without any lookups
    smile-audit score --rating 4.6 --reviews 180 --booking online")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// API keys, taken from the environment unless given explicitly.
#[derive(Args)]
struct KeyArgs {
    /// Google Places API key
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    places_api_key: Option<String>,

    /// Google Custom Search API key
    #[arg(long, env = "GOOGLE_CSE_API_KEY", hide_env_values = true)]
    search_api_key: Option<String>,

    /// Google Custom Search engine id
    #[arg(long, env = "GOOGLE_CSE_CX")]
    search_engine_id: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,
}

/// Arguments for the `audit` subcommand
#[derive(Args)]
struct AuditArgs {
    /// Practice website
    #[arg(long)]
    website: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Practice name
    #[arg(long)]
    practice_name: String,

    /// Practice address
    #[arg(long)]
    address: String,

    /// Doctor name
    #[arg(long)]
    doctor_name: Option<String>,

    /// Google Maps link for the practice
    #[arg(long)]
    maps_link: Option<String>,

    /// Report format (default: from the output extension, else html)
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit with code 1 when the Smile Score is below this
    #[arg(long)]
    min_score: Option<f64>,

    /// Submission log file
    #[arg(long)]
    submission_log: Option<PathBuf>,

    /// Do not append to the submission log
    #[arg(long, conflicts_with = "submission_log")]
    no_submission_log: bool,

    /// Skip all LLM calls (keyword themes, rule-based advice)
    #[arg(long)]
    no_ai: bool,

    /// Audit preset (standard, rules-only, thorough)
    #[arg(long)]
    preset: Option<String>,

    /// Time budget in seconds
    #[arg(long)]
    time_budget: Option<u64>,

    #[command(flatten)]
    keys: KeyArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a practice's online presence and report its Smile Score
    Audit(AuditArgs),

    /// Suggest practice name, address and maps link from a website
    Prefill {
        /// Practice website
        website: String,

        /// Print JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Compute a Smile Score from known signals, without any lookups
    Score(cli::ScoreArgs),

    /// Show or generate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (keys masked)
    Show,
    /// Print the JSON Schema of the config file
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print an example config file
    Example,
    /// List available presets
    Presets,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Audit(args) => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_audit_args(&mut config, &args)?;
            let form = ContactForm {
                website: args.website,
                email: args.email,
                phone: args.phone,
                practice_name: args.practice_name,
                address: args.address,
                doctor_name: args.doctor_name,
                maps_link: args.maps_link,
            };
            cli::run_audit(form, &config, cli.quiet)
        }

        Commands::Prefill {
            website,
            json,
            keys,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_keys(&mut config, &keys);
            let sources = cli::build_sources(&config)?;
            cli::run_prefill(&website, &config, sources, json)
        }

        Commands::Score(args) => cli::run_score(&args),

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml_ng::to_string(&config.redacted())
                    .context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => {
                let schema =
                    config::generate_json_schema().context("failed to generate schema")?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Example => {
                print!("{}", config::generate_example_config());
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Presets => {
                for preset in ConfigPreset::all() {
                    println!("{:<12} {}", preset.name(), preset.description());
                }
                Ok(exit_codes::SUCCESS)
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "smile-audit", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let config = config::load_config_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }
    let (config, loaded_from) = config::load_or_default(None);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    Ok(config)
}

fn apply_keys(config: &mut AppConfig, keys: &KeyArgs) {
    config.sources.override_keys(
        keys.places_api_key.clone(),
        keys.search_api_key.clone(),
        keys.search_engine_id.clone(),
        keys.anthropic_api_key.clone(),
    );
}

/// CLI flags override the config file.
fn apply_audit_args(config: &mut AppConfig, args: &AuditArgs) -> Result<()> {
    if let Some(name) = &args.preset {
        let Some(preset) = ConfigPreset::from_name(name) else {
            bail!("Unknown preset: {name}. Valid options: standard, rules-only, thorough");
        };
        config.apply_preset(preset);
    }
    if args.no_ai {
        config.apply_preset(ConfigPreset::RulesOnly);
    }
    if let Some(secs) = args.time_budget {
        config.audit.time_budget_secs = secs;
    }
    if args.min_score.is_some() {
        config.audit.min_score = args.min_score;
    }
    if args.format.is_some() {
        config.output.format = args.format;
    }
    if args.output.is_some() {
        config.output.file.clone_from(&args.output);
    }
    if let Some(path) = &args.submission_log {
        config.submissions.enabled = true;
        config.submissions.path.clone_from(path);
    }
    if args.no_submission_log {
        config.submissions.enabled = false;
    }
    apply_keys(config, &args.keys);
    Ok(())
}
