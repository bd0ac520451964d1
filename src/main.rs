// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use slidelingo::app_config::{self, Config};
use slidelingo::app_controller::{Controller, JobOutcome};
use slidelingo::language_utils;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a deck or every deck in a directory (default command)
    Translate(TranslateArgs),

    /// List the supported target languages
    Languages,

    /// Generate shell completions for slidelingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct TranslateArgs {
    /// Input deck file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target language name or code (e.g. 'slovenian', 'de')
    #[arg(short = 'l', long)]
    target_language: Option<String>,

    /// Directory for the translated deck (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Do not use the premium provider even when a key is configured
    #[arg(long)]
    no_premium: bool,

    /// DeepL API key
    #[arg(long, env = "DEEPL_API_KEY", hide_env_values = true)]
    deepl_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// slidelingo - presentation text translator
///
/// Translates every text run of a deck (text boxes, tables, groups and
/// speaker notes) while keeping fonts, colors and shape ids intact.
#[derive(Parser, Debug)]
#[command(name = "slidelingo")]
#[command(version)]
#[command(about = "Formatting-preserving presentation translator")]
#[command(long_about = "slidelingo translates the text of presentation decks paragraph by paragraph
and writes the translation back into the original runs, so formatting survives.

EXAMPLES:
    slidelingo talk.deck                        # Translate using default config
    slidelingo -l german talk.deck              # Translate to German
    slidelingo -f talk.deck                     # Overwrite an existing translation
    slidelingo --no-premium talk.deck           # Use only the keyless provider
    slidelingo translate decks/ -l hr           # Translate a whole directory
    slidelingo languages                        # List supported languages
    slidelingo completions bash > slidelingo.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The DeepL key may also be given with
    --deepl-key or the DEEPL_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input deck file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Target language name or code (e.g. 'slovenian', 'de')
    #[arg(short = 'l', long)]
    target_language: Option<String>,

    /// Directory for the translated deck (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Do not use the premium provider even when a key is configured
    #[arg(long)]
    no_premium: bool,

    /// DeepL API key
    #[arg(long, env = "DEEPL_API_KEY", hide_env_values = true)]
    deepl_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "slidelingo", &mut std::io::stdout());
            Ok(())
        },
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        },
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_translate(TranslateArgs {
                input_path,
                target_language: cli.target_language,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                no_premium: cli.no_premium,
                deepl_key: cli.deepl_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        },
    }
}

fn print_languages() {
    println!("{:<12} CODE", "LANGUAGE");
    for (name, code) in language_utils::SUPPORTED_LANGUAGES {
        println!("{:<12} {}", name, code);
    }
}

/// Load the configuration file and apply command line overrides
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)
        .with_context(|| format!("Failed to load config file: {}", options.config_path))?;

    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }

    if let Some(key) = &options.deepl_key {
        config.translation.premium.api_key = key.clone();
    }

    if options.no_premium {
        config.translation.premium.enabled = false;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    if config.translation.premium_api_key().is_none() {
        info!("No premium key configured, using the secondary provider only");
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };

        match controller.run(&options.input_path, &output_dir, options.force_overwrite).await {
            Ok(JobOutcome::Translated(report)) => {
                if report.stats.has_errors() {
                    warn!("{} node(s) could not be translated:", report.stats.errors.len());
                    for message in &report.stats.errors {
                        warn!("  {}", message);
                    }
                }
                Ok(())
            },
            Ok(JobOutcome::Skipped { output }) => {
                info!("Nothing to do, {:?} exists", output);
                Ok(())
            },
            Err(e) => {
                error!("{}", e);
                Err(e.into())
            },
        }
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            warn!("--output-dir is ignored in folder mode; translations are written next to their sources");
        }
        let summary = controller.run_folder(&options.input_path, options.force_overwrite).await?;
        if !summary.failed.is_empty() {
            return Err(anyhow!("{} deck(s) failed to translate", summary.failed.len()));
        }
        Ok(())
    } else {
        Err(anyhow!("Input path does not exist: {:?}", options.input_path))
    }
}
