// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};

use crate::app_config::Config;
use app_controller::Controller;

mod analysis;
mod app_config;
mod app_controller;
mod errors;
mod fetcher;
mod knowledge;
mod markup;
mod providers;

/// CLI Wrapper for ContextDepth to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliContextDepth {
    Minimal,
    Medium,
    Large,
}

impl From<CliContextDepth> for analysis::ContextDepth {
    fn from(cli_depth: CliContextDepth) -> Self {
        match cli_depth {
            CliContextDepth::Minimal => analysis::ContextDepth::Minimal,
            CliContextDepth::Medium => analysis::ContextDepth::Medium,
            CliContextDepth::Large => analysis::ContextDepth::Large,
        }
    }
}

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
    /// Analyze a talk-page discussion for policy references (default command)
    #[command(alias = "analyze")]
    Analyze(AnalyzeArgs),

    /// Generate shell completions for talkref
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Talk-page URL, optionally with a #Section_anchor fragment
    #[arg(value_name = "URL")]
    url: String,

    /// Emit the report as JSON instead of plain text
    #[arg(short, long)]
    json: bool,

    /// Context window depth around each mention
    #[arg(short = 'd', long, value_enum)]
    context_depth: Option<CliContextDepth>,

    /// Also run the generative-model analysis path
    #[arg(long)]
    with_model: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// talkref - Wikipedia talk page reference analyzer
///
/// Fetches a talk-page discussion, isolates the linked section, and reports
/// which Wikipedia policies, guidelines, and essays it explicitly references,
/// with context snippets for every mention.
#[derive(Parser, Debug)]
#[command(name = "talkref")]
#[command(version = "1.0.0")]
#[command(about = "Wikipedia talk page reference analyzer")]
#[command(long_about = "talkref fetches a Wikipedia talk-page discussion and reports which
policies, guidelines, and essays it explicitly references.

EXAMPLES:
    talkref 'https://en.wikipedia.org/wiki/Talk:Example#Requested_move'
    talkref --json 'https://en.wikipedia.org/wiki/Talk:Example'
    talkref -d large 'https://en.wikipedia.org/wiki/Talk:Example#RfC'
    talkref --with-model 'https://en.wikipedia.org/wiki/Talk:Example'
    talkref completions bash > talkref.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Talk-page URL, optionally with a #Section_anchor fragment
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Emit the report as JSON instead of plain text
    #[arg(short, long)]
    json: bool,

    /// Context window depth around each mention
    #[arg(short = 'd', long, value_enum)]
    context_depth: Option<CliContextDepth>,

    /// Also run the generative-model analysis path
    #[arg(long)]
    with_model: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "talkref", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Analyze(args)) => run_analyze(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let url = cli
                .url
                .ok_or_else(|| anyhow!("URL is required when no subcommand is specified"))?;

            let analyze_args = AnalyzeArgs {
                url,
                json: cli.json,
                context_depth: cli.context_depth,
                with_model: cli.with_model,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_analyze(analyze_args).await
        }
    }
}

async fn run_analyze(options: AnalyzeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config
            .write_to_file(config_path)
            .context(format!("Failed to write default config to: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(depth) = &options.context_depth {
        config.analysis.context_depth = depth.clone().into();
    }
    if options.with_model {
        config.llm.enabled = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller and run the analysis
    let controller = Controller::with_config(config)?;
    let output = controller.run(&options.url, options.json).await?;
    println!("{}", output);

    Ok(())
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
