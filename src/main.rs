// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use texproof::app_config::{self, Config, CorrectionProvider};
use texproof::file_utils;
use texproof::proofreading::{CorrectorRegistry, Proofreader};
use texproof::server::{self, AppState};

/// CLI Wrapper for CorrectionProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Ollama,
    Mock,
}

impl From<CliProvider> for CorrectionProvider {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::OpenRouter => CorrectionProvider::OpenRouter,
            CliProvider::OpenAI => CorrectionProvider::OpenAI,
            CliProvider::Anthropic => CorrectionProvider::Anthropic,
            CliProvider::Ollama => CorrectionProvider::Ollama,
            CliProvider::Mock => CorrectionProvider::Mock,
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

/// Options shared by every command that loads the configuration
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Correction provider (default provider for `serve`, the one used by `check`)
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Model name for the selected provider
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the selected provider
    #[arg(long, env = "TEXPROOF_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    /// Address to listen on, e.g. 127.0.0.1:8000
    #[arg(long)]
    listen: Option<String>,

    /// Directory holding index.html and the static assets
    #[arg(long)]
    static_dir: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct CheckArgs {
    /// LaTeX file to proofread
    #[arg(value_name = "INPUT_FILE")]
    input_path: PathBuf,

    /// Write the corrected document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the proofreading web server (default command)
    Serve(ServeArgs),

    /// Proofread a single file without starting the server
    Check(CheckArgs),

    /// Generate shell completions for texproof
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// texproof - LaTeX-aware paragraph proofreading with LLMs
#[derive(Parser, Debug)]
#[command(name = "texproof")]
#[command(version)]
#[command(about = "AI-powered proofreading for LaTeX documents")]
#[command(long_about = "texproof corrects the prose paragraphs of a LaTeX document with an LLM,
leaving figure and table environments and short blocks untouched.

EXAMPLES:
    texproof                                   # Serve the web UI on 0.0.0.0:8000
    texproof serve --listen 127.0.0.1:9000     # Serve on another address
    texproof check paper.tex -p mock           # Dry run without a model
    texproof check paper.tex -o fixed.tex      # Proofread with the default provider
    texproof completions bash > texproof.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The API key can also come from TEXPROOF_API_KEY.

SUPPORTED PROVIDERS:
    openrouter - OpenRouter (default, requires API key)
    openai     - OpenAI API (requires API key)
    anthropic  - Anthropic API (requires API key)
    ollama     - Local Ollama server
    mock       - Offline, returns paragraphs unchanged")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set with log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "texproof", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Serve(args)) => run_serve(args).await,
        Some(Commands::Check(args)) => run_check(args).await,
        None => run_serve(cli.serve).await,
    }
}

/// Load the config file and apply command line overrides
fn load_config(options: &CommonArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.correction.provider = provider.clone().into();
    }

    let provider = config.correction.provider;
    if let Some(model) = &options.model {
        config.correction.provider_config_mut(provider).model = model.clone();
    }
    if let Some(api_key) = &options.api_key {
        config.correction.provider_config_mut(provider).api_key = api_key.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;
    if let Some(listen) = args.listen {
        config.server.listen_addr = listen;
    }
    if let Some(static_dir) = args.static_dir {
        config.server.static_dir = static_dir;
    }

    let addr = config.listen_addr()?;
    let registry = CorrectorRegistry::from_config(&config.correction);
    info!("Default correction provider: {}", registry.default_provider());

    let state = Arc::new(AppState::new(registry));
    let router = server::build_router(state, Path::new(&config.server.static_dir));

    server::serve(addr, router).await?;
    Ok(())
}

async fn run_check(args: CheckArgs) -> Result<()> {
    let config = load_config(&args.common)?;

    let registry = CorrectorRegistry::from_config(&config.correction);
    let corrector = registry.resolve(&config.correction.provider.to_string())?;

    info!("Proofreading {:?} with {}", args.input_path, config.correction.provider.display_name());
    let proofreader = Proofreader::new(corrector);
    let outcome = file_utils::check_file(&proofreader, &args.input_path, args.output.as_deref()).await?;

    if args.output.is_none() {
        let mut stdout = std::io::stdout();
        stdout.write_all(outcome.final_text.as_bytes())?;
        stdout.flush()?;
    }

    info!("Total word changes: {}", outcome.total_changes);
    Ok(())
}
