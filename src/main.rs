// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use nmt_worker::app_config::{self, Config};
use nmt_worker::engines::http::{HttpEngine, HttpQualityEstimator};
use nmt_worker::engines::{QualityEstimator, TranslationEngine};
use nmt_worker::response::{Response, MIMETYPE_TEXT};
use nmt_worker::{AppError, TranslationWorker};

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
    /// Process newline-delimited JSON requests (default command)
    Process(ProcessArgs),

    /// Generate shell completions for nmt-worker
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// File with one JSON request body per line; reads stdin when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", env = "NMT_WORKER_CONFIG")]
    config_path: String,

    /// Routing key attached to every request, for log correlation
    #[arg(short, long)]
    routing_key: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// nmt-worker - translation request pipeline
///
/// Validates translation requests, splits text into sentences, sends them to a
/// translation engine and rebuilds the response in the shape of the request.
#[derive(Parser, Debug)]
#[command(name = "nmt-worker")]
#[command(version = "1.0.0")]
#[command(about = "Translation request pipeline for an NMT model server")]
#[command(long_about = "nmt-worker reads JSON translation requests, translates them with a model server and writes JSON responses.

EXAMPLES:
    nmt-worker requests.jsonl                  # Process requests from a file
    cat requests.jsonl | nmt-worker process    # Process requests from stdin
    nmt-worker process -c prod.json in.jsonl   # Use a specific config file
    nmt-worker completions bash > nmt.bash     # Generate bash completions

REQUEST FORMAT:
    {\"text\": \"Hello world. Bye!\", \"src\": \"en\", \"tgt\": \"et\", \"domain\": \"general\"}

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: ProcessArgs,
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

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // The logger accepts everything; the effective level is set via max_level
    CustomLogger::init(LevelFilter::Trace)
        .map_err(|e| AppError::Unknown(format!("Failed to initialize logger: {}", e)))?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "nmt-worker", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => Ok(run_process(args).await?),
        None => Ok(run_process(cli.process).await?),
    }
}

async fn run_process(options: ProcessArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&level).into());
    }

    let mut config = Config::load_or_create(Path::new(&options.config_path))?;
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;
    log::set_max_level((&config.log_level).into());

    // Model handles are created once and shared by every request
    let engine: Arc<dyn TranslationEngine> = Arc::new(HttpEngine::new(&config.engine));
    let qe_model: Option<Arc<dyn QualityEstimator>> = config.qe.as_ref()
        .map(|qe| Arc::new(HttpQualityEstimator::new(qe)) as Arc<dyn QualityEstimator>);
    let worker = TranslationWorker::from_config(&config, engine, qe_model)?;

    info!(
        "All models loaded: service '{}', engine {}, QE {}",
        config.service_name,
        config.engine.endpoint,
        if worker.has_quality_estimator() { "enabled" } else { "disabled" }
    );

    let routing_key = options.routing_key.clone().unwrap_or_else(|| config.routing_key.clone());

    match &options.input_path {
        Some(path) => {
            let file = tokio::fs::File::open(path).await
                .context(format!("Failed to open input file: {:?}", path))?;
            process_lines(&worker, BufReader::new(file), &routing_key).await
        }
        None => process_lines(&worker, BufReader::new(tokio::io::stdin()), &routing_key).await,
    }
}

async fn process_lines<R>(worker: &TranslationWorker, reader: R, routing_key: &str) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut processed_count = 0;
    let mut stdout = std::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(body) => match worker.process_request(&body, Some(routing_key)).await {
                Ok(response) => response,
                Err(e) => {
                    error!("Request failed: {}", e);
                    text_response(e.to_string(), 500)
                }
            },
            Err(e) => {
                error!("Failed to parse request body: {}", e);
                text_response(format!("Invalid JSON: {}", e), 400)
            }
        };

        let encoded = serde_json::to_string(&response)
            .context("Failed to serialize response")?;
        writeln!(stdout, "{}", encoded)?;
        processed_count += 1;
    }

    stdout.flush()?;
    info!("Finished processing {} requests", processed_count);
    Ok(())
}

fn text_response(message: String, http_status_code: u16) -> Response {
    Response {
        content: Value::String(message),
        mimetype: MIMETYPE_TEXT.to_string(),
        http_status_code,
    }
}
