use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::core_service::{CoreService, ServiceError};
use crate::logging;
use crate::transport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub once: bool,
}

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--once" => options.once = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

/// Starts the service and serves the JSON contract line-by-line over
/// stdin/stdout for the host launcher. With `--once`, runs a single refresh
/// cycle and exits.
pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
        println!(
            "[deckmark-core] wrote default config to {}",
            config.config_path.display()
        );
    }
    if let Err(error) = logging::init() {
        eprintln!("[deckmark-core] logging unavailable: {error}");
    }
    println!(
        "[deckmark-core] startup instance_url={} refresh_minutes={} page_limit={} config_path={}",
        config.instance_url,
        config.cache_length_minutes,
        config.page_limit,
        config.config_path.display(),
    );

    let mut service = CoreService::new(config)?;

    if options.once {
        let indexed = service.refresh_now();
        println!("[deckmark-core] indexed_items={indexed}");
        return Ok(());
    }

    service.start();
    serve_stdio(&service)
}

fn serve_stdio(service: &CoreService) -> Result<(), RuntimeError> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.map_err(RuntimeError::Io)?;
        if line.trim().is_empty() {
            continue;
        }
        let response = transport::handle_json(service, &line);
        let mut out = stdout.lock();
        writeln!(out, "{response}").map_err(RuntimeError::Io)?;
        out.flush().map_err(RuntimeError::Io)?;
    }

    Ok(())
}
