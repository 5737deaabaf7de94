//! Logging initialisation: fmt layer (level, target, thread id, fields) written to stdout and
//! optionally tee'd to a log file.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::{
    filter::Directive, fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// `[logging]` section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Base level: trace, debug, info, warn, error.
    pub level: String,
    /// Extra `EnvFilter` directives, e.g. `"teloxide=warn"`.
    pub directives: Vec<String>,
    /// Log file; created if missing, appended otherwise.
    pub file: Option<PathBuf>,
    pub ansi: bool,
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directives: Vec::new(),
            file: None,
            ansi: true,
            target: true,
        }
    }
}

impl LoggingConfig {
    /// Builds the filter: `RUST_LOG` when set, otherwise `level` plus `directives`.
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| anyhow::anyhow!("Invalid log level {:?}: {}", self.level, e))?;
        for directive in &self.directives {
            let parsed: Directive = directive
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid log directive {:?}: {}", directive, e))?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }
}

/// Installs the global tracing subscriber described by `config`.
/// Load `.env` before calling so `RUST_LOG` from it takes effect.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = config.env_filter()?;

    let registry = Registry::default().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.target)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    let result = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let writer = io::stdout.and(std::sync::Arc::new(file));
            registry
                .with(fmt_layer.with_ansi(false).with_writer(writer))
                .try_init()
        }
        None => registry
            .with(fmt_layer.with_ansi(config.ansi).with_writer(io::stdout))
            .try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

/// Stderr subscriber used before the configuration is available (so config errors get logged).
/// Returns a guard; the subscriber is active only while the guard lives.
pub fn fallback_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}
