use std::path::PathBuf;
use std::sync::Once;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Global initialization guard
static INIT: Once = Once::new();

/// Application component identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    PedalUpdater,
    UpdaterEngine,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::PedalUpdater => "pedal_updater",
            Component::UpdaterEngine => "updater_engine",
        }
    }

    pub fn log_file_name(&self) -> String {
        format!("{}.log", self.as_str().replace('_', "-"))
    }
}

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Component name for log identification
    pub component: Component,
    /// Directory where log files will be stored
    pub log_dir: PathBuf,
    /// Maximum level for the components of this workspace
    pub max_level: Level,
    /// Level for everything else
    pub default_level: Level,
    /// Whether to also log to stderr
    pub log_to_console: bool,
    /// Optional custom env filter string
    pub env_filter: Option<String>,
    /// List of dependency crates to silence
    pub silent_deps: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            component: Component::PedalUpdater,
            log_dir: PathBuf::from(".dev/logs"),
            max_level: Level::INFO,
            default_level: Level::WARN,
            log_to_console: true,
            env_filter: None,
            silent_deps: vec!["hyper_util".into(), "reqwest".into(), "mio".into()],
        }
    }
}

/// Initialize logging for the application. Only the first call has an effect.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut result = Ok(());

    INIT.call_once(|| {
        result = initialize_logging_internal(config);
    });

    result
}

fn initialize_logging_internal(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &config.log_dir,
        config.component.log_file_name(),
    );

    let mut layers = Vec::new();

    // stderr keeps the progress bar on stdout readable
    if config.log_to_console {
        let console_layer = fmt::Layer::new()
            .with_ansi(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact();

        layers.push(console_layer.with_filter(build_filter(&config)?).boxed());
    }

    let file_layer = fmt::Layer::new()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_target(true);
    layers.push(file_layer.with_filter(build_filter(&config)?).boxed());

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(())
}

pub fn build_filter(config: &LogConfig) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    let mut filter = if let Some(filter_str) = &config.env_filter {
        EnvFilter::try_new(filter_str)?
    } else {
        let mut filter = EnvFilter::try_new(config.default_level.to_string())?;
        for component in [Component::PedalUpdater, Component::UpdaterEngine] {
            filter = filter
                .add_directive(format!("{}={}", component.as_str(), config.max_level).parse()?);
        }
        filter
    };

    // Apply silencing for noisy dependencies
    for dep in &config.silent_deps {
        filter = filter.add_directive(format!("{}=error", dep).parse()?);
    }

    Ok(filter)
}

/// Maps a `--console-log-level` argument to a level.
pub fn parse_level(level: &str) -> Option<Level> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}
