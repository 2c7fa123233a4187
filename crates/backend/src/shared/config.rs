use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory relative data paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub orders_dir: String,
    #[serde(default = "default_orders_pattern")]
    pub orders_pattern: String,
    pub returns_path: String,
    pub people_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Rows of the filtered table printed by the console presenter.
    #[serde(default = "default_table_limit")]
    pub table_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Used when RUST_LOG is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_orders_pattern() -> String {
    "*.csv".to_string()
}

fn default_top_n() -> usize {
    5
}

fn default_table_limit() -> usize {
    20
}

fn default_log_dir() -> String {
    "target/logs".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            table_limit: default_table_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            filter: default_log_filter(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data]
orders_dir = "data/Orders"
orders_pattern = "*.csv"
returns_path = "data/Returns.csv"
people_path = "data/People.csv"

[dashboard]
top_n = 5
table_limit = 20

[logging]
dir = "target/logs"
filter = "info"
"#;

/// Parse configuration text; relative paths will resolve against `base_dir`.
pub fn parse_config(contents: &str, base_dir: &Path) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.base_dir = base_dir.to_path_buf();
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. Explicit path (first CLI argument)
/// 2. config.toml next to the executable
/// 3. config.toml in the working directory
/// 4. Embedded default config
///
/// Logging is not initialised yet when this runs, so the chosen source is
/// returned alongside the config for the caller to log.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, String)> {
    if let Some(path) = explicit {
        let config = read_config_file(path)?;
        return Ok((config, path.display().to_string()));
    }

    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    for config_path in candidates {
        if config_path.exists() {
            let config = read_config_file(&config_path)?;
            return Ok((config, config_path.display().to_string()));
        }
    }

    let config = parse_config(DEFAULT_CONFIG, Path::new("."))?;
    Ok((config, "embedded default".to_string()))
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    use anyhow::Context;

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parse_config(&contents, base_dir)
        .with_context(|| format!("invalid config {}", path.display()))
}

impl Config {
    /// Resolve a configured path: absolute paths are used as is,
    /// relative ones are joined to the config directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }

    pub fn orders_dir(&self) -> PathBuf {
        self.resolve(&self.data.orders_dir)
    }

    pub fn returns_path(&self) -> PathBuf {
        self.resolve(&self.data.returns_path)
    }

    pub fn people_path(&self) -> PathBuf {
        self.resolve(&self.data.people_path)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.dir)
    }
}
