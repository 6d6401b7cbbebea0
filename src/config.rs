use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::data::aggregate::DEFAULT_TOP_PRODUCTS;
use crate::error::ConfigError;

/// Env var naming an explicit settings file.
pub const CONFIG_ENV: &str = "SALES_DASHBOARD_CONFIG";
/// Env var overriding the dataset path.
pub const DATA_ENV: &str = "SALES_DASHBOARD_DATA";
/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(author, version, about = "Desktop sales analytics dashboard")]
pub struct CliArgs {
    /// Dataset to open (.csv, .txt, .json, .parquet or .pq)
    pub data_path: Option<PathBuf>,

    /// JSON settings file; takes precedence over SALES_DASHBOARD_CONFIG
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so an empty `{}` is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Dataset opened at startup.
    pub data_path: PathBuf,
    /// Length of the top products chart.
    pub top_products_limit: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("cleaned_data_sales.csv"),
            top_products_limit: DEFAULT_TOP_PRODUCTS,
            window_width: 1280.0,
            window_height: 860.0,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.top_products_limit == 0 {
            return Err(ConfigError::ZeroTopProducts);
        }
        Ok(())
    }

    /// Layer the sources: defaults, then the settings file, then the data env
    /// var, then the dataset given on the command line.
    pub fn resolve(
        config_file: Option<&Path>,
        data_env: Option<String>,
        cli_data: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_env.filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(path) = cli_data {
            config.data_path = path;
        }
        Ok(config)
    }

    /// Resolve from the process environment and the parsed arguments.
    pub fn from_env(cli: CliArgs) -> Result<Self, ConfigError> {
        let config_file = cli
            .config
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            });
        let config = Self::resolve(
            config_file.as_deref(),
            std::env::var(DATA_ENV).ok(),
            cli.data_path,
        )?;
        log::debug!("resolved config: {config:?}");
        Ok(config)
    }
}
