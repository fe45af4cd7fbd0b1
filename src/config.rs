use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Runtime settings read from config.toml with environment overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub import: ImportConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub batch_size: usize,
    pub progress_interval: usize,
}

/// Chart and overlay display tuning
///
/// These are product-tuning constants, not laws: the bucket cap and the
/// meaningful-chart minimum only exist to keep rendered charts visually
/// stable, and the top-N limit bounds the country list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Histogram bars are merged down until at most this many remain
    pub max_buckets: usize,
    /// Histograms with fewer final buckets are reported as not chartable
    pub min_buckets: usize,
    /// Country tally length limit
    pub top_countries: usize,
    /// Archive-delay notes are suppressed inside this window
    pub archive_delay_warning_seconds: i64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_buckets: 12,
            min_buckets: 3,
            top_countries: 6,
            archive_delay_warning_seconds: 86_400,
        }
    }
}

impl AppConfig {
    /// Read settings in ascending priority: built-in defaults, then
    /// config.toml, then SHORTLINK_* environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let chart_defaults = ChartConfig::default();
        let config = Config::builder()
            // Baked-in defaults sit at the bottom of the stack
            .set_default("database.default_path", "./output_data/shortlinks.db")?
            .set_default("import.batch_size", 5000)?
            .set_default("import.progress_interval", 50000)?
            // Chart defaults
            .set_default("chart.max_buckets", chart_defaults.max_buckets as i64)?
            .set_default("chart.min_buckets", chart_defaults.min_buckets as i64)?
            .set_default("chart.top_countries", chart_defaults.top_countries as i64)?
            .set_default(
                "chart.archive_delay_warning_seconds",
                chart_defaults.archive_delay_warning_seconds,
            )?
            // config.toml is optional
            .add_source(File::with_name("config").required(false))
            // SHORTLINK_* env variables can override any section
            .add_source(config::Environment::with_prefix("SHORTLINK"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // SHORTLINK_DATABASE_PATH maps straight onto database.default_path
        if let Ok(db_path) = env::var("SHORTLINK_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        // Validate the tuning values hang together
        if app_config.import.batch_size == 0 {
            return Err(ConfigError::Message(
                "import.batch_size must be greater than 0".to_string(),
            ));
        }
        if app_config.chart.min_buckets == 0 {
            return Err(ConfigError::Message(
                "chart.min_buckets must be greater than 0".to_string(),
            ));
        }
        if app_config.chart.max_buckets < app_config.chart.min_buckets {
            return Err(ConfigError::Message(format!(
                "chart.max_buckets ({}) must not be below chart.min_buckets ({})",
                app_config.chart.max_buckets, app_config.chart.min_buckets
            )));
        }
        if app_config.chart.top_countries == 0 {
            return Err(ConfigError::Message(
                "chart.top_countries must be greater than 0".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Defaults for CLI flags, tolerant of a missing config file
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => {
                // Hard-coded fallbacks mirror the set_default values above
                Ok(Self {
                    database: DatabaseConfig {
                        default_path: PathBuf::from("./output_data/shortlinks.db"),
                    },
                    import: ImportConfig {
                        batch_size: 5000,
                        progress_interval: 50000,
                    },
                    chart: ChartConfig::default(),
                })
            }
        }
    }
}
