use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::analysis::{AnalysisEngine, OutputFormat, ReportFormatter};

// ===== Shared plumbing =====

/// Resolve the store path from the CLI flag, falling back to config
fn get_db_path_from_config(
    cli_path: &Option<PathBuf>,
    app_config: &Option<AppConfig>,
) -> AppResult<String> {
    if let Some(path) = cli_path {
        Ok(path.to_string_lossy().to_string())
    } else if let Some(config) = app_config {
        Ok(config.database.default_path.to_string_lossy().to_string())
    } else {
        Err(AppError::Config(
            "No database path given. Pass --database-path or set database.default_path in config.toml".to_string()
        ))
    }
}

/// Map the --format string onto an output format, console by default
fn parse_format(format_str: &str) -> OutputFormat {
    match format_str.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        "plotly" => OutputFormat::Plotly,
        _ => OutputFormat::Console,
    }
}

/// Write rendered output, creating parent directories on the way
fn write_output_to_file(path: &PathBuf, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} saved to {}", description, path.display());
    Ok(())
}

/// Drive an analysis that only prints (no file output flag)
fn run_simple_analysis<T, F, G>(
    database_path: &Option<PathBuf>,
    format: &str,
    app_config: &Option<AppConfig>,
    analyse_fn: F,
    format_fn: G,
) -> AppResult<()>
where
    F: FnOnce(&AnalysisEngine) -> AppResult<T>,
    G: FnOnce(&T, &OutputFormat) -> AppResult<String>,
{
    let db_path = get_db_path_from_config(database_path, app_config)?;
    let engine = AnalysisEngine::new(&db_path)?;
    let analysis = analyse_fn(&engine)?;
    let output = format_fn(&analysis, &parse_format(format))?;
    print!("{}", output);
    Ok(())
}

/// Drive an analysis whose output can land in a file
#[allow(clippy::too_many_arguments)]
fn run_analysis_with_file_output<T, F, G>(
    database_path: &Option<PathBuf>,
    format: &str,
    output_path: &Option<PathBuf>,
    default_filename: &str,
    description: &str,
    app_config: &Option<AppConfig>,
    analyse_fn: F,
    format_fn: G,
) -> AppResult<()>
where
    F: FnOnce(&AnalysisEngine) -> AppResult<T>,
    G: FnOnce(&T, &OutputFormat) -> AppResult<String>,
{
    let db_path = get_db_path_from_config(database_path, app_config)?;
    let engine = AnalysisEngine::new(&db_path)?;
    let analysis = analyse_fn(&engine)?;
    let parsed_format = parse_format(format);
    let formatted_output = format_fn(&analysis, &parsed_format)?;

    if let Some(path) = output_path {
        write_output_to_file(path, &formatted_output, description)?;
    } else if matches!(parsed_format, OutputFormat::Json | OutputFormat::Plotly) {
        let default_path = PathBuf::from(format!("./output_data/plots/{}", default_filename));
        write_output_to_file(&default_path, &formatted_output, description)?;
    } else {
        print!("{}", formatted_output);
    }
    Ok(())
}

// ===== Commands =====

/// Analysis commands for visit reports
#[derive(Args)]
pub struct AnalyseCommand {
    #[command(subcommand)]
    pub analysis_type: AnalysisCommands,
}

impl AnalyseCommand {
    pub fn run(&self) -> AppResult<()> {
        run_analysis(&self.analysis_type)
    }
}

/// Standalone store statistics command
#[derive(Args)]
pub struct StatsCommand {
    /// Visit store to read (overrides config.toml)
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Output format: console or json
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl StatsCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::load().ok();
        run_simple_analysis(
            &self.database_path,
            &self.format,
            &app_config,
            |e| e.database().get_database_stats(),
            ReportFormatter::format_database_stats,
        )
    }
}

/// The individual analyses exposed under `analyse`
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Analyse visit activity for one shortlink
    ///
    /// Produces the time-bucketed histogram. Bucket width adapts to the
    /// age of the oldest visit (hours for fresh links up to years for
    /// ancient ones) and quiet periods appear as zero buckets.
    Activity {
        /// Link identifier
        short_code: String,

        /// Visit store to read (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Output format: console, json or plotly
        #[arg(long, default_value = "console")]
        format: String,

        /// Write the output to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Analyse the country distribution for one shortlink
    ///
    /// Ranks countries by visit count; visits without a country code are
    /// reported as a coverage figure, never as a pseudo-country.
    Countries {
        /// Link identifier
        short_code: String,

        /// Visit store to read (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Output format: console, json or plotly
        #[arg(long, default_value = "console")]
        format: String,

        /// Write the output to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate the combined report for one shortlink
    ///
    /// Joins stored link metadata with the activity histogram and the
    /// country breakdown in one output.
    Link {
        /// Link identifier
        short_code: String,

        /// Visit store to read (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Output format: console, json or plotly
        #[arg(long, default_value = "console")]
        format: String,
    },

    /// Rank links by total recorded visits
    Top {
        /// Maximum ranking rows
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Visit store to read (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Output format: console, json or plotly
        #[arg(long, default_value = "console")]
        format: String,

        /// Write the output to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Generate full store report (all analyses combined)
    Full {
        /// Visit store to read (overrides config.toml)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Output format: console, json or plotly
        #[arg(long, default_value = "console")]
        format: String,

        /// Write the output to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

pub fn run_analysis(analysis_type: &AnalysisCommands) -> AppResult<()> {
    // config.toml supplies the default store path when no flag is given
    let app_config = AppConfig::load().ok();

    // One reference instant for the whole invocation keeps multi-part
    // reports internally consistent
    let now = Utc::now();

    match analysis_type {
        AnalysisCommands::Activity {
            short_code,
            database_path,
            format,
            output,
        } => run_analysis_with_file_output(
            database_path,
            format,
            output,
            &format!("activity_{}.json", short_code),
            "Visit activity analysis",
            &app_config,
            |e| e.analyse_activity(short_code, now),
            ReportFormatter::format_visit_activity,
        ),

        AnalysisCommands::Countries {
            short_code,
            database_path,
            format,
            output,
        } => run_analysis_with_file_output(
            database_path,
            format,
            output,
            &format!("countries_{}.json", short_code),
            "Country breakdown",
            &app_config,
            |e| e.analyse_countries(short_code),
            ReportFormatter::format_country_breakdown,
        ),

        AnalysisCommands::Link {
            short_code,
            database_path,
            format,
        } => run_simple_analysis(
            database_path,
            format,
            &app_config,
            |e| e.analyse_link(short_code, now),
            ReportFormatter::format_link_report,
        ),

        AnalysisCommands::Top {
            limit,
            database_path,
            format,
            output,
        } => run_analysis_with_file_output(
            database_path,
            format,
            output,
            "top_links.json",
            "Top links ranking",
            &app_config,
            |e| e.analyse_top_links(*limit, now),
            ReportFormatter::format_top_links,
        ),

        AnalysisCommands::Full {
            database_path,
            format,
            output,
        } => run_analysis_with_file_output(
            database_path,
            format,
            output,
            "full_report.json",
            "Full store report",
            &app_config,
            |e| e.generate_full_report(now),
            ReportFormatter::format_full_report,
        ),
    }
}
