use analytics::{CalculationRequest, ReturnEngine, TriangleBuilder};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand, ValueEnum};
use configuration::{
    Config, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeSettings,
    default_preferences_path,
};
use core_types::Theme;
use presentation::{
    CalculationReport, NumberFormat, Palette, SummaryView, TriangleView, render_instruments_table,
    render_summary_table, render_triangle_table,
};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;

/// Exit status for input the calculator rejected.
const INVALID_INPUT: u8 = 2;

/// The main entry point for the return triangle calculator.
fn main() -> anyhow::Result<ExitCode> {
    // Load RETURN_TRIANGLE_* variables from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let _log_guard = logging::init_tracing(cli.log_dir.as_deref())?;

    let mut theme = ThemeSettings::init(preference_store(cli.preferences));

    // Execute the appropriate command
    match cli.command {
        Commands::Calculate(args) => {
            let config = configuration::load_config(cli.dataset.as_deref())?;
            handle_calculate(args, &config, theme.theme())
        }
        Commands::Instruments => {
            let config = configuration::load_config(cli.dataset.as_deref())?;
            println!("{}", render_instruments_table(&config.dataset));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Theme(args) => {
            if args.toggle {
                theme.toggle()?;
            } else if let Some(new_theme) = args.set {
                theme.set(new_theme)?;
            }
            println!("{}", theme.theme());
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Annualized and total returns of an instrument over a range of years, plus
/// the triangle of every buy/sell year combination.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML dataset with the yearly returns. Defaults to the bundled dataset.
    #[arg(long, global = true, env = "RETURN_TRIANGLE_DATASET")]
    dataset: Option<PathBuf>,

    /// JSON file holding the user preferences (the theme).
    #[arg(long, global = true, env = "RETURN_TRIANGLE_PREFERENCES")]
    preferences: Option<PathBuf>,

    /// Also write debug logs to a daily file in this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the return over a period and print the return triangle.
    Calculate(CalculateArgs),
    /// List the instruments in the dataset.
    Instruments,
    /// Show, toggle or set the colour theme.
    Theme(ThemeArgs),
}

#[derive(Args)]
struct CalculateArgs {
    /// The instrument identifier (e.g., "msci-world").
    #[arg(long, short)]
    instrument: String,

    /// The buy year.
    #[arg(long, short)]
    start: Option<i32>,

    /// The sell year. Defaults to the current year when the data covers it.
    #[arg(long, short)]
    end: Option<i32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
struct ThemeArgs {
    /// Switch between light and dark.
    #[arg(long, conflicts_with = "set")]
    toggle: bool,

    /// Set the theme explicitly.
    #[arg(long, value_parser = parse_theme)]
    set: Option<Theme>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse().map_err(|e: core_types::CoreError| e.to_string())
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Validates the request, then prints the summary and the triangle.
fn handle_calculate(args: CalculateArgs, config: &Config, theme: Theme) -> anyhow::Result<ExitCode> {
    let request = CalculationRequest::new(args.instrument, args.start, args.end)
        .with_default_end(&config.dataset, chrono::Local::now().year());

    let validated = match request.validate(&config.dataset) {
        Ok(validated) => validated,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(INVALID_INPUT));
        }
    };

    let engine = ReturnEngine::with_initial_investment(config.settings.initial_investment);
    let series = validated.series;
    let result = engine.compute_return(series, validated.start_year, validated.end_year)?;
    let triangle =
        TriangleBuilder::new(&engine).build(series, validated.start_year, validated.end_year)?;

    let format = NumberFormat::new(config.settings.locale, config.settings.currency.clone());
    let palette = Palette::for_theme(theme);
    let summary = SummaryView::new(series.name(), &result, &format);
    let triangle_view = TriangleView::new(&triangle, &palette);

    match args.format {
        OutputFormat::Table => {
            println!("{}", render_summary_table(&summary));
            println!("{}", render_triangle_table(&triangle_view, &palette));
        }
        OutputFormat::Json => {
            let report = CalculationReport {
                summary,
                result,
                triangle: triangle_view,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Opens the preference file, or keeps preferences in memory when no
/// location is known.
fn preference_store(path: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    match path.or_else(default_preferences_path) {
        Some(path) => Box::new(JsonFilePreferenceStore::new(path)),
        None => {
            tracing::warn!("No preference location available; the theme will not be saved.");
            Box::new(MemoryPreferenceStore::new())
        }
    }
}
