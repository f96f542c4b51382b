use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod preferences;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use preferences::{
    JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, THEME_KEY, ThemeSettings,
    default_preferences_path,
};
pub use settings::{AppSettings, Config, DatasetFile, InstrumentEntry};

/// Prefix of the environment variables that override `[calculator]` keys,
/// e.g. `RETURN_TRIANGLE__CALCULATOR__LOCALE=en-US`.
pub const ENV_PREFIX: &str = "RETURN_TRIANGLE";

/// The dataset compiled into the binary, used when no file is given.
pub const BUNDLED_DATASET: &str = include_str!("../../../data/instruments.toml");

/// Loads the dataset and calculator settings.
///
/// Reads the TOML file at `path`, or the bundled dataset when `path` is
/// `None`, layers environment overrides on top, and validates every series.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, environment())
}

/// The `RETURN_TRIANGLE__<TABLE>__<KEY>` override source.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn load_config_with_env(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<Config, ConfigError> {
    let builder = config::Config::builder();
    let builder = match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading dataset file");
            builder.add_source(config::File::from(path).format(config::FileFormat::Toml))
        }
        None => {
            tracing::info!("Using bundled dataset");
            builder.add_source(config::File::from_str(
                BUNDLED_DATASET,
                config::FileFormat::Toml,
            ))
        }
    };

    let raw = builder.add_source(environment).build()?;

    let file = raw.try_deserialize::<settings::DatasetFile>()?;
    let config = Config::try_from(file)?;

    tracing::info!(
        instruments = config.dataset.len(),
        "Configuration loaded successfully"
    );
    Ok(config)
}
