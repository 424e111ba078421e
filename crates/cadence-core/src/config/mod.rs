use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};


/// Cycle cap applied when nothing else is configured.
pub const DEFAULT_MAX_CYCLES: u32 = 10_000;

/// Rolling window used for series that declare no stop date.
pub const DEFAULT_PROJECTION_MONTHS: u32 = 12;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on expansion cycles before a serie is declared divergent.
    /// One cycle covers one period of the pattern, so a daily serie uses one
    /// cycle per day of its horizon. Raise this for long daily horizons.
    pub max_cycles: u32,
    /// Projection used by `noStopDate` payloads that omit `projectionMonths`.
    pub default_projection_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            default_projection_months: DEFAULT_PROJECTION_MONTHS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from an optional `cadence.toml` and `CADENCE_*`
    /// environment variables. Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> CoreResult<Self> {
        Self::load_from(None)
    }

    /// ## Summary
    /// Same as [`Settings::load`], reading the given file instead of `cadence.toml`.
    /// An explicitly named file must exist.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load_from(path: Option<&Path>) -> CoreResult<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("cadence").required(false),
        };

        Self::build(
            Self::defaults()?
                // TOML file
                .add_source(file)
                // Env
                .add_source(
                    config::Environment::with_prefix("CADENCE")
                        .prefix_separator("_")
                        .separator("__")
                        .ignore_empty(true)
                        .try_parsing(true),
                ),
        )
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with an in-memory TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_toml(contents: &str) -> CoreResult<Self> {
        Self::build(Self::defaults()?.add_source(config::File::from_str(contents, FileFormat::Toml)))
    }

    /// ## Summary
    /// Checks the values a deserialized configuration cannot express by type alone.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.engine.max_cycles == 0 {
            return Err(CoreError::InvalidConfiguration(
                "engine.max_cycles must be at least 1".to_string(),
            ));
        }
        if self.engine.default_projection_months == 0 {
            return Err(CoreError::InvalidConfiguration(
                "engine.default_projection_months must be at least 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn defaults() -> CoreResult<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("engine.max_cycles", i64::from(DEFAULT_MAX_CYCLES))?
            .set_default(
                "engine.default_projection_months",
                i64::from(DEFAULT_PROJECTION_MONTHS),
            )?
            .set_default("logging.level", "info")?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> CoreResult<Self> {
        let settings = builder.build()?.try_deserialize::<Settings>()?;
        settings.validate()?;
        tracing::debug!(
            max_cycles = settings.engine.max_cycles,
            default_projection_months = settings.engine.default_projection_months,
            "Configuration built"
        );
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file, and an optional
/// configuration file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    Settings::load_from(path)
}
