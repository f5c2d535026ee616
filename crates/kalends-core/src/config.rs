use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_PRODID, DEFAULT_REFERENCE_YEAR, DEFAULT_TZID_PREFIX,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub calendar: CalendarConfig,
    pub timezone: TimezoneConfig,
    pub logging: LoggingConfig,
}

/// Defaults applied to calendars built without explicit values.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub prodid: String,
    pub autoinclude_timezones: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            autoinclude_timezones: true,
        }
    }
}

/// Timezone identifier policy and observance derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct TimezoneConfig {
    pub tzid_prefix: String,
    pub use_prefix: bool,
    pub reference_year: i32,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            tzid_prefix: DEFAULT_TZID_PREFIX.to_string(),
            use_prefix: true,
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `kalends.toml`.
    /// File values override environment variables, which override the defaults.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        Self::layered(
            config::Environment::default(),
            config::File::with_name(CONFIG_FILE_NAME).required(false),
        )
    }

    fn layered<F>(env: config::Environment, file: F) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("calendar.prodid", DEFAULT_PRODID)?
            .set_default("calendar.autoinclude_timezones", true)?
            .set_default("timezone.tzid_prefix", DEFAULT_TZID_PREFIX)?
            .set_default("timezone.use_prefix", true)?
            .set_default("timezone.reference_year", i64::from(DEFAULT_REFERENCE_YEAR))?
            .set_default("logging.level", "info")?
            // Env file
            .add_source(
                env.prefix("KALENDS")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(file)
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        tracing::debug!(settings = ?settings, "Configuration loaded");
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` for an empty product identifier and
    /// `CoreError::ValidationError` for a reference year outside 1..=9999.
    pub fn validate(&self) -> CoreResult<()> {
        if self.calendar.prodid.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "calendar.prodid must not be empty".to_string(),
            ));
        }
        if !(1..=9999).contains(&self.timezone.reference_year) {
            return Err(CoreError::ValidationError(format!(
                "timezone.reference_year {} is outside 1..=9999",
                self.timezone.reference_year
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
