use crate::domain::schedule::Schedule;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_path, validate_range, Validate};
use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Replaces `${VAR}` with the variable's value; unknown variables are left as-is.
pub(crate) fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// `HH:MM` start of the first period.
    pub day_start: String,
    pub period_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start: "08:30".to_string(),
            period_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Json,
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub sink: SinkKind,
    pub output_path: String,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Json,
            output_path: "./bookings".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    pub fn day_start(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.schedule.day_start, "%H:%M").map_err(|e| {
            BookingError::InvalidConfigValueError {
                field: "schedule.day_start".to_string(),
                value: self.schedule.day_start.clone(),
                reason: format!("expected HH:MM ({})", e),
            }
        })
    }

    pub fn schedule(&self) -> Result<Schedule> {
        Ok(Schedule::new(self.day_start()?, self.schedule.period_minutes))
    }

    pub fn output_path(&self) -> &str {
        &self.submission.output_path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        let day_start = self.day_start()?;
        validate_range("schedule.period_minutes", self.schedule.period_minutes, 15, 240)?;

        // Ten periods must fit before midnight.
        let last_minute = self.schedule.period_minutes * 10;
        let minutes_left = 24 * 60 - day_start.signed_duration_since(NaiveTime::MIN).num_minutes();
        if i64::from(last_minute) > minutes_left {
            return Err(BookingError::InvalidConfigValueError {
                field: "schedule".to_string(),
                value: format!(
                    "{} + 10 x {}min",
                    self.schedule.day_start, self.schedule.period_minutes
                ),
                reason: "all ten periods must end by midnight".to_string(),
            });
        }

        if self.submission.sink == SinkKind::Json {
            validate_path("submission.output_path", &self.submission.output_path)?;
        }
        Ok(())
    }
}
