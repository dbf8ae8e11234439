use thiserror::Error;

use crate::contract::{DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS};

pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";
pub const RETENTION_DAYS_ENV: &str = "JANITOR_RETENTION_DAYS";
pub const DRY_RUN_ENV: &str = "JANITOR_DRY_RUN";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} must be an integer between 1 and {max}, got '{value}'")]
    InvalidRetentionDays {
        name: &'static str,
        max: u32,
        value: String,
    },
    #[error("{name} must be a boolean, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JanitorConfig {
    pub topic_arn: String,
    pub retention_days: u32,
    pub dry_run: bool,
}

impl JanitorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let topic_arn = lookup(TOPIC_ARN_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(TOPIC_ARN_ENV))?;

        let retention_days = match non_blank(lookup(RETENTION_DAYS_ENV)) {
            None => DEFAULT_RETENTION_DAYS,
            Some(value) => match value.parse::<u32>() {
                Ok(days) if (1..=MAX_RETENTION_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::InvalidRetentionDays {
                        name: RETENTION_DAYS_ENV,
                        max: MAX_RETENTION_DAYS,
                        value,
                    })
                }
            },
        };

        let dry_run = match non_blank(lookup(DRY_RUN_ENV)) {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                name: DRY_RUN_ENV,
                value,
            })?,
        };

        Ok(Self {
            topic_arn,
            retention_days,
            dry_run,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
