use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::sentence::udpipe::ParseSettings;
use crate::workflows::congress::FetchSettings;
use crate::workflows::schedule::parse_date;

const DEFAULT_BILLS_ENDPOINT: &str =
    "https://congress.api.sunlightfoundation.com/bills?congress=115";
const DEFAULT_PARSER_ENDPOINT: &str = "https://lindat.mff.cuni.cz/services/udpipe/api/process";

/// Distinguishes runtime behavior for different stages of the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub headlines: HeadlineConfig,
    pub schedule: ScheduleConfig,
    pub poster: PosterConfig,
    pub congress: CongressConfig,
    pub parser: ParserConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let headlines = HeadlineConfig {
            max_length: parse_var("HEADLINE_MAX_LENGTH", 115)?,
            grammar_path: optional_var("HEADLINE_GRAMMAR_PATH").map(PathBuf::from),
            rng_seed: optional_var("HEADLINE_RNG_SEED")
                .map(|raw| parse_value("HEADLINE_RNG_SEED", &raw))
                .transpose()?,
        };

        let epoch_raw = env::var("SCHEDULE_EPOCH").unwrap_or_else(|_| "2017-03-09".to_string());
        let schedule = ScheduleConfig {
            path: path_var("SCHEDULE_PATH", "schedule.json"),
            epoch: parse_date(&epoch_raw).map_err(|_| ConfigError::Invalid {
                key: "SCHEDULE_EPOCH",
                value: epoch_raw.clone(),
            })?,
            post_char_limit: parse_var("POST_CHAR_LIMIT", 280)?,
        };

        let poster = PosterConfig {
            base_url: optional_var("POST_BASE_URL"),
            access_token: optional_var("POST_ACCESS_TOKEN"),
        };

        let congress = CongressConfig {
            endpoint: env::var("BILLS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_BILLS_ENDPOINT.to_string()),
            archive_path: path_var("BILLS_PATH", "bills.json"),
            max_pages: parse_var("BILLS_MAX_PAGES", 40)?,
            request_delay: Duration::from_millis(parse_var("BILLS_REQUEST_DELAY_MS", 2000)?),
            retries: parse_var("BILLS_RETRIES", 3)?,
        };

        let parser = ParserConfig {
            endpoint: env::var("PARSER_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_PARSER_ENDPOINT.to_string()),
            model: env::var("PARSER_MODEL").unwrap_or_else(|_| "english".to_string()),
            corpus_path: path_var("PARSES_PATH", "parses.conllu"),
            request_delay: Duration::from_millis(parse_var("PARSER_REQUEST_DELAY_MS", 1000)?),
            retries: parse_var("PARSER_RETRIES", 3)?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            headlines,
            schedule,
            poster,
            congress,
            parser,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Headline generation settings.
#[derive(Debug, Clone)]
pub struct HeadlineConfig {
    /// Character budget for the prose before the link.
    pub max_length: usize,
    /// Replaces the built-in superlative grammar when set.
    pub grammar_path: Option<PathBuf>,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub path: PathBuf,
    pub epoch: NaiveDate,
    pub post_char_limit: usize,
}

#[derive(Clone, Default)]
pub struct PosterConfig {
    pub base_url: Option<String>,
    pub access_token: Option<String>,
}

impl PosterConfig {
    /// Base URL and token, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.base_url, &self.access_token) {
            (Some(url), Some(token)) => Some((url.as_str(), token.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for PosterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PosterConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CongressConfig {
    pub endpoint: String,
    pub archive_path: PathBuf,
    pub max_pages: u32,
    pub request_delay: Duration,
    pub retries: u32,
}

impl CongressConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            endpoint: self.endpoint.clone(),
            max_pages: self.max_pages,
            delay: self.request_delay,
            retries: self.retries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub endpoint: String,
    pub model: String,
    pub corpus_path: PathBuf,
    pub request_delay: Duration,
    pub retries: u32,
}

impl ParserConfig {
    pub fn parse_settings(&self) -> ParseSettings {
        ParseSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            delay: self.request_delay,
            retries: self.retries,
        }
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn path_var(key: &str, default: &str) -> PathBuf {
    PathBuf::from(optional_var(key).unwrap_or_else(|| default.to_string()))
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "{key} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
