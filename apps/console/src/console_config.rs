use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tahfeez_core::{AppError, AppResult, Locale};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_SESSION_FILE: &str = ".tahfeez-session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    /// Overrides the persisted language preference when set.
    pub locale: Option<Locale>,
    pub session_file: PathBuf,
    pub http_timeout: Option<Duration>,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        let api_base_url = env::var("TAHFEEZ_API_BASE_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());

        let locale = optional_env("TAHFEEZ_LOCALE")
            .map(|value| value.parse::<Locale>())
            .transpose()
            .map_err(|error| AppError::Validation(format!("invalid TAHFEEZ_LOCALE: {error}")))?;

        let session_file = optional_env("TAHFEEZ_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let http_timeout = match parse_env_optional_u64("TAHFEEZ_HTTP_TIMEOUT_SECONDS")? {
            Some(0) => {
                return Err(AppError::Validation(
                    "TAHFEEZ_HTTP_TIMEOUT_SECONDS must be greater than zero".to_owned(),
                ));
            }
            Some(seconds) => Some(Duration::from_secs(seconds)),
            None => None,
        };

        Ok(Self {
            api_base_url,
            locale,
            session_file,
            http_timeout,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env_optional_u64(name: &str) -> AppResult<Option<u64>> {
    optional_env(name)
        .map(|value| {
            value.parse::<u64>().map_err(|error| {
                AppError::Validation(format!("invalid {name} value '{value}': {error}"))
            })
        })
        .transpose()
}
