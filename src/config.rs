// src/config.rs

use std::{env, path::PathBuf};

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

/// Shown whenever the service gives us nothing better to display.
pub const GENERIC_ERROR_MESSAGE: &str = "요청을 처리하는 중 오류가 발생했습니다.";

/// Feedback ratings are stars, 1 to 5 inclusive.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Quiz results at or above this score count as passed.
pub const PASSING_SCORE: i64 = 60;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    /// Generation calls routinely take tens of seconds.
    pub request_timeout_secs: u64,
    pub download_dir: PathBuf,
    pub log_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    /// Builds a config pointing at `api_base_url` with every other field defaulted.
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            download_dir: PathBuf::from("downloads"),
            log_dir: PathBuf::from("logs"),
            rust_log: "info".to_string(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&api_base_url)
            .map_err(|e| AppError::Config(format!("API_BASE_URL is not a valid URL: {}", e)))?;

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("REQUEST_TIMEOUT_SECS must be a number, got '{}'", raw))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let download_dir = env::var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("downloads"));

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_base_url,
            request_timeout_secs,
            download_dir,
            log_dir,
            rust_log,
        })
    }
}
