use std::env;

use crate::error::AppError;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub github_api_base: String,
    pub github_token: Option<String>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse::<u16>()
            .map_err(|err| AppError::Config(format!("invalid PORT: {err}")))?;

        let github_api_base = env::var("GITHUB_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_BASE.into());
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let cert_path = env::var("CERT_PATH").ok();
        let key_path = env::var("KEY_PATH").ok();

        Ok(AppConfig {
            host,
            port,
            github_api_base,
            github_token,
            cert_path,
            key_path,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
