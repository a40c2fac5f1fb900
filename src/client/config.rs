use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the contact API. `None` means local-only mode.
    pub api_url: Option<String>,
    pub leads_file: PathBuf,
    pub timeout: Duration,
    /// Enables inspection of the local lead log
    pub debug: bool,
}

impl ClientConfig {
    const DEFAULT_API_URL: &'static str = "http://localhost:5000";
    const DEFAULT_LEADS_FILE: &'static str = "contact-leads.json";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let api_url = match env::var("CONTACT_API_URL").ok().filter(|s| !s.trim().is_empty()) {
            Some(url) => Some(url.trim().trim_end_matches('/').to_string()),
            None if production => None,
            None => Some(Self::DEFAULT_API_URL.to_string()),
        };

        let leads_file: PathBuf = env::var("CONTACT_LEADS_FILE")
            .unwrap_or_else(|_| Self::DEFAULT_LEADS_FILE.to_string())
            .into();

        let timeout_secs = env::var("CONTACT_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CONTACT_API_TIMEOUT_SECS must be a valid number".to_string())?;

        let debug = env::var("CONTACT_DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_url,
            leads_file,
            timeout: Duration::from_secs(timeout_secs),
            debug,
        })
    }
}
