use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_OUTPUT_PATH: &str = "picard_results.csv";
pub const DEFAULT_USER_AGENT: &str = "picscrape/0.1 (price-comparison)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            }
            _ => Ok(None),
        }
    };

    let log_level = or_default("PICSCRAPE_LOG_LEVEL", "info");
    let user_agent = or_default("PICSCRAPE_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_optional_u64("PICSCRAPE_REQUEST_TIMEOUT_SECS")?;
    let output_path = PathBuf::from(or_default("PICSCRAPE_OUTPUT_PATH", DEFAULT_OUTPUT_PATH));

    Ok(AppConfig {
        log_level,
        user_agent,
        request_timeout_secs,
        output_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
