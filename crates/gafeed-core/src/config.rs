use crate::client_config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_client_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_client_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_client_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_client_config(|key| std::env::var(key))
}

/// Build client configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, raw: &str| -> Result<u64, ConfigError> {
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let token = require("GAFEED_TOKEN")?;
    let profile_id = optional("GAFEED_PROFILE_ID")
        .map(|raw| parse_u64("GAFEED_PROFILE_ID", &raw))
        .transpose()?;
    let api_key = optional("GAFEED_API_KEY");
    let base_url = or_default("GAFEED_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let timeout_secs = parse_u64(
        "GAFEED_TIMEOUT_SECS",
        &or_default("GAFEED_TIMEOUT_SECS", "300"),
    )?;
    let verify_ssl = parse_bool(
        "GAFEED_VERIFY_SSL",
        &or_default("GAFEED_VERIFY_SSL", "true"),
    )?;
    let http_proxy = optional("GAFEED_HTTP_PROXY");
    let user_agent = or_default("GAFEED_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("GAFEED_LOG_LEVEL", "info");

    Ok(ClientConfig {
        token,
        profile_id,
        api_key,
        base_url,
        timeout_secs,
        verify_ssl,
        http_proxy,
        user_agent,
        log_level,
    })
}

/// Parse a boolean flag. Accepts `true`/`false`, `1`/`0`, `yes`/`no`.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
