use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a `TOPTERMS_*` value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a `TOPTERMS_*` value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("TOPTERMS_LOG_LEVEL", "info");
    // 1 MiB per read keeps syscall overhead negligible on multi-GB inputs
    // while the scanner's own buffer stays bounded by record size.
    let read_buffer_bytes = parse_usize("TOPTERMS_READ_BUFFER_BYTES", "1048576")?;
    let progress_interval = parse_u64("TOPTERMS_PROGRESS_INTERVAL", "10000")?;

    if read_buffer_bytes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TOPTERMS_READ_BUFFER_BYTES".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if progress_interval == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TOPTERMS_PROGRESS_INTERVAL".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        read_buffer_bytes,
        progress_interval,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
