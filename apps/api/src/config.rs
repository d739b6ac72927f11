//! BLINNO API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Fee constants come from an optional TOML file
//! (`BLINNO_FEE_SCHEDULE`) with the scalar rates overridable from the
//! environment.

use std::env;
use std::path::Path;

use blinno_core::{FeeAbsorption, FeeSchedule};

/// BLINNO API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Postgres connection string
    pub database_url: String,

    /// Pool size
    pub database_max_connections: u32,

    /// Supabase project JWT secret (HS256)
    pub jwt_secret: String,

    /// Guard inserts with a per-user advisory lock and re-count
    pub strict_limits: bool,

    /// Fee constants for tips and orders
    pub fees: FeeSchedule,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut fees = match lookup("BLINNO_FEE_SCHEDULE") {
            Some(path) => load_fee_schedule(Path::new(&path))?,
            None => FeeSchedule::default(),
        };

        if let Some(bps) = parse_var(&lookup, "PLATFORM_FEE_BPS")? {
            fees.platform_fee_bps = bps;
        }
        if let Some(bps) = parse_var(&lookup, "PROCESSING_FEE_BPS")? {
            fees.processing_fee_bps = bps;
        }
        if let Some(value) = lookup("FEE_ABSORPTION") {
            fees.absorption = parse_absorption(&value)?;
        }

        fees.validate()
            .map_err(|e| ConfigError::InvalidFeeSchedule(e.to_string()))?;

        let config = ApiConfig {
            http_port: parse_var(&lookup, "HTTP_PORT")?.unwrap_or(8080),

            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| ConfigError::MissingRequired("DATABASE_URL".to_string()))?,

            database_max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(10),

            jwt_secret: lookup("SUPABASE_JWT_SECRET")
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ConfigError::MissingRequired("SUPABASE_JWT_SECRET".to_string()))?,

            strict_limits: parse_var(&lookup, "BLINNO_STRICT_LIMITS")?.unwrap_or(false),

            fees,
        };

        Ok(config)
    }
}

/// Reads and validates a fee schedule file.
pub fn load_fee_schedule(path: &Path) -> Result<FeeSchedule, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let schedule: FeeSchedule =
        toml::from_str(&raw).map_err(|e| ConfigError::InvalidFeeSchedule(e.to_string()))?;

    Ok(schedule)
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(None),
    }
}

fn parse_absorption(value: &str) -> Result<FeeAbsorption, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "creator" => Ok(FeeAbsorption::Creator),
        "buyer" => Ok(FeeAbsorption::Buyer),
        _ => Err(ConfigError::InvalidValue("FEE_ABSORPTION".to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid fee schedule: {0}")]
    InvalidFeeSchedule(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/blinno"),
        ("SUPABASE_JWT_SECRET", "secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_max_connections, 10);
        assert!(!config.strict_limits);
        assert_eq!(config.fees, FeeSchedule::default());
    }

    #[test]
    fn test_missing_secret() {
        let result = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")]));
        assert!(matches!(result, Err(ConfigError::MissingRequired(key)) if key == "SUPABASE_JWT_SECRET"));
    }

    #[test]
    fn test_fee_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("PLATFORM_FEE_BPS", "750"),
            ("FEE_ABSORPTION", "Buyer"),
            ("BLINNO_STRICT_LIMITS", "true"),
        ]);
        let config = ApiConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.fees.platform_fee_bps, 750);
        assert_eq!(config.fees.processing_fee_bps, 290);
        assert_eq!(config.fees.absorption, FeeAbsorption::Buyer);
        assert!(config.strict_limits);
    }

    #[test]
    fn test_rate_above_hundred_percent_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PROCESSING_FEE_BPS", "10001"));
        let result = ApiConfig::from_lookup(lookup(&vars));
        assert!(matches!(result, Err(ConfigError::InvalidFeeSchedule(_))));
    }

    #[test]
    fn test_bad_port() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("HTTP_PORT", "eighty"));
        let result = ApiConfig::from_lookup(lookup(&vars));
        assert!(matches!(result, Err(ConfigError::InvalidValue(key)) if key == "HTTP_PORT"));
    }

    #[test]
    fn test_schedule_file() {
        let path = env::temp_dir().join(format!("blinno-fees-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "platform_fee_bps = 400\n\n[flat_fees]\nUSD = 25\n",
        )
        .unwrap();

        let schedule = load_fee_schedule(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(schedule.platform_fee_bps, 400);
        assert_eq!(schedule.processing_fee_bps, 290);
        assert_eq!(schedule.flat_fees.len(), 1);
    }

    #[test]
    fn test_misspelled_schedule_key_rejected() {
        let path = env::temp_dir().join(format!("blinno-fees-typo-{}.toml", std::process::id()));
        std::fs::write(&path, "platform_fee_bsp = 900\n").unwrap();

        let result = load_fee_schedule(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::InvalidFeeSchedule(msg)) if msg.contains("platform_fee_bsp")));
    }
}
