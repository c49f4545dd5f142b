use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub upload_dir: PathBuf,
    pub log_dir: PathBuf,

    // Rate limiting
    pub rate_record_per_min: u32,

    /// How many earlier date buckets a check-out may close (overnight shifts)
    pub overnight_lookback_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:5000".to_string(),
            upload_dir: PathBuf::from("uploads"),
            log_dir: PathBuf::from("logs"),
            rate_record_per_min: 120,
            overnight_lookback_days: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            rate_record_per_min: parse_or("RATE_RECORD_PER_MIN", defaults.rate_record_per_min),
            overnight_lookback_days: parse_or(
                "OVERNIGHT_LOOKBACK_DAYS",
                defaults.overnight_lookback_days,
            ),
        }
    }
}

/// Unset or unparseable values fall back to `default`.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
