//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DB_ADDRESS`: PostgreSQL connection string; unset selects the in-memory catalog
/// - `ORIGIN_ALLOW`: origin allowed by CORS (default: `"http://localhost:5173"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `PUBLIC_DIR`: directory of static files (default: `"public"`)
/// - `UPLOAD_PATH`: URL prefix and subdirectory of product images (default: `"images"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub origin_allow: String,
    pub log_format: LogFormat,
    pub public_dir: PathBuf,
    pub upload_path: String,
}

const DEFAULT_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_UPLOAD_PATH: &str = "images";

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            database_url: lookup("DB_ADDRESS").filter(|url| !url.trim().is_empty()),
            origin_allow: lookup("ORIGIN_ALLOW").unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            log_format: lookup("LOG_FORMAT")
                .and_then(|f| f.parse().ok())
                .unwrap_or_default(),
            public_dir: lookup("PUBLIC_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
            upload_path: lookup("UPLOAD_PATH")
                .map(|path| path.trim_matches('/').to_string())
                .filter(|path| !path.is_empty())
                .unwrap_or_else(|| DEFAULT_UPLOAD_PATH.to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the URL prefix under which product images are served.
    pub fn upload_route(&self) -> String {
        format!("/{}", self.upload_path)
    }

    /// Returns the directory product images are read from.
    pub fn upload_dir(&self) -> PathBuf {
        self.public_dir.join(&self.upload_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            origin_allow: DEFAULT_ORIGIN.to_string(),
            log_format: LogFormat::Pretty,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database_url, None);
        assert_eq!(config.origin_allow, "http://localhost:5173");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.upload_route(), "/images");
        assert_eq!(config.upload_dir(), PathBuf::from("public/images"));
    }

    #[test]
    fn test_empty_environment_matches_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.addr(), Config::default().addr());
        assert_eq!(config.origin_allow, Config::default().origin_allow);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = from_pairs(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("RUST_LOG", "debug"),
            ("DB_ADDRESS", "postgres://shop@localhost/shop"),
            ("ORIGIN_ALLOW", "https://shop.example"),
            ("LOG_FORMAT", "json"),
            ("PUBLIC_DIR", "/srv/shop"),
            ("UPLOAD_PATH", "/uploads/"),
        ]);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://shop@localhost/shop")
        );
        assert_eq!(config.origin_allow, "https://shop.example");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.upload_route(), "/uploads");
        assert_eq!(config.upload_dir(), PathBuf::from("/srv/shop/uploads"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_pairs(&[
            ("PORT", "http"),
            ("LOG_FORMAT", "xml"),
            ("DB_ADDRESS", " "),
            ("UPLOAD_PATH", "/"),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.database_url, None);
        assert_eq!(config.upload_path, "images");
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
