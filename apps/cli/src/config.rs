use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub backend_url: String,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = var("MF360_BACKEND_URL").unwrap_or_else(|| "http://localhost:8001".into());
        let data_dir = var("MF360_DATA_DIR").unwrap_or_else(|| "./.mf360".into());
        let export_dir = var("MF360_EXPORT_DIR").unwrap_or_else(|| ".".into());
        let timeout_ms: u64 = var("MF360_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let log_format = var("MF360_LOG_FORMAT").unwrap_or_else(|| "text".into());
        Self {
            backend_url,
            data_dir: PathBuf::from(data_dir),
            export_dir: PathBuf::from(export_dir),
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(|_| None);
        assert_eq!(config.backend_url, "http://localhost:8001");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn test_overrides_and_bad_timeout() {
        let vars: HashMap<&str, &str> = [
            ("MF360_BACKEND_URL", "https://crm.example.com"),
            ("MF360_EXPORT_DIR", "/tmp/exports"),
            ("MF360_REQUEST_TIMEOUT_MS", "soon"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.backend_url, "https://crm.example.com");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.request_timeout, Duration::from_millis(30000));
    }
}
