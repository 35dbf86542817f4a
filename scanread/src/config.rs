use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated env var, dropping blank entries.
fn parse_env_list(var: &str) -> Vec<String> {
    env::var(var)
        .map(|val| {
            val.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer tokens accepted on the OCR route. Empty leaves it open.
    pub api_keys: Vec<String>,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Directory containing `*.traineddata`; `None` uses Tesseract's default.
    pub data_path: Option<String>,
    pub default_language: String,
    pub timeout_secs: u64,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            default_language: crate::recognition::DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SCANREAD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("SCANREAD_PORT", 3000),
                api_keys: parse_env_list("SCANREAD_API_KEYS"),
                cors_origins: parse_env_list("SCANREAD_CORS_ORIGINS"),
                max_upload_bytes: parse_env_or(
                    "SCANREAD_MAX_UPLOAD_BYTES",
                    DEFAULT_MAX_UPLOAD_BYTES,
                ),
            },
            ocr: OcrConfig {
                data_path: env::var("OCR_DATA_PATH").ok().filter(|p| !p.is_empty()),
                default_language: env::var("OCR_DEFAULT_LANGUAGE")
                    .ok()
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| crate::recognition::DEFAULT_LANGUAGE.to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
