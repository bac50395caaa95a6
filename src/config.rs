use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Runtime settings, read from the environment (and `.env` when present).
///
/// - `PLAN_CSV_PATH`: insertion log to load (default `promocionales.csv`)
/// - `PLAN_OUTPUT_DIR`: where `plan.csv` and `charts.json` go (default `.`)
/// - `PLAN_PREVIEW_ROWS`: programs shown in the console preview (default 10)
/// - `PLAN_LOG_LEVEL`: default filter when `RUST_LOG` is unset (default `info`)
/// - `PLAN_LOG_FORMAT`: `text` or `json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    pub preview_rows: usize,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Invalid settings that fell back to defaults. Read before logging is
    /// up, so the caller reports them once the subscriber exists.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            csv_path: PathBuf::from("promocionales.csv"),
            output_dir: PathBuf::from("."),
            preview_rows: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let mut warnings = Vec::new();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let preview_rows = match get("PLAN_PREVIEW_ROWS") {
            Some(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
                warnings.push(format!(
                    "invalid PLAN_PREVIEW_ROWS `{}`, using {}",
                    raw, defaults.preview_rows
                ));
                defaults.preview_rows
            }),
            None => defaults.preview_rows,
        };
        let log_format = match get("PLAN_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            None | Some("text") => LogFormat::Text,
            Some(other) => {
                warnings.push(format!("unknown PLAN_LOG_FORMAT `{}`, using text", other));
                LogFormat::Text
            }
        };

        AppConfig {
            csv_path: get("PLAN_CSV_PATH").map(PathBuf::from).unwrap_or(defaults.csv_path),
            output_dir: get("PLAN_OUTPUT_DIR").map(PathBuf::from).unwrap_or(defaults.output_dir),
            preview_rows,
            log_level: get("PLAN_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
            warnings,
        }
    }
}
