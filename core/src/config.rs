use crate::error::{CoreError, CoreResult};
use crate::source::endpoint::validate_source_url;
use crate::source::file::JsonFileSource;
use crate::source::postgrest::PostgrestSource;
use crate::source::ContractSource;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TABLE: &str = "contracts";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
const MAX_HTTP_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Postgrest {
        base_url: Url,
        anon_key: String,
        table: String,
    },
    File {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub source: SourceConfig,
    pub http_timeout_ms: u64,
}

impl TrackerConfig {
    /// Optional `OPHS_CONFIG_PATH` env file first, then the process environment on top.
    pub fn load() -> CoreResult<Self> {
        let mut merged = HashMap::new();

        if let Ok(config_path) = std::env::var("OPHS_CONFIG_PATH") {
            let config_path = config_path.trim();
            if !config_path.is_empty() {
                merged.extend(parse_env_file(config_path)?);
            }
        }

        merged.extend(std::env::vars());

        Self::from_kv(&merged)
    }

    pub fn from_kv(kv: &HashMap<String, String>) -> CoreResult<Self> {
        let http_timeout_ms = parse_u64(
            kv.get("OPHS_HTTP_TIMEOUT_MS"),
            DEFAULT_HTTP_TIMEOUT_MS,
            "OPHS_HTTP_TIMEOUT_MS",
        )?;
        if http_timeout_ms == 0 || http_timeout_ms > MAX_HTTP_TIMEOUT_MS {
            return Err(CoreError::Config(format!(
                "OPHS_HTTP_TIMEOUT_MS must be between 1 and {}",
                MAX_HTTP_TIMEOUT_MS
            )));
        }

        let kind = kv
            .get("OPHS_SOURCE_KIND")
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "postgrest".to_string());

        let source = match kind.as_str() {
            "postgrest" => {
                let base_url = validate_source_url(&require_nonempty(kv, "OPHS_SUPABASE_URL")?)?;
                let anon_key = require_nonempty(kv, "OPHS_SUPABASE_ANON_KEY")?;
                let table = kv
                    .get("OPHS_CONTRACTS_TABLE")
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_TABLE.to_string());
                if !is_valid_table_name(&table) {
                    return Err(CoreError::Config(
                        "OPHS_CONTRACTS_TABLE must contain only letters, digits and _".to_string(),
                    ));
                }
                SourceConfig::Postgrest {
                    base_url,
                    anon_key,
                    table,
                }
            }
            "file" => SourceConfig::File {
                path: PathBuf::from(require_nonempty(kv, "OPHS_FIXTURE_PATH")?),
            },
            other => {
                return Err(CoreError::Config(format!(
                    "OPHS_SOURCE_KIND must be postgrest or file, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            source,
            http_timeout_ms,
        })
    }

    pub fn source_kind(&self) -> &'static str {
        match self.source {
            SourceConfig::Postgrest { .. } => "postgrest",
            SourceConfig::File { .. } => "file",
        }
    }
}

pub fn build_source(config: &TrackerConfig) -> CoreResult<Box<dyn ContractSource + Send + Sync>> {
    tracing::info!(source_kind = config.source_kind(), "configuring contract source");
    match &config.source {
        SourceConfig::Postgrest {
            base_url,
            anon_key,
            table,
        } => Ok(Box::new(PostgrestSource::new(
            base_url.clone(),
            anon_key.clone(),
            table.clone(),
            Duration::from_millis(config.http_timeout_ms),
        )?)),
        SourceConfig::File { path } => Ok(Box::new(JsonFileSource::new(path))),
    }
}

fn parse_env_file(path: &str) -> CoreResult<HashMap<String, String>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|_| CoreError::Config(format!("failed to read config file at {}", path)))?;

    let mut kv = HashMap::new();
    for (idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            CoreError::Config(format!("invalid config line {} (expected KEY=VALUE)", idx + 1))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::Config(format!(
                "invalid config line {} (empty key)",
                idx + 1
            )));
        }
        kv.insert(key.to_string(), strip_quotes(value.trim()));
    }
    Ok(kv)
}

fn strip_quotes(s: &str) -> String {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

fn require_nonempty(kv: &HashMap<String, String>, key: &'static str) -> CoreResult<String> {
    match kv.get(key).map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Config(format!("missing required config key {}", key))),
    }
}

fn parse_u64(value: Option<&String>, default: u64, key: &'static str) -> CoreResult<u64> {
    match value {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map_err(|_| CoreError::Config(format!("{} must be an integer", key))),
    }
}

fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
