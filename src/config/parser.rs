use std::path::Path;

use tracing::warn;

use super::schema::CONFIG_SCHEMA;
use super::types::SpotcheckConfig;
use crate::errors::SpotcheckError;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<SpotcheckConfig, SpotcheckError> {
    if !path.exists() {
        return Err(SpotcheckError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(SpotcheckError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse configuration from YAML text. An empty document yields the default
/// configuration.
pub fn parse_config_str(content: &str) -> Result<SpotcheckConfig, SpotcheckError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        return Ok(SpotcheckConfig::default());
    }

    validate_schema(&yaml)?;

    let config: SpotcheckConfig = serde_yaml::from_value(yaml)?;
    validate_conflicts(&config)?;
    Ok(config)
}

/// Load the config file when one is given, otherwise the defaults.
pub async fn load_or_default(path: Option<&str>) -> Result<SpotcheckConfig, SpotcheckError> {
    match path {
        Some(p) => parse_config(Path::new(p)).await,
        None => Ok(SpotcheckConfig::default()),
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), SpotcheckError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| SpotcheckError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| SpotcheckError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory only: typed parsing and the semantic checks decide validity
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Semantic checks the typed config cannot express.
fn validate_conflicts(config: &SpotcheckConfig) -> Result<(), SpotcheckError> {
    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(SpotcheckError::Config("server.port must be between 1 and 65535".into()));
        }
        if server.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(SpotcheckError::Config("server.host must not be empty".into()));
        }
    }

    if let Some(months) = config.summary.as_ref().and_then(|s| s.default_range_months) {
        if !(1..=120).contains(&months) {
            return Err(SpotcheckError::Config(format!(
                "summary.default_range_months must be between 1 and 120, got {}",
                months
            )));
        }
    }

    if config
        .reports
        .as_ref()
        .and_then(|r| r.path.as_deref())
        .is_some_and(|p| p.trim().is_empty())
    {
        warn!("reports.path is empty; the default report location will be used");
    }

    Ok(())
}
