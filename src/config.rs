use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::query::{DEFAULT_ENDPOINT, Endpoint};

pub const DEFAULT_CONFIG_FILE: &str = "igvf-sheet.json";
pub const DEFAULT_ANALYSIS_SET_OUTPUT: &str = "analysis_sets.tsv";
pub const DEFAULT_PER_SAMPLE_OUTPUT: &str = "per_sample_file.tsv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub analysis_set_output: Option<Utf8PathBuf>,
    #[serde(default)]
    pub per_sample_output: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub analysis_set_output: Option<Utf8PathBuf>,
    pub per_sample_output: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: Endpoint,
    pub timeout: Duration,
    pub analysis_set_output: Utf8PathBuf,
    pub per_sample_output: Utf8PathBuf,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, SheetError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config = if path.is_none() && !config_path.exists() {
            Config::default()
        } else {
            let content = fs::read_to_string(&config_path)
                .map_err(|_| SheetError::ConfigRead(config_path.clone()))?;
            serde_json::from_str(&content)
                .map_err(|err| SheetError::ConfigParse(err.to_string()))?
        };

        Self::resolve_config(config, overrides)
    }

    pub fn resolve_config(
        config: Config,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, SheetError> {
        let endpoint = overrides
            .endpoint
            .or(config.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = overrides
            .timeout_secs
            .or(config.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(ResolvedConfig {
            endpoint: Endpoint::parse(&endpoint)?,
            timeout: Duration::from_secs(timeout_secs),
            analysis_set_output: overrides
                .analysis_set_output
                .or(config.analysis_set_output)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_ANALYSIS_SET_OUTPUT)),
            per_sample_output: overrides
                .per_sample_output
                .or(config.per_sample_output)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PER_SAMPLE_OUTPUT)),
        })
    }
}
