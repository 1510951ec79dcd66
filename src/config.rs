use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SurveyError};

pub const DEFAULT_BASE_REST_URI: &str = "https://rest-hosting.hostinger.com";
pub const DEFAULT_TOKEN_HEADER: &str = "X-Hpanel-Authorization";
pub const DEFAULT_DOMAIN_HEADER: &str = "X-Hpanel-Domain";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyConfig {
    pub base_rest_uri: String,
    pub token_header: String,
    pub domain_header: String,
    #[serde(default)]
    pub api_token: Option<String>,
    pub domain: String,
    pub settings_db: String,
    pub timeout_secs: u64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            base_rest_uri: DEFAULT_BASE_REST_URI.to_string(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            domain_header: DEFAULT_DOMAIN_HEADER.to_string(),
            api_token: None,
            domain: "localhost".to_string(),
            settings_db: "survey-settings.sqlite3".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SurveyConfig {
    /// Environment wins over the file; blank values are ignored.
    pub fn apply_env(mut self) -> Self {
        if let Some(token) = env_value("SURVEY_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(domain) = env_value("SURVEY_DOMAIN") {
            self.domain = domain;
        }
        if let Some(uri) = env_value("SURVEY_BASE_URI") {
            self.base_rest_uri = uri;
        }
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub fn load_config(path: &Path) -> Result<SurveyConfig> {
    if !path.exists() {
        let defaults = SurveyConfig::default();
        save_config(path, &defaults)?;
        return Ok(defaults);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| SurveyError::Config(format!("Unable to read {}: {e}", path.display())))?;
    if raw.trim().is_empty() {
        let defaults = SurveyConfig::default();
        save_config(path, &defaults)?;
        return Ok(defaults);
    }
    serde_json::from_str(&raw)
        .map_err(|e| SurveyError::Config(format!("Invalid survey config JSON: {e}")))
}

pub fn save_config(path: &Path, config: &SurveyConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SurveyError::Config(e.to_string()))?;
    }
    let payload =
        serde_json::to_string_pretty(config).map_err(|e| SurveyError::Config(e.to_string()))?;
    fs::write(path, payload)
        .map_err(|e| SurveyError::Config(format!("Unable to write {}: {e}", path.display())))
}
