use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{OrchestratorConfig, PollSettings};
use crate::infrastructure::github::DEFAULT_API_BASE_URL;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub polling: PollingSettings,
    pub staging: StagingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Clone, Deserialize)]
pub struct BackendSettings {
    pub api_base_url: String,
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub dispatch_event_type: String,
    pub run_event_filter: String,
}

impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("api_base_url", &self.api_base_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("dispatch_event_type", &self.dispatch_event_type)
            .field("run_event_filter", &self.run_event_filter)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    pub cadence_secs: u64,
    pub deadline_secs: u64,
    pub run_page_size: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagingStrategy {
    Inline,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StagingSettings {
    pub strategy: StagingStrategy,
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub public_base_url: Option<String>,
    pub azure_account: Option<String>,
    pub azure_access_key: Option<String>,
    pub azure_container: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json_format: bool,
}

impl Settings {
    /// Layers defaults, `appsettings.<env>.*`, `APP__SECTION__KEY` variables, and finally
    /// the plain `GITHUB_TOKEN` / `GITHUB_OWNER` / `GITHUB_REPO` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.max_upload_mb", 10_i64)?
            .set_default("backend.api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("backend.owner", "")?
            .set_default("backend.repo", "")?
            .set_default("backend.dispatch_event_type", "analyze-audio")?
            .set_default("backend.run_event_filter", "repository_dispatch")?
            .set_default("polling.cadence_secs", 5_i64)?
            .set_default("polling.deadline_secs", 180_i64)?
            .set_default("polling.run_page_size", 5_i64)?
            .set_default("staging.strategy", "inline")?
            .set_default("staging.provider", "local")?
            .set_default("staging.local_path", "./staging")?
            .set_default("logging.json_format", false)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("backend.token", std::env::var("GITHUB_TOKEN").ok())?
            .set_override_option("backend.owner", std::env::var("GITHUB_OWNER").ok())?
            .set_override_option("backend.repo", std::env::var("GITHUB_REPO").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.backend.owner.trim().is_empty() || self.backend.repo.trim().is_empty() {
            return Err("backend.owner and backend.repo must be set".to_string());
        }
        if self.polling.cadence_secs == 0 {
            return Err("polling.cadence_secs must be positive".to_string());
        }
        if self.polling.run_page_size == 0 || self.polling.run_page_size > 100 {
            return Err("polling.run_page_size must be between 1 and 100".to_string());
        }
        Ok(())
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            owner: self.backend.owner.clone(),
            repo: self.backend.repo.clone(),
            token: self.backend.token.clone(),
            dispatch_event_type: self.backend.dispatch_event_type.clone(),
            poll: PollSettings {
                cadence: Duration::from_secs(self.polling.cadence_secs),
                deadline: Duration::from_secs(self.polling.deadline_secs),
                run_page_size: self.polling.run_page_size,
                run_event_filter: self.backend.run_event_filter.clone(),
            },
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
