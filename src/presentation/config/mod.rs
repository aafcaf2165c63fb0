mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BackendSettings, LoggingSettings, PollingSettings, ServerSettings, Settings, StagingSettings,
    StagingStrategy, StorageProviderSetting,
};
