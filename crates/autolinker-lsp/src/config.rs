use autolinker_core::SuggestConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspSettings {
    /// Logging level for the LSP server
    #[serde(default)]
    pub log_level: LogLevel,

    /// Suggestion tuning (minimum query length, maximum suggestions)
    #[serde(default)]
    pub suggest: SuggestConfig,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl LspSettings {
    /// Parse the `autolinker` section sent by the client.
    ///
    /// Out-of-range suggestion values are pulled back into range; the second
    /// element tells whether that happened.
    pub fn from_client_value(value: serde_json::Value) -> serde_json::Result<(Self, bool)> {
        let mut settings: Self = serde_json::from_value(value)?;
        let clamped = settings.suggest.clamped();
        let adjusted = clamped != settings.suggest;
        settings.suggest = clamped;
        Ok((settings, adjusted))
    }
}
