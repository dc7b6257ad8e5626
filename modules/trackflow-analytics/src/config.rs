use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticSink, StderrSink, TracingSink};

/// Tracking middleware configuration.
///
/// Meant to be embedded in the host application's own config; every field
/// has a default so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Key under `meta` where analytics events live.
    pub analytics_key: String,

    /// Where untracked-event diagnostics are written.
    pub diagnostics: DiagnosticChannel,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            analytics_key: "analytics".to_string(),
            diagnostics: DiagnosticChannel::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticChannel {
    /// `tracing::error!`, picked up by whatever subscriber the host installed.
    #[default]
    Tracing,
    /// Raw stderr.
    Stderr,
}

impl DiagnosticChannel {
    pub fn sink(self) -> Box<dyn DiagnosticSink> {
        match self {
            DiagnosticChannel::Tracing => Box::new(TracingSink),
            DiagnosticChannel::Stderr => Box::new(StderrSink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: TrackingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TrackingConfig::default());
        assert_eq!(config.analytics_key, "analytics");
        assert_eq!(config.diagnostics, DiagnosticChannel::Tracing);
    }

    #[test]
    fn test_overrides_are_read() {
        let config: TrackingConfig =
            serde_json::from_str(r#"{ "analytics_key": "beacon", "diagnostics": "stderr" }"#)
                .unwrap();
        assert_eq!(config.analytics_key, "beacon");
        assert_eq!(config.diagnostics, DiagnosticChannel::Stderr);
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        let result = serde_json::from_str::<TrackingConfig>(r#"{ "diagnostics": "syslog" }"#);
        assert!(result.is_err());
    }
}
