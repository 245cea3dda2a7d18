//! Deep-link prefixes and handoff timings, optionally loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! production values.

use crate::application::sequencer::SequenceTimings;
use crate::domain::target::{DeepLink, FlowLinks};
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandoffConfig {
    /// Custom URL scheme claimed by the mobile app.
    pub scheme: String,
    pub payment: PaymentConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaymentConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Host and path of the automatic redirect.
    pub primary_path: String,
    /// Host and path of the manual fallback redirect.
    pub alternate_path: String,
    pub countdown_from: u32,
    pub tick_ms: u64,
    pub handoff_delay_ms: u64,
    pub fallback_delay_ms: u64,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            scheme: "vealthx".to_string(),
            payment: PaymentConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            path: "app/callback".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            primary_path: "auth/callback".to_string(),
            alternate_path: "app/auth/callback".to_string(),
            countdown_from: 3,
            tick_ms: 1000,
            handoff_delay_ms: 2000,
            fallback_delay_ms: 2000,
        }
    }
}

impl HandoffConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn payment_link(&self) -> DeepLink {
        DeepLink::new(&self.scheme, &self.payment.path)
    }

    pub fn auth_links(&self) -> FlowLinks {
        FlowLinks {
            primary: DeepLink::new(&self.scheme, &self.auth.primary_path),
            alternate: DeepLink::new(&self.scheme, &self.auth.alternate_path),
        }
    }

    pub fn timings(&self) -> SequenceTimings {
        SequenceTimings {
            countdown_from: self.auth.countdown_from,
            // tokio intervals reject a zero period
            tick: Duration::from_millis(self.auth.tick_ms.max(1)),
            handoff_delay: Duration::from_millis(self.auth.handoff_delay_ms),
            fallback_delay: Duration::from_millis(self.auth.fallback_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_production_links() {
        let config = HandoffConfig::default();
        assert_eq!(config.payment_link().prefix(), "vealthx://app/callback");

        let links = config.auth_links();
        assert_eq!(links.primary.prefix(), "vealthx://auth/callback");
        assert_eq!(links.alternate.prefix(), "vealthx://app/auth/callback");
        assert_ne!(links.primary, links.alternate);

        assert_eq!(config.timings(), SequenceTimings::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = HandoffConfig::from_toml(
            r#"
            scheme = "vealthx-staging"

            [auth]
            handoff_delay_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.payment_link().prefix(), "vealthx-staging://app/callback");
        assert_eq!(config.timings().handoff_delay, Duration::from_millis(50));
        assert_eq!(config.timings().fallback_delay, Duration::from_secs(2));
        assert_eq!(config.auth.countdown_from, 3);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let config = HandoffConfig::from_toml("[auth]\ntick_ms = 0").unwrap();
        assert_eq!(config.timings().tick, Duration::from_millis(1));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(HandoffConfig::from_toml("shceme = \"typo\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[payment]\npath = \"pay/done\"").unwrap();

        let config = HandoffConfig::from_file(file.path()).unwrap();
        assert_eq!(config.payment_link().prefix(), "vealthx://pay/done");
    }
}
