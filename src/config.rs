//! Dashboard configuration.
//!
//! Every field has a default, so running without a config file (or with an
//! empty one) gives the stock dashboard.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::collector::OverlaySettings;
use crate::tui::Branding;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub refresh: RefreshConfig,
    pub sources: SourcesConfig,
    pub branding: BrandingConfig,
    pub overlay: OverlayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub proc_path: String,
    pub sys_path: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            proc_path: "/proc".to_string(),
            sys_path: "/sys".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandingConfig {
    pub product: String,
    pub release: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        let Branding { product, release } = Branding::default();
        Self { product, release }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Empty disables the overlay segment of the connectivity row.
    pub network_id: String,
    pub interface_prefix: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            network_id: "ab12cd34".to_string(),
            interface_prefix: "zt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
}

impl Config {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::load_from_str(&s).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate config from a string.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.refresh.interval_ms > 0,
            "refresh.interval_ms must be > 0, got {}",
            self.refresh.interval_ms
        );
        anyhow::ensure!(
            !self.sources.proc_path.is_empty(),
            "sources.proc_path must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.sys_path.is_empty(),
            "sources.sys_path must be non-empty"
        );
        anyhow::ensure!(
            !self.branding.product.is_empty(),
            "branding.product must be non-empty"
        );
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.refresh.interval_ms)
    }

    pub fn branding(&self) -> Branding {
        Branding {
            product: self.branding.product.clone(),
            release: self.branding.release.clone(),
        }
    }

    /// `None` when no overlay network id is configured.
    pub fn overlay_settings(&self) -> Option<OverlaySettings> {
        if self.overlay.network_id.is_empty() {
            return None;
        }
        Some(OverlaySettings {
            network_id: self.overlay.network_id.clone(),
            interface_prefix: self.overlay.interface_prefix.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert_eq!(config.sources.proc_path, "/proc");
        assert_eq!(config.branding(), Branding::default());
        assert_eq!(
            config.overlay_settings().map(|o| o.network_id),
            Some("ab12cd34".to_string())
        );
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::load_from_str(
            r#"
            [refresh]
            interval_ms = 250

            [branding]
            product = "Acme OS"

            [overlay]
            network_id = ""

            [logging]
            file = "/tmp/zspash.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.interval(), Duration::from_millis(250));
        assert_eq!(config.branding.product, "Acme OS");
        assert_eq!(config.branding.release, BrandingConfig::default().release);
        assert!(config.overlay_settings().is_none());
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/zspash.log")));
        assert_eq!(config.sources, SourcesConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let err = Config::load_from_str("[refresh]\ninterval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("refresh.interval_ms"), "{}", err);

        let err = Config::load_from_str("[sources]\nproc_path = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("sources.proc_path"), "{}", err);

        let err = Config::load_from_str("[branding]\nproduct = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("branding.product"), "{}", err);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::load_from_str("[refresh]\nintervall_ms = 5\n").is_err());
        assert!(Config::load_from_str("[nope]\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sources]\nproc_path = \"/host/proc\"\nsys_path = \"/host/sys\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sources.proc_path, "/host/proc");
        assert_eq!(config.sources.sys_path, "/host/sys");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"), "{}", err);
    }
}
