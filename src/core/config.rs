use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for the will scheduler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Period between pending-will sweeps.
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
    /// Reload pending wills from the session store before the first sweep.
    #[serde(default = "default_recover_on_start")]
    pub recover_on_start: bool,
}

impl SchedulerConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sweep_interval_ms: default_sweep_interval_ms(),
            recover_on_start: default_recover_on_start(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from a path resolved via LASTWILL_CONFIG or defaults to `config/lastwill.toml`.
    /// Applies LASTWILL_SWEEP_INTERVAL_MS after parsing.
    pub fn load_from_env() -> Result<Self> {
        let path = env_config_path();
        let mut cfg = Self::load(&path)?;
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    /// Load configuration from a specific file (TOML or JSON based on extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let data = fs::read_to_string(path_ref)
            .with_context(|| format!("unable to read config {}", path_ref.display()))?;
        if is_json(path_ref) {
            Ok(serde_json::from_str(&data)
                .with_context(|| format!("invalid JSON config {}", path_ref.display()))?)
        } else {
            Ok(toml::from_str(&data)
                .with_context(|| format!("invalid TOML config {}", path_ref.display()))?)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.scheduler.sweep_interval_ms == 0 {
            bail!("scheduler.sweep_interval_ms must be > 0");
        }
        if let Some(level) = &self.telemetry.log_level {
            if level.trim().is_empty() {
                bail!("telemetry.log_level must be non-empty when set");
            }
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var("LASTWILL_SWEEP_INTERVAL_MS") {
            self.scheduler.sweep_interval_ms = raw
                .parse()
                .with_context(|| format!("invalid LASTWILL_SWEEP_INTERVAL_MS {raw}"))?;
        }
        Ok(())
    }
}

/// Config file named by LASTWILL_CONFIG, or the default location.
pub fn env_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("LASTWILL_CONFIG") {
        PathBuf::from(path)
    } else {
        PathBuf::from("config/lastwill.toml")
    }
}

fn is_json(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some("json"))
}

fn default_sweep_interval_ms() -> u64 {
    1_000
}

fn default_recover_on_start() -> bool {
    true
}
