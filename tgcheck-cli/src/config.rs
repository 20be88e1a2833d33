//! Probe settings from a JSON file, environment variables and flags.
//!
//! Precedence, lowest first: built-in defaults, the `--config` file, then
//! environment variables and command-line flags. Settings are fixed once
//! loaded.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tgcheck_core::UsernameStatus;
use tgcheck_fetch::{ErrorPolicy, FragmentMode, ProbeSettings, RetryPolicy};
use tracing::debug;

/// Probe configuration flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// JSON settings file.
    #[arg(long, global = true, env = "TGCHECK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum accepted username length.
    #[arg(long, global = true, env = "TGCHECK_MIN_LENGTH")]
    pub min_length: Option<usize>,

    /// Fragment strategies: api, web or api_then_web.
    #[arg(long, global = true, env = "TGCHECK_FRAGMENT_MODE")]
    pub fragment_mode: Option<FragmentMode>,

    /// Fragment base URL.
    #[arg(long, global = true, env = "TGCHECK_FRAGMENT_URL", value_name = "URL")]
    pub fragment_url: Option<String>,

    /// Telegram base URL.
    #[arg(long, global = true, env = "TGCHECK_TELEGRAM_URL", value_name = "URL")]
    pub telegram_url: Option<String>,

    /// Fragment request timeout in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    pub fragment_timeout: Option<u64>,

    /// Telegram request timeout in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    pub telegram_timeout: Option<u64>,

    /// Attempts for Fragment API hash discovery.
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Return Fragment errors as-is instead of asking Telegram.
    #[arg(long, global = true)]
    pub no_telegram_on_error: bool,

    /// Ask Telegram to confirm when Fragment reports the name as absent.
    #[arg(long, global = true)]
    pub confirm_absence: bool,
}

impl ProbeArgs {
    /// Builds the effective settings.
    pub async fn load(&self) -> Result<ProbeSettings> {
        let settings = match &self.config {
            Some(path) => read_settings_file(path).await?,
            None => ProbeSettings::default(),
        };
        Ok(self.apply(settings))
    }

    /// Applies flag and environment overrides to `settings`.
    pub fn apply(&self, mut settings: ProbeSettings) -> ProbeSettings {
        if let Some(min_length) = self.min_length {
            settings.min_length = min_length;
        }
        if let Some(mode) = self.fragment_mode {
            settings.fragment_mode = mode;
        }
        if let Some(url) = &self.fragment_url {
            settings.fragment_base_url.clone_from(url);
        }
        if let Some(url) = &self.telegram_url {
            settings.telegram_base_url.clone_from(url);
        }
        if let Some(ms) = self.fragment_timeout {
            settings.fragment_timeout_ms = ms;
        }
        if let Some(ms) = self.telegram_timeout {
            settings.telegram_timeout_ms = ms;
        }
        if let Some(attempts) = self.retries {
            let delay = Duration::from_millis(settings.retry.delay_ms);
            settings.retry = RetryPolicy::fixed(attempts, delay);
        }
        if self.no_telegram_on_error {
            settings.fallback.on_error = ErrorPolicy::Stop;
        }
        if self.confirm_absence {
            for status in [UsernameStatus::NotOnFragment, UsernameStatus::NotFound] {
                if !settings.fallback.confirm_with_telegram.contains(&status) {
                    settings.fallback.confirm_with_telegram.push(status);
                }
            }
        }
        settings
    }
}

async fn read_settings_file(path: &Path) -> Result<ProbeSettings> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    debug!(path = %path.display(), "Loaded settings file");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_defaults() {
        let settings = ProbeArgs::default().apply(ProbeSettings::default());
        assert_eq!(settings, ProbeSettings::default());
    }

    #[test]
    fn test_flags_override() {
        let args = ProbeArgs {
            min_length: Some(5),
            fragment_mode: Some(FragmentMode::Web),
            fragment_url: Some("http://localhost:9000".into()),
            telegram_timeout: Some(1_000),
            retries: Some(1),
            no_telegram_on_error: true,
            confirm_absence: true,
            ..ProbeArgs::default()
        };
        let settings = args.apply(ProbeSettings::default());

        assert_eq!(settings.min_length, 5);
        assert_eq!(settings.fragment_mode, FragmentMode::Web);
        assert_eq!(settings.fragment_base(), "http://localhost:9000");
        assert_eq!(settings.telegram_timeout(), Duration::from_secs(1));
        assert_eq!(settings.retry.attempts(), 1);
        assert_eq!(settings.fallback.on_error, ErrorPolicy::Stop);
        assert_eq!(settings.fallback.confirm_with_telegram.len(), 2);
    }

    #[tokio::test]
    async fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("tgcheck-config-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"min_length": 3, "fragment_mode": "api"}"#)
            .await
            .unwrap();

        let args = ProbeArgs {
            config: Some(path.clone()),
            min_length: Some(4),
            ..ProbeArgs::default()
        };
        let settings = args.load().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(settings.min_length, 4);
        assert_eq!(settings.fragment_mode, FragmentMode::Api);
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let args = ProbeArgs {
            config: Some(PathBuf::from("/nonexistent/tgcheck.json")),
            ..ProbeArgs::default()
        };
        let err = args.load().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
