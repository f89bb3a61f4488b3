use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE_NAME: &str = "invitation.toml";
pub const DEFAULT_ISSUE_URL: &str = "https://api.github.com/repos/brajalf/invitacionnta/issues";
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
const DEFAULT_EMAIL_SERVICE_ID: &str = "service_6tjijy5";
const DEFAULT_EMAIL_TEMPLATE_ID: &str = "template_asv05s7";
const DEFAULT_EMAIL_PUBLIC_KEY: &str = "QF950Kd0ialrkapaS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub dispatch_timeout_secs: u64,
    pub admin_gesture_window_ms: u64,
    pub issue: IssueChannelSettings,
    pub email: EmailChannelSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            dispatch_timeout_secs: 5,
            admin_gesture_window_ms: 500,
            issue: IssueChannelSettings::default(),
            email: EmailChannelSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IssueChannelSettings {
    pub enabled: bool,
    pub url: String,
    pub token: Option<String>,
}

impl Default for IssueChannelSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_ISSUE_URL.into(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmailChannelSettings {
    pub enabled: bool,
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
}

impl Default for EmailChannelSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_EMAIL_ENDPOINT.into(),
            service_id: DEFAULT_EMAIL_SERVICE_ID.into(),
            template_id: DEFAULT_EMAIL_TEMPLATE_ID.into(),
            public_key: DEFAULT_EMAIL_PUBLIC_KEY.into(),
            to_email: String::new(),
        }
    }
}

impl Settings {
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs.max(1))
    }

    pub fn admin_gesture_window(&self) -> Duration {
        Duration::from_millis(self.admin_gesture_window_ms.max(50))
    }

    /// Directory holding the response slot: the configured override, or the
    /// per-user local data directory.
    pub fn resolve_data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_local_dir()
            .context("unable to resolve local app data dir; set INVITATION_DATA_DIR")?;
        Ok(base.join("lunch_invitation"))
    }
}

/// Loads settings from `INVITATION_CONFIG` (or `./invitation.toml`) and the
/// process environment.
pub fn load_settings() -> Settings {
    let path = std::env::var("INVITATION_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME));
    load_settings_from(&path, |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(path = %path.display(), "ignoring invalid config file: {err}");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };
    apply_env_overrides(&mut settings, env);
    settings
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let env = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = env("INVITATION_DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = env("INVITATION_DISPATCH_TIMEOUT_SECS").and_then(|v| parse_number(&v)) {
        settings.dispatch_timeout_secs = v;
    }
    if let Some(v) = env("INVITATION_ADMIN_WINDOW_MS").and_then(|v| parse_number(&v)) {
        settings.admin_gesture_window_ms = v;
    }

    if let Some(v) = env("INVITATION_ISSUE_ENABLED").and_then(|v| parse_flag(&v)) {
        settings.issue.enabled = v;
    }
    if let Some(v) = env("INVITATION_ISSUE_URL") {
        settings.issue.url = v;
    }
    if let Some(v) = env("INVITATION_ISSUE_TOKEN") {
        settings.issue.token = Some(v);
    }

    if let Some(v) = env("INVITATION_EMAIL_ENABLED").and_then(|v| parse_flag(&v)) {
        settings.email.enabled = v;
    }
    if let Some(v) = env("INVITATION_EMAIL_ENDPOINT") {
        settings.email.endpoint = v;
    }
    if let Some(v) = env("INVITATION_EMAIL_SERVICE_ID") {
        settings.email.service_id = v;
    }
    if let Some(v) = env("INVITATION_EMAIL_TEMPLATE_ID") {
        settings.email.template_id = v;
    }
    if let Some(v) = env("INVITATION_EMAIL_PUBLIC_KEY") {
        settings.email.public_key = v;
    }
    if let Some(v) = env("INVITATION_EMAIL_TO") {
        settings.email.to_email = v;
    }
}

fn parse_number(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("ignoring non-numeric override '{raw}': {err}");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("ignoring unrecognized boolean override '{other}'");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
