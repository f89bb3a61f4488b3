//! Fire-and-forget fan-out of a committed response to every wired channel.
//!
//! Each channel gets its own detached tokio task bounded by a timeout. Every
//! failure is caught and logged inside that task; callers may drop the
//! returned handles without losing anything they are expected to act on.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use reqwest::Client;
use shared::domain::Response;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use url::Url;

use crate::{
    channels::{ClientContext, NotificationChannel},
    config::{EmailChannelSettings, IssueChannelSettings, Settings},
    email_relay::{EmailRelayChannel, RelayAccount},
    error::DeliveryError,
    issue::IssueChannel,
};

/// Outcome of one channel's attempt. Only the admin panel and the logs ever
/// look at it.
#[derive(Debug)]
pub struct DeliveryReport {
    pub channel: &'static str,
    pub result: Result<(), DeliveryError>,
}

impl DeliveryReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            channels: Vec::new(),
            timeout,
        }
    }

    pub fn with_channel(mut self, channel: impl NotificationChannel + 'static) -> Self {
        self.channels.push(Arc::new(channel));
        self
    }

    /// Wires whichever channels the settings enable. A channel with an
    /// unusable endpoint or incomplete account is skipped with a warning.
    pub fn from_settings(settings: &Settings, context: ClientContext) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("lunch-invitation/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.dispatch_timeout())
            .build()
            .context("failed to build notification http client")?;

        let mut dispatcher = Self::new(settings.dispatch_timeout());
        if let Some(channel) = issue_channel(&settings.issue, &http, &context) {
            dispatcher = dispatcher.with_channel(channel);
        }
        if let Some(channel) = email_channel(&settings.email, &http, &context) {
            dispatcher = dispatcher.with_channel(channel);
        }

        info!(
            channels = ?dispatcher.channel_names(),
            timeout_secs = dispatcher.timeout.as_secs(),
            "notification dispatcher ready"
        );
        Ok(dispatcher)
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|channel| channel.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Spawns one detached delivery per channel and returns immediately.
    /// Must be called from within a tokio runtime.
    pub fn dispatch_detached(&self, response: &Response) -> Vec<JoinHandle<DeliveryReport>> {
        self.channels
            .iter()
            .map(|channel| {
                let channel = Arc::clone(channel);
                let response = response.clone();
                let timeout = self.timeout;
                tokio::spawn(async move { deliver(channel, response, timeout).await })
            })
            .collect()
    }
}

async fn deliver(
    channel: Arc<dyn NotificationChannel>,
    response: Response,
    timeout: Duration,
) -> DeliveryReport {
    let name = channel.name();
    let result = match tokio::time::timeout(timeout, channel.dispatch(&response)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::TimedOut {
            channel: name,
            timeout,
        }),
    };

    match &result {
        Ok(()) => info!(channel = name, answer = %response.answer(), "notification delivered"),
        Err(err) => warn!(channel = name, "notification dropped: {err}"),
    }
    DeliveryReport {
        channel: name,
        result,
    }
}

fn issue_channel(
    settings: &IssueChannelSettings,
    http: &Client,
    context: &ClientContext,
) -> Option<IssueChannel> {
    if !settings.enabled {
        return None;
    }
    let endpoint = parse_endpoint("issue", &settings.url)?;
    Some(IssueChannel::new(
        http.clone(),
        endpoint,
        settings.token.clone(),
        context.clone(),
    ))
}

fn email_channel(
    settings: &EmailChannelSettings,
    http: &Client,
    context: &ClientContext,
) -> Option<EmailRelayChannel> {
    if !settings.enabled {
        return None;
    }
    let endpoint = parse_endpoint("email", &settings.endpoint)?;
    let missing: Vec<&str> = [
        ("service_id", &settings.service_id),
        ("template_id", &settings.template_id),
        ("public_key", &settings.public_key),
        ("to_email", &settings.to_email),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        warn!(channel = "email", ?missing, "email relay enabled but not fully configured; skipping");
        return None;
    }

    Some(EmailRelayChannel::new(
        http.clone(),
        endpoint,
        RelayAccount {
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            public_key: settings.public_key.clone(),
            to_email: settings.to_email.clone(),
        },
        context.clone(),
    ))
}

fn parse_endpoint(channel: &'static str, raw: &str) -> Option<Url> {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(channel, scheme = url.scheme(), "unsupported endpoint scheme; skipping channel");
            None
        }
        Err(err) => {
            warn!(channel, "invalid endpoint '{raw}': {err}; skipping channel");
            None
        }
    }
}
