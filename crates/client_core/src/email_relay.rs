use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use shared::{domain::Response, format};
use tracing::debug;
use url::Url;

use crate::{
    channels::{ClientContext, NotificationChannel},
    error::DeliveryError,
};

const CHANNEL_NAME: &str = "email";

/// Pre-provisioned relay identifiers plus the operator's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayAccount {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelaySubmission {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: BTreeMap<String, String>,
}

impl RelaySubmission {
    pub fn from_response(
        response: &Response,
        account: &RelayAccount,
        context: &ClientContext,
        sent_at: DateTime<Utc>,
    ) -> Self {
        let answer = response.answer();
        let template_params = BTreeMap::from([
            ("to_email".to_string(), account.to_email.clone()),
            (
                "respuesta".to_string(),
                format::email_answer_label(answer).to_string(),
            ),
            ("mensaje".to_string(), response.message().to_string()),
            (
                "fecha".to_string(),
                format::format_es_local(response.timestamp()),
            ),
            ("dispositivo".to_string(), context.truncated_client_id()),
            ("timestamp_raw".to_string(), response.timestamp_iso()),
            ("created_at".to_string(), format::format_es_local(sent_at)),
        ]);

        Self {
            service_id: account.service_id.clone(),
            template_id: account.template_id.clone(),
            user_id: account.public_key.clone(),
            template_params,
        }
    }
}

/// Mails each committed response through a template-based email relay.
pub struct EmailRelayChannel {
    http: Client,
    endpoint: Url,
    account: RelayAccount,
    context: ClientContext,
}

impl EmailRelayChannel {
    pub fn new(http: Client, endpoint: Url, account: RelayAccount, context: ClientContext) -> Self {
        Self {
            http,
            endpoint,
            account,
            context,
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailRelayChannel {
    fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    async fn dispatch(&self, response: &Response) -> Result<(), DeliveryError> {
        let submission =
            RelaySubmission::from_response(response, &self.account, &self.context, Utc::now());
        let reply = self
            .http
            .post(self.endpoint.clone())
            .json(&submission)
            .send()
            .await
            .map_err(|source| DeliveryError::Transport {
                channel: CHANNEL_NAME,
                source,
            })?;

        let status = reply.status();
        if status != StatusCode::OK {
            let body = reply.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                channel: CHANNEL_NAME,
                status: status.as_u16(),
                body,
            });
        }
        debug!(channel = CHANNEL_NAME, "relay accepted email");
        Ok(())
    }
}
