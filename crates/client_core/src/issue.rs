use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use shared::{domain::Response, format};
use tracing::debug;
use url::Url;

use crate::{
    channels::{ClientContext, NotificationChannel},
    error::DeliveryError,
};

const CHANNEL_NAME: &str = "issue";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePayload {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

impl IssuePayload {
    pub fn from_response(response: &Response, context: &ClientContext) -> Self {
        let answer = response.answer();
        let fecha = format::format_es_local(response.timestamp());
        let title = format!("💖 Respuesta: {} - {fecha}", format::short_label(answer));
        let body = format!(
            "## 💝 Nueva Respuesta Recibida\n\n\
             **🗳️ Respuesta:** {answer_line}\n\n\
             **📅 Fecha y Hora:** {fecha}\n\n\
             **💬 Mensaje:** {message}\n\n\
             **🔍 Detalles Técnicos:**\n\
             - Timestamp: {timestamp}\n\
             - Cliente: {client_id}\n\
             - Idioma: {locale}\n\n\
             ---\n\
             *Esta respuesta fue enviada automáticamente desde la página de invitación especial* 💕",
            answer_line = format::issue_answer_line(answer),
            message = response.message(),
            timestamp = response.timestamp_iso(),
            client_id = context.client_id,
            locale = context.locale,
        );

        Self {
            title,
            body,
            labels: vec![
                format::answer_issue_label(answer).to_string(),
                format::INVITATION_LABEL.to_string(),
            ],
        }
    }
}

/// Files each committed response as an issue on a tracker endpoint.
pub struct IssueChannel {
    http: Client,
    endpoint: Url,
    token: Option<String>,
    context: ClientContext,
}

impl IssueChannel {
    pub fn new(http: Client, endpoint: Url, token: Option<String>, context: ClientContext) -> Self {
        Self {
            http,
            endpoint,
            token,
            context,
        }
    }
}

#[async_trait]
impl NotificationChannel for IssueChannel {
    fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    async fn dispatch(&self, response: &Response) -> Result<(), DeliveryError> {
        let payload = IssuePayload::from_response(response, &self.context);
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let reply = request.send().await.map_err(|source| DeliveryError::Transport {
            channel: CHANNEL_NAME,
            source,
        })?;

        let status = reply.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                channel: CHANNEL_NAME,
                status: status.as_u16(),
            });
        }
        debug!(channel = CHANNEL_NAME, status = status.as_u16(), "issue created");
        Ok(())
    }
}
