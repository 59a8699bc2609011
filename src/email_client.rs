//! src/email_client.rs
//!
//! Client for the transactional email provider (Resend-style REST API).

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::PDF_CONTENT_TYPE;

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

/// A file attached to an outgoing email, already base64-encoded.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
    pub content_type: &'static str,
}

impl Attachment {
    pub fn pdf(filename: String, bytes: &[u8]) -> Self {
        Self {
            filename,
            content: base64::encode(bytes),
            content_type: PDF_CONTENT_TYPE,
        }
    }
}

#[derive(Debug)]
pub struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub html: &'a str,
    pub reply_to: Option<&'a str>,
    pub attachments: &'a [Attachment],
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "no_attachments")]
    attachments: &'a [Attachment],
}

fn no_attachments(attachments: &&[Attachment]) -> bool {
    attachments.is_empty()
}

impl EmailClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<EmailClient, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip_all,
        fields(
            email_subject = %email.subject,
            attachments = email.attachments.len()
        )
    )]
    pub async fn send_email(
        &self,
        email: &OutgoingEmail<'_>,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: email.from,
            to: email.to,
            subject: email.subject,
            html: email.html,
            reply_to: email.reply_to,
            attachments: email.attachments,
        };

        self.http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
