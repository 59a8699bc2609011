//! src/webhook.rs
//!
//! Optional notification of a received application to an automation hook
//! (e.g. a Zapier catch hook filing the documents in a shared drive).

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::domain::{ApplicationSubmission, DocumentKind};

pub struct WebhookClient {
    http_client: Client,
    url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationReceived<'a> {
    applicant_name: &'a str,
    applicant_email: &'a str,
    submitted_at: String,
    documents: Vec<&'static str>,
}

impl WebhookClient {
    pub fn new(
        url: String,
        timeout: std::time::Duration,
    ) -> Result<WebhookClient, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client, url })
    }

    #[tracing::instrument(name = "Notifying the application webhook", skip_all)]
    pub async fn notify(
        &self,
        submission: &ApplicationSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<(), reqwest::Error> {
        let body = ApplicationReceived {
            applicant_name: submission.name().as_ref(),
            applicant_email: submission.email().as_ref(),
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            documents: DocumentKind::ALL.iter().map(DocumentKind::label).collect(),
        };

        self.http_client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
