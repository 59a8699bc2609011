//! src/mailing_list.rs
//!
//! Client for the mailing-list provider (Mailchimp marketing API, v3).

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::NewSubscriber;

// Mailchimp accepts any username alongside the API key
const BASIC_AUTH_USER: &str = "anystring";
const MEMBER_EXISTS: &str = "Member Exists";

pub struct MailingListClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    list_id: String,
    signup_tag: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(thiserror::Error, Debug)]
pub enum MailingListError {
    #[error("The mailing list rejected the new member ({status}).")]
    Rejected {
        status: StatusCode,
        payload: serde_json::Value,
    },
    #[error("Failed to reach the mailing list.")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct AddMemberRequest<'a> {
    email_address: &'a str,
    status: &'a str,
    merge_fields: MergeFields<'a>,
    tags: [&'a str; 1],
}

#[derive(Serialize)]
struct MergeFields<'a> {
    #[serde(rename = "JOURNEY")]
    journey: &'a str,
}

impl MailingListClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        list_id: String,
        signup_tag: String,
        timeout: std::time::Duration,
    ) -> Result<MailingListClient, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
            list_id,
            signup_tag,
        })
    }

    /// Adds a subscribed member to the list, tagged and carrying the journey
    /// stage as a merge field. Adding an existing member is not an error.
    #[tracing::instrument(
        name = "Adding a member to the mailing list",
        skip_all,
        fields(list_id = %self.list_id)
    )]
    pub async fn add_member(
        &self,
        subscriber: &NewSubscriber,
    ) -> Result<SubscribeOutcome, MailingListError> {
        let url = format!("{}/3.0/lists/{}/members", self.base_url, self.list_id);
        let request_body = AddMemberRequest {
            email_address: subscriber.email.as_ref(),
            status: "subscribed",
            merge_fields: MergeFields {
                journey: subscriber.journey.as_str(),
            },
            tags: [self.signup_tag.as_str()],
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(BASIC_AUTH_USER, Some(self.api_key.expose_secret()))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(SubscribeOutcome::Subscribed);
        }

        // Error bodies are problem documents: {type, title, status, detail, instance}
        let payload = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        if status == StatusCode::BAD_REQUEST && payload["title"] == MEMBER_EXISTS {
            tracing::info!("Member is already on the list");
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }
        Err(MailingListError::Rejected { status, payload })
    }
}
