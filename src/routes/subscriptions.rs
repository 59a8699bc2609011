use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::domain::NewSubscriber;
use crate::mailing_list::{MailingListClient, MailingListError, SubscribeOutcome};
use crate::routes::{error_chain_fmt, ErrorBody};

// Both fields are optional so that a missing one is reported with our own
// message instead of a deserialization error.
#[derive(serde::Deserialize)]
pub struct SubscribeBody {
    email: Option<String>,
    journey: Option<String>,
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    MailingListError(#[from] MailingListError),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::MailingListError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            // The provider's problem document is passed through as is
            SubscribeError::MailingListError(MailingListError::Rejected {
                payload,
                ..
            }) if !payload.is_null() => response.json(ErrorBody { error: payload }),
            SubscribeError::MailingListError(MailingListError::Transport(_)) => {
                response.json(ErrorBody {
                    error: "Failed to reach the mailing list. Please try again.",
                })
            }
            other => response.json(ErrorBody {
                error: other.to_string(),
            }),
        }
    }
}

#[tracing::instrument(
    name = "Adding a new newsletter subscriber",
    skip(body, mailing_list),
    fields(
        subscriber_email = ?body.email,
        subscriber_journey = ?body.journey
    )
)]
pub async fn subscribe(
    body: web::Json<SubscribeBody>,
    mailing_list: web::Data<MailingListClient>,
) -> Result<HttpResponse, SubscribeError> {
    let SubscribeBody { email, journey } = body.into_inner();
    let new_subscriber =
        NewSubscriber::parse(email, journey).map_err(SubscribeError::ValidationError)?;

    let outcome = mailing_list.add_member(&new_subscriber).await?;
    // Signing up twice looks the same to the visitor
    if outcome == SubscribeOutcome::AlreadySubscribed {
        tracing::info!("Subscriber was already on the mailing list");
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully subscribed!"
    })))
}
