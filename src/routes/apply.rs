mod templates;

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes, BytesMut};
use actix_web::{HttpResponse, ResponseError};
use anyhow::Context;
use chrono::Utc;
use futures_util::future::try_join_all;
use futures_util::TryStreamExt;

use crate::domain::{
    ApplicationForm, ApplicationSubmission, DocumentKind, UploadPolicy, UploadedDocument,
};
use crate::email_client::{Attachment, EmailClient, OutgoingEmail};
use crate::routes::{error_chain_fmt, ErrorBody};
use crate::startup::{ApplicationBaseUrl, ApplicationWebhook, Mailboxes};
use crate::telemetry::spawn_blocking_with_tracing;

// Upper bound for the applicant name and email fields
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

#[derive(thiserror::Error)]
pub enum ApplyError {
    #[error("{0}")]
    ValidationError(String),
    #[error("The submitted form could not be read.")]
    MalformedForm(#[source] MultipartError),
    #[error("Failed to process application. Please try again.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ApplyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApplyError::ValidationError(_) | ApplyError::MalformedForm(_) => {
                StatusCode::BAD_REQUEST
            }
            ApplyError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Only the top-level message reaches the client, never the cause chain
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<MultipartError> for ApplyError {
    fn from(e: MultipartError) -> Self {
        ApplyError::MalformedForm(e)
    }
}

#[tracing::instrument(
    name = "Receiving an internship application",
    skip_all,
    fields(
        applicant_name = tracing::field::Empty,
        applicant_email = tracing::field::Empty
    )
)]
pub async fn apply(
    payload: Multipart,
    policy: web::Data<UploadPolicy>,
    email_client: web::Data<EmailClient>,
    mailboxes: web::Data<Mailboxes>,
    base_url: web::Data<ApplicationBaseUrl>,
    webhook: web::Data<ApplicationWebhook>,
) -> Result<HttpResponse, ApplyError> {
    let form = read_application_form(payload, &policy).await?;
    let submission = ApplicationSubmission::parse(form, &policy)
        .map_err(ApplyError::ValidationError)?;

    let span = tracing::Span::current();
    span.record("applicant_name", &tracing::field::display(submission.name()));
    span.record("applicant_email", &tracing::field::display(submission.email()));

    let submitted_at = Utc::now();
    let attachments = encode_attachments(&submission).await?;

    let staff_email = mailboxes.staff.as_ref();
    email_client
        .send_email(&OutgoingEmail {
            from: &mailboxes.applications_sender,
            to: staff_email,
            subject: &templates::staff_subject(&submission),
            html: &templates::staff_notification(&submission, submitted_at),
            reply_to: Some(submission.email().as_ref()),
            attachments: &attachments,
        })
        .await
        .context("Failed to send the application to staff")?;

    email_client
        .send_email(&OutgoingEmail {
            from: &mailboxes.confirmation_sender,
            to: submission.email().as_ref(),
            subject: &templates::confirmation_subject(),
            html: &templates::confirmation(&submission, &base_url.0, staff_email),
            reply_to: None,
            attachments: &[],
        })
        .await
        .context("Failed to send the confirmation to the applicant")?;

    // The application has been delivered at this point, a failing webhook
    // only gets logged.
    if let Some(webhook) = &webhook.0 {
        if let Err(e) = webhook.notify(&submission, submitted_at).await {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to notify the application webhook"
            );
        }
    }

    tracing::info!("Application delivered");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// Base64-encodes the four documents in parallel, on the blocking pool.
#[tracing::instrument(name = "Encoding application documents", skip_all)]
async fn encode_attachments(
    submission: &ApplicationSubmission,
) -> Result<Vec<Attachment>, anyhow::Error> {
    let tasks = submission.documents().iter().map(|document| {
        let filename = submission.attachment_name(document.kind);
        let content = document.content.clone();
        spawn_blocking_with_tracing(move || Attachment::pdf(filename, &content))
    });
    try_join_all(tasks)
        .await
        .context("Failed to encode the uploaded documents")
}

#[tracing::instrument(name = "Reading the application form", skip_all)]
async fn read_application_form(
    mut payload: Multipart,
    policy: &UploadPolicy,
) -> Result<ApplicationForm, ApplyError> {
    let mut form = ApplicationForm::default();
    while let Some(mut field) = payload.try_next().await? {
        let content_disposition = field.content_disposition().clone();
        let field_name = content_disposition.get_name().unwrap_or_default();
        match field_name {
            "applicantName" => {
                form.applicant_name = Some(read_text(&mut field, field_name).await?)
            }
            "applicantEmail" => {
                form.applicant_email = Some(read_text(&mut field, field_name).await?)
            }
            other => match DocumentKind::from_field_name(other) {
                Some(kind) => {
                    let file_name =
                        content_disposition.get_filename().unwrap_or_default().to_string();
                    let content_type = field.content_type().essence_str().to_string();
                    let (size, content) =
                        read_capped(&mut field, policy.max_file_size_bytes).await?;
                    form.add_document(UploadedDocument {
                        kind,
                        file_name,
                        content_type,
                        size,
                        content,
                    });
                }
                None => {
                    tracing::debug!(field = other, "Ignoring unexpected form field");
                    read_capped(&mut field, 0).await?;
                }
            },
        }
    }
    Ok(form)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, ApplyError> {
    let (size, content) = read_capped(field, MAX_TEXT_FIELD_BYTES).await?;
    if size > MAX_TEXT_FIELD_BYTES {
        return Err(ApplyError::ValidationError(format!("{} is too long.", name)));
    }
    String::from_utf8(content.to_vec())
        .map_err(|_| ApplyError::ValidationError(format!("{} is not valid UTF-8.", name)))
}

/// Drains `field`, keeping at most `cap + 1` bytes of it.
/// Returns the full size of the field alongside the kept bytes.
async fn read_capped(
    field: &mut Field,
    cap: usize,
) -> Result<(usize, Bytes), MultipartError> {
    let mut size = 0;
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.try_next().await? {
        size += chunk.len();
        let room = (cap + 1).saturating_sub(buffer.len());
        buffer.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }
    Ok((size, buffer.freeze()))
}
