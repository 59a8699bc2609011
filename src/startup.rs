use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::{SubscriberEmail, UploadPolicy};
use crate::email_client::EmailClient;
use crate::mailing_list::MailingListClient;
use crate::routes::{
    apply, field_note, health_check, list_field_notes, list_resources, subscribe,
    ErrorBody,
};
use crate::webhook::WebhookClient;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    // We have converted the 'build' function into a constructor for
    // the 'Application' struct.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = EmailClient::new(
            configuration.email_client.base_url.clone(),
            configuration.email_client.api_key.clone(),
            configuration.email_client.timeout(),
        )?;

        let mailing_list = MailingListClient::new(
            configuration.mailing_list.base_url.clone(),
            configuration.mailing_list.api_key.clone(),
            configuration.mailing_list.list_id.clone(),
            configuration.mailing_list.signup_tag.clone(),
            configuration.mailing_list.timeout(),
        )?;

        let webhook = match configuration.webhook.url() {
            Some(url) => Some(WebhookClient::new(
                url.to_string(),
                configuration.webhook.timeout(),
            )?),
            None => {
                tracing::info!("no application webhook configured");
                None
            }
        };

        let mailboxes = Mailboxes {
            staff: configuration
                .email_client
                .staff()
                .map_err(anyhow::Error::msg)?,
            applications_sender: configuration.email_client.applications_sender,
            confirmation_sender: configuration.email_client.confirmation_sender,
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        tracing::info!("app started at: {}", listener.local_addr()?);
        let server = run(
            listener,
            email_client,
            mailing_list,
            ApplicationWebhook(webhook),
            mailboxes,
            configuration.uploads.policy(),
            configuration.application.base_url,
        )?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

// We need to define a wrapper type in order to retrieve the URL
// in the apply handler
// Retrieval from the context, in actix-web, is type based:
// using a raw String would expose us to conflicts
pub struct ApplicationBaseUrl(pub String);

/// The webhook notified for each application, when configured.
pub struct ApplicationWebhook(pub Option<WebhookClient>);

/// Addresses used when mailing an application around.
pub struct Mailboxes {
    pub staff: SubscriberEmail,
    pub applications_sender: String,
    pub confirmation_sender: String,
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    mailing_list: MailingListClient,
    webhook: ApplicationWebhook,
    mailboxes: Mailboxes,
    upload_policy: UploadPolicy,
    base_url: String,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let mailing_list = Data::new(mailing_list);
    let webhook = Data::new(webhook);
    let mailboxes = Data::new(mailboxes);
    let upload_policy = Data::new(upload_policy);
    let base_url = Data::new(ApplicationBaseUrl(base_url));
    let server = HttpServer::new(move || {
        App::new()
            // Middlewares are added using the `wrap` method on `App`
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(query_config())
            .route("/health_check", web::get().to(health_check))
            .route("/api/apply", web::post().to(apply))
            .route("/api/subscribe", web::post().to(subscribe))
            .route("/api/resources", web::get().to(list_resources))
            .route("/api/field-notes", web::get().to(list_field_notes))
            .route("/api/field-notes/{slug}", web::get().to(field_note))
            .app_data(email_client.clone())
            .app_data(mailing_list.clone())
            .app_data(webhook.clone())
            .app_data(mailboxes.clone())
            .app_data(upload_policy.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();
    // No .await here
    Ok(server)
}

// Malformed bodies get the same `{ "error": ... }` shape as our own errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: "Request body must be valid JSON.",
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: err.to_string(),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    })
}
