//! src/configuration.rs

use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::{SubscriberEmail, UploadPolicy};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub mailing_list: MailingListSettings,
    // The webhook is optional, an empty section (or no url) disables it.
    #[serde(default)]
    pub webhook: WebhookSettings,
    pub uploads: UploadSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    // Public site url, used to build links inside outgoing emails
    pub base_url: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    // Sender of the staff notification, e.g. `SCTC Applications <applications@example.com>`
    pub applications_sender: String,
    // Sender of the applicant confirmation
    pub confirmation_sender: String,
    pub staff_email: String,
}

impl EmailClientSettings {
    pub fn staff(&self) -> Result<SubscriberEmail, String> {
        SubscriberEmail::parse(self.staff_email.clone())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct MailingListSettings {
    // e.g. `https://us21.api.mailchimp.com`
    pub base_url: String,
    pub api_key: Secret<String>,
    pub list_id: String,
    pub signup_tag: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl MailingListSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct WebhookSettings {
    pub url: Option<String>,
    #[serde(
        default = "default_webhook_timeout",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_milliseconds: u64,
}

fn default_webhook_timeout() -> u64 {
    5_000
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_milliseconds: default_webhook_timeout(),
        }
    }
}

impl WebhookSettings {
    /// The configured url, treating a blank value as "not configured".
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct UploadSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_file_size_bytes: usize,
    // Check the `%PDF-` signature on top of the declared content type
    #[serde(default)]
    pub verify_pdf_signature: bool,
}

impl UploadSettings {
    pub fn policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_file_size_bytes: self.max_file_size_bytes,
            verify_pdf_signature: self.verify_pdf_signature,
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir()
        .expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    settings.merge(
        config::File::from(configuration_directory.join("base")).required(true),
    )?;
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str()))
            .required(true),
    )?;

    // Add in settings from environment variables (with a prefix of APP and '__' as separator)
    // E.g. `APP_EMAIL_CLIENT__API_KEY=re_123` would set `Settings.email_client.api_key`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(a: String) -> Result<Self, Self::Error> {
        match a.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!("{} is not supported environment. Use either 'Local' or 'Production'.", other)),
        }
    }
}
