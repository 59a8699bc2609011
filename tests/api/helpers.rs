use consortium::configuration::get_configuration;
use consortium::startup::Application;
use consortium::telemetry::{get_line_subscriber, get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use wiremock::MockServer;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the value of `TEST_LOG`
    // because the sink is part of the type returned by `get_subscriber`, therefore they are not the
    // same type. We could work around it, but this is the most straight-forward way of moving forward.

    match std::env::var("TEST_LOG") {
        Ok(v) => {
            if v == "json" {
                init_subscriber(get_subscriber(
                    subscriber_name,
                    default_filter_level,
                    std::io::stdout,
                ));
            } else {
                init_subscriber(get_line_subscriber(
                    default_filter_level,
                    std::io::stdout,
                ));
            }
        }
        _ => {
            let subscriber = get_subscriber(
                subscriber_name,
                default_filter_level,
                std::io::sink,
            );
            init_subscriber(subscriber);
        }
    };
});

pub const SITE_URL: &str = "https://sctc.example.com";
pub const STAFF_EMAIL: &str = "clive@sctc.example.com";
pub const WEBHOOK_PATH: &str = "/hooks/catch/applications";
pub const MB: usize = 1024 * 1024;

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub mailing_list_server: MockServer,
    pub webhook_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_application(&self, form: Form) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/apply", &self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_subscribe(&self, body: &Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/subscribe", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path_and_query))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Bodies of the requests received by the mock email provider, in order.
    pub async fn sent_emails(&self) -> Vec<Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn(true).await
}

pub async fn spawn_app_without_webhook() -> TestApp {
    spawn(false).await
}

async fn spawn(with_webhook: bool) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    // Launch mock servers to stand in for the third-party APIs
    let email_server = MockServer::start().await;
    let mailing_list_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    // Randomize configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("failed to read configuration.");
        // Use random port
        c.application.port = 0;
        c.application.base_url = SITE_URL.to_string();
        c.email_client.base_url = email_server.uri();
        c.email_client.staff_email = STAFF_EMAIL.to_string();
        c.mailing_list.base_url = mailing_list_server.uri();
        c.webhook.url = if with_webhook {
            Some(format!("{}{}", webhook_server.uri(), WEBHOOK_PATH))
        } else {
            None
        };
        c
    };

    // Launch the application as the background task
    let application = Application::build(configuration)
        .await
        .expect("failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        email_server,
        mailing_list_server,
        webhook_server,
        api_client: reqwest::Client::new(),
    }
}

/// A fake PDF of `size` bytes, starting with a genuine PDF header.
pub fn pdf(file_name: &str, size: usize) -> Part {
    document(file_name, size, "application/pdf")
}

pub fn document(file_name: &str, size: usize, content_type: &str) -> Part {
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(size, b'0');
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(content_type)
        .unwrap()
}

pub const DOCUMENT_FIELDS: [&str; 4] =
    ["coverLetter", "resume", "application", "availabilityForm"];

/// A complete, valid application: both text fields and four 2MB PDFs.
pub fn application_form() -> Form {
    application_form_with(|field| Some(pdf(&format!("{}.pdf", field), 2 * MB)))
}

/// Text fields for Jane Doe plus whatever `documents` returns for each of the
/// four document fields (`None` leaves the field out).
pub fn application_form_with(documents: impl Fn(&str) -> Option<Part>) -> Form {
    form_with("Jane Doe", documents)
}

/// A complete, valid application sent under `applicant_name`.
pub fn application_form_named(applicant_name: &str) -> Form {
    form_with(applicant_name, |field| {
        Some(pdf(&format!("{}.pdf", field), 1024))
    })
}

fn form_with(applicant_name: &str, documents: impl Fn(&str) -> Option<Part>) -> Form {
    let mut form = Form::new()
        .text("applicantName", applicant_name.to_string())
        .text("applicantEmail", "jane@x.edu");
    for field in DOCUMENT_FIELDS {
        if let Some(part) = documents(field) {
            form = form.part(field, part);
        }
    }
    form
}
