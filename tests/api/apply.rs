use crate::helpers::{
    application_form, application_form_named, application_form_with, document, pdf, spawn_app,
    spawn_app_without_webhook, SITE_URL, STAFF_EMAIL, MB, WEBHOOK_PATH,
};
use reqwest::multipart::Form;
use serde_json::Value;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn apply_returns_success_for_a_complete_application() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_application(application_form()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn staff_receive_the_four_documents_named_after_the_applicant() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // Act
    app.post_application(application_form())
        .await
        .error_for_status()
        .unwrap();

    // Assert
    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 2);
    let staff_email = &emails[0];
    assert_eq!(staff_email["to"], STAFF_EMAIL);
    assert_eq!(staff_email["reply_to"], "jane@x.edu");
    assert_eq!(staff_email["subject"], "New Internship Application — Jane Doe");
    let attachment_names: Vec<_> = staff_email["attachments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["filename"].as_str().unwrap())
        .collect();
    assert_eq!(
        attachment_names,
        vec![
            "cover-letter-jane-doe.pdf",
            "resume-jane-doe.pdf",
            "application-jane-doe.pdf",
            "availability-form-jane-doe.pdf",
        ]
    );
    // The original file names are listed in the body
    assert!(staff_email["html"].as_str().unwrap().contains("coverLetter.pdf"));
}

#[tokio::test]
async fn names_with_punctuation_are_accepted_and_slugged_for_attachments() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;
    let test_cases = vec![
        ("Jane \"JD\" Doe", "cover-letter-jane-jd-doe.pdf"),
        ("Jane {Doe}", "cover-letter-jane-{doe}.pdf"),
        ("Jane Doe/Smith", "cover-letter-jane-doe-smith.pdf"),
    ];

    for (name, attachment) in test_cases {
        // Act
        let response = app.post_application(application_form_named(name)).await;

        // Assert
        assert_eq!(
            200,
            response.status().as_u16(),
            "The API rejected the applicant name {}.",
            name
        );
        let emails = app.sent_emails().await;
        let staff_email = &emails[emails.len() - 2];
        assert_eq!(
            staff_email["subject"],
            format!("New Internship Application — {}", name)
        );
        assert_eq!(staff_email["attachments"][0]["filename"], attachment);
    }
}

#[tokio::test]
async fn applicant_receives_a_confirmation_without_attachments() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // Act
    app.post_application(application_form())
        .await
        .error_for_status()
        .unwrap();

    // Assert
    let emails = app.sent_emails().await;
    let confirmation = &emails[1];
    assert_eq!(confirmation["to"], "jane@x.edu");
    assert!(confirmation.get("attachments").is_none());
    assert!(confirmation.get("reply_to").is_none());

    let html = confirmation["html"].as_str().unwrap();
    let links: Vec<_> = linkify::LinkFinder::new()
        .links(html)
        .filter(|l| *l.kind() == linkify::LinkKind::Url)
        .map(|l| l.as_str().to_owned())
        .filter(|l| l.contains("#field-notes"))
        .collect();
    assert_eq!(links, vec![format!("{}/#field-notes", SITE_URL)]);
}

#[tokio::test]
async fn apply_returns_400_when_name_or_email_is_missing() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    let with_documents = |form: Form| {
        let mut form = form;
        for field in ["coverLetter", "resume", "application", "availabilityForm"] {
            form = form.part(field, pdf("doc.pdf", 1024));
        }
        form
    };
    let test_cases = vec![
        (Form::new().text("applicantEmail", "jane@x.edu"), "missing name"),
        (Form::new().text("applicantName", "Jane Doe"), "missing email"),
        (
            Form::new()
                .text("applicantName", "   ")
                .text("applicantEmail", "jane@x.edu"),
            "blank name",
        ),
        (Form::new(), "missing both"),
    ];

    for (form, description) in test_cases {
        // Act
        let response = app.post_application(with_documents(form)).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        assert_eq!(error_message(response).await, "Name and email are required.");
    }
}

#[tokio::test]
async fn apply_returns_400_when_any_document_is_missing() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for missing in ["coverLetter", "resume", "application", "availabilityForm"] {
        let form = application_form_with(|field| {
            (field != missing).then(|| pdf("doc.pdf", 1024))
        });

        // Act
        let response = app.post_application(form).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when {} was missing.",
            missing
        );
        assert_eq!(
            error_message(response).await,
            "All four documents are required."
        );
    }
}

#[tokio::test]
async fn an_empty_file_input_counts_as_missing() {
    // Arrange
    let app = spawn_app().await;
    let form = application_form_with(|field| {
        if field == "resume" {
            // What browsers send for a file input left blank
            Some(
                reqwest::multipart::Part::bytes(Vec::new())
                    .file_name("")
                    .mime_str("application/octet-stream")
                    .unwrap(),
            )
        } else {
            Some(pdf("doc.pdf", 1024))
        }
    });

    // Act
    let response = app.post_application(form).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        error_message(response).await,
        "All four documents are required."
    );
}

#[tokio::test]
async fn apply_rejects_a_document_over_10mb_by_name() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    let form = application_form_with(|field| {
        if field == "application" {
            Some(pdf("huge-application.pdf", 10 * MB + 1))
        } else {
            Some(pdf("doc.pdf", 1024))
        }
    });

    // Act
    let response = app.post_application(form).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let message = error_message(response).await;
    assert!(message.contains("huge-application.pdf"), "{}", message);
    assert!(message.contains("10MB limit"), "{}", message);
}

#[tokio::test]
async fn apply_accepts_a_document_of_exactly_10mb() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;
    let form = application_form_with(|field| {
        if field == "resume" {
            Some(pdf("resume.pdf", 10 * MB))
        } else {
            Some(pdf("doc.pdf", 1024))
        }
    });

    // Act
    let response = app.post_application(form).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn apply_rejects_a_document_that_is_not_a_pdf_by_name() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    let form = application_form_with(|field| {
        if field == "coverLetter" {
            Some(document("cover-letter.docx", 1024, "application/msword"))
        } else {
            Some(pdf("doc.pdf", 1024))
        }
    });

    // Act
    let response = app.post_application(form).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let message = error_message(response).await;
    assert!(message.contains("cover-letter.docx"), "{}", message);
    assert!(message.contains("PDF"), "{}", message);
}

#[tokio::test]
async fn apply_rejects_a_body_that_is_not_multipart() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client
        .post(&format!("{}/api/apply", &app.address))
        .json(&serde_json::json!({ "applicantName": "Jane Doe" }))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn apply_returns_500_and_skips_the_confirmation_if_staff_email_fails() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        // The confirmation must not go out
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.webhook_server)
        .await;

    // Act
    let response = app.post_application(application_form()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
    assert_eq!(
        error_message(response).await,
        "Failed to process application. Please try again."
    );
}

#[tokio::test]
async fn apply_returns_500_if_the_confirmation_fails() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_application(application_form()).await;

    // Assert
    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn configured_webhook_receives_an_application_summary() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;
    Mock::given(path(WEBHOOK_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.webhook_server)
        .await;

    // Act
    app.post_application(application_form())
        .await
        .error_for_status()
        .unwrap();

    // Assert
    let requests = app.webhook_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["applicantName"], "Jane Doe");
    assert_eq!(body["applicantEmail"], "jane@x.edu");
    assert!(body["submittedAt"].as_str().is_some());
    assert_eq!(
        body["documents"],
        serde_json::json!(["Cover Letter", "Resume/CV", "Application", "Availability Form"])
    );
}

#[tokio::test]
async fn a_failing_webhook_does_not_fail_the_application() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.webhook_server)
        .await;

    // Act
    let response = app.post_application(application_form()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn no_webhook_call_is_made_when_none_is_configured() {
    // Arrange
    let app = spawn_app_without_webhook().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.webhook_server)
        .await;

    // Act
    let response = app.post_application(application_form()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}
