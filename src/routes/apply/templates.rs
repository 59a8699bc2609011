//! HTML bodies of the two emails sent for every application.

use chrono::{DateTime, Utc};
use htmlescape::encode_minimal;

use crate::domain::ApplicationSubmission;

pub const CONSORTIUM: &str = "South Central Training Consortium";

pub fn staff_subject(submission: &ApplicationSubmission) -> String {
    format!("New Internship Application — {}", submission.name())
}

pub fn confirmation_subject() -> String {
    format!("Application Received — {}", CONSORTIUM)
}

/// Sent to staff along with the four documents.
pub fn staff_notification(
    submission: &ApplicationSubmission,
    submitted_at: DateTime<Utc>,
) -> String {
    let name = encode_minimal(submission.name().as_ref());
    let email = encode_minimal(submission.email().as_ref());
    let submitted = submitted_at.format("%A, %B %-d, %Y, %I:%M %p UTC");
    let documents: String = submission
        .documents()
        .iter()
        .map(|document| {
            format!(
                r#"<li style="padding: 4px 0;">✅ {} — {}</li>"#,
                document.kind.display_name(),
                encode_minimal(&document.file_name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n              ");

    format!(
        r#"<div style="font-family: Georgia, serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: #3d3d3d; padding: 24px; border-radius: 12px 12px 0 0;">
    <h1 style="color: #e6b84d; margin: 0; font-size: 24px;">New Internship Application</h1>
    <p style="color: #f5f0e8; margin: 8px 0 0 0;">{consortium}</p>
  </div>
  <div style="background: #f5f0e8; padding: 24px; border-radius: 0 0 12px 12px;">
    <h2 style="color: #2d2d2d; margin-top: 0;">Applicant Details</h2>
    <table style="width: 100%; border-collapse: collapse;">
      <tr><td style="padding: 8px 0; width: 140px;">Name</td><td style="padding: 8px 0; font-weight: bold;">{name}</td></tr>
      <tr><td style="padding: 8px 0;">Email</td><td style="padding: 8px 0;"><a href="mailto:{email}">{email}</a></td></tr>
      <tr><td style="padding: 8px 0;">Submitted</td><td style="padding: 8px 0;">{submitted}</td></tr>
    </table>
    <h2 style="color: #2d2d2d; margin-top: 24px;">Documents Attached</h2>
    <ul style="padding-left: 20px;">
              {documents}
    </ul>
    <p style="margin-top: 24px; font-size: 14px;">
      Reply directly to this email to contact the applicant at <a href="mailto:{email}">{email}</a>
    </p>
  </div>
</div>"#,
        consortium = CONSORTIUM,
        name = name,
        email = email,
        submitted = submitted,
        documents = documents,
    )
}

/// Sent to the applicant, without attachments.
pub fn confirmation(
    submission: &ApplicationSubmission,
    site_base_url: &str,
    staff_email: &str,
) -> String {
    let name = encode_minimal(submission.name().as_ref());
    let field_notes_link = encode_minimal(&format!(
        "{}/#field-notes",
        site_base_url.trim_end_matches('/')
    ));
    let staff_email = encode_minimal(staff_email);
    let documents: String = submission
        .documents()
        .iter()
        .map(|document| {
            format!(
                r#"<li style="padding: 4px 0;">{}</li>"#,
                document.kind.display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<div style="font-family: Georgia, serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: #3d3d3d; padding: 24px; border-radius: 12px 12px 0 0; text-align: center;">
    <h1 style="color: #e6b84d; margin: 0; font-size: 24px;">Application Received!</h1>
    <p style="color: #f5f0e8; margin: 8px 0 0 0;">{consortium}</p>
  </div>
  <div style="background: #f5f0e8; padding: 32px; border-radius: 0 0 12px 12px;">
    <p style="font-size: 16px;">Dear {name},</p>
    <p style="line-height: 1.7;">
      Thank you for applying to the {consortium} Pre-Doctoral Internship Program.
      We have received your application and all supporting documents.
    </p>
    <h3 style="font-size: 16px;">Documents Received</h3>
    <ul style="padding-left: 20px; margin: 0;">
        {documents}
    </ul>
    <h3>What Happens Next</h3>
    <ol style="line-height: 1.9; padding-left: 20px;">
      <li>Our team will review your application within <strong>5-7 business days</strong></li>
      <li>If selected for an interview, you'll receive an email at this address</li>
      <li>Interviews are conducted via video call</li>
      <li>Final decisions are communicated by the end of the application cycle</li>
    </ol>
    <p style="line-height: 1.7; margin-top: 24px;">
      In the meantime, we invite you to subscribe to our <strong>Field Notes</strong> newsletter.
    </p>
    <div style="text-align: center; margin-top: 32px;">
      <a href="{field_notes_link}" style="background: #e6b84d; color: #2d2d2d; padding: 14px 32px; border-radius: 8px; text-decoration: none; font-weight: bold;">Read Field Notes</a>
    </div>
    <p style="font-size: 13px; margin-top: 32px;">
      Questions? Reply to this email or contact us at <a href="mailto:{staff_email}">{staff_email}</a>
    </p>
  </div>
</div>"#,
        consortium = CONSORTIUM,
        name = name,
        documents = documents,
        field_notes_link = field_notes_link,
        staff_email = staff_email,
    )
}
