mod applicant_name;
mod application_submission;
mod document;
mod journey_stage;
mod new_subscriber;
mod subscriber_email;

pub use applicant_name::ApplicantName;
pub use application_submission::*;
pub use document::*;
pub use journey_stage::JourneyStage;
pub use new_subscriber::NewSubscriber;
pub use subscriber_email::SubscriberEmail;
