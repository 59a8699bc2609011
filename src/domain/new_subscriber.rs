use crate::domain::JourneyStage;
use crate::domain::SubscriberEmail;

#[derive(Debug)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub journey: JourneyStage,
}

impl NewSubscriber {
    pub fn parse(
        email: Option<String>,
        journey: Option<String>,
    ) -> Result<NewSubscriber, String> {
        let (email, journey) = match (non_blank(email), non_blank(journey)) {
            (Some(email), Some(journey)) => (email, journey),
            _ => return Err("Email and journey are required.".into()),
        };
        Ok(Self {
            email: SubscriberEmail::parse(email)?,
            journey: journey.try_into()?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
