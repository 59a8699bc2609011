/// Where a subscriber stands in their career, as picked on the signup form.
/// Stored on the mailing list as the `JOURNEY` merge field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyStage {
    /// Undergrad or early grad school
    Exploring,
    /// Preparing internship applications
    Applying,
    /// Seeking post-doc or supervision hours
    Postdoc,
    /// Licensed professional seeking consultation
    Licensed,
}

impl JourneyStage {
    pub const ALL: [JourneyStage; 4] = [
        JourneyStage::Exploring,
        JourneyStage::Applying,
        JourneyStage::Postdoc,
        JourneyStage::Licensed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyStage::Exploring => "exploring",
            JourneyStage::Applying => "applying",
            JourneyStage::Postdoc => "postdoc",
            JourneyStage::Licensed => "licensed",
        }
    }
}

impl TryFrom<String> for JourneyStage {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("{} is not a recognised journey stage.", s))
    }
}
