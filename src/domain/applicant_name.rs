use unicode_segmentation::UnicodeSegmentation;

// Longest slug that ends up in an attachment file name
const MAX_SLUG_GRAPHEMES: usize = 64;

#[derive(Debug, Clone)]
pub struct ApplicantName(String);

impl ApplicantName {
    /// Any non-blank name is accepted, surrounding whitespace is dropped.
    /// Markup is escaped where the name is rendered and `slug` makes it safe
    /// for file names, so no character is refused here.
    pub fn parse(s: String) -> Result<ApplicantName, String> {
        let s = s.trim();
        if s.is_empty() {
            Err("Applicant name cannot be empty.".to_string())
        } else {
            Ok(Self(s.to_string()))
        }
    }

    /// Lowercased, with every run of whitespace or characters that are not
    /// allowed in file names collapsed into a `-`:
    /// `Jane  Doe/Smith` becomes `jane-doe-smith`.
    pub fn slug(&self) -> String {
        let slug = self
            .0
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || is_unsafe_in_file_name(c))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        let slug: String = slug.graphemes(true).take(MAX_SLUG_GRAPHEMES).collect();
        match slug.trim_matches('-') {
            "" => "applicant".to_string(),
            slug => slug.to_string(),
        }
    }
}

fn is_unsafe_in_file_name(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

impl AsRef<str> for ApplicantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
