use actix_web::web::Bytes;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

// Every PDF file starts with this header
const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// The four documents an internship application is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    CoverLetter,
    Resume,
    Application,
    AvailabilityForm,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::CoverLetter,
        DocumentKind::Resume,
        DocumentKind::Application,
        DocumentKind::AvailabilityForm,
    ];

    /// Name of the multipart field carrying the document.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentKind::CoverLetter => "coverLetter",
            DocumentKind::Resume => "resume",
            DocumentKind::Application => "application",
            DocumentKind::AvailabilityForm => "availabilityForm",
        }
    }

    pub fn from_field_name(name: &str) -> Option<DocumentKind> {
        Self::ALL.into_iter().find(|kind| kind.field_name() == name)
    }

    /// Prefix of the attachment file name sent to the staff inbox.
    pub fn attachment_prefix(&self) -> &'static str {
        match self {
            DocumentKind::CoverLetter => "cover-letter",
            DocumentKind::Resume => "resume",
            DocumentKind::Application => "application",
            DocumentKind::AvailabilityForm => "availability-form",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::CoverLetter => "Cover Letter",
            DocumentKind::Resume => "Resume / CV",
            DocumentKind::Application => "Completed Application",
            DocumentKind::AvailabilityForm => "Completed Availability Form",
        }
    }

    /// Label used in the webhook payload.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::CoverLetter => "Cover Letter",
            DocumentKind::Resume => "Resume/CV",
            DocumentKind::Application => "Application",
            DocumentKind::AvailabilityForm => "Availability Form",
        }
    }
}

/// Limits applied to every uploaded document.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_file_size_bytes: usize,
    pub verify_pdf_signature: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            verify_pdf_signature: false,
        }
    }
}

impl UploadPolicy {
    /// Checks size, declared content type and (optionally) the file signature.
    pub fn check(&self, document: &UploadedDocument) -> Result<(), String> {
        if document.size > self.max_file_size_bytes {
            return Err(format!(
                "File \"{}\" exceeds the {} limit.",
                document.file_name,
                self.human_limit()
            ));
        }
        if document.content_type != PDF_CONTENT_TYPE {
            return Err(format!(
                "File \"{}\" must be a PDF.",
                document.file_name
            ));
        }
        if self.verify_pdf_signature && !document.content.starts_with(PDF_SIGNATURE)
        {
            return Err(format!(
                "File \"{}\" is not a valid PDF document.",
                document.file_name
            ));
        }
        Ok(())
    }

    fn human_limit(&self) -> String {
        const MIB: usize = 1024 * 1024;
        if self.max_file_size_bytes % MIB == 0 {
            format!("{}MB", self.max_file_size_bytes / MIB)
        } else {
            format!("{} bytes", self.max_file_size_bytes)
        }
    }
}

/// A file as received from the upload form.
///
/// `size` is the number of bytes the client sent. `content` stops growing
/// once the upload limit is exceeded, so it may be shorter than `size` for
/// oversized files (which are rejected anyway).
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub kind: DocumentKind,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    pub content: Bytes,
}

impl UploadedDocument {
    /// Browsers send an empty, nameless part for a file input left blank.
    pub fn is_blank(&self) -> bool {
        self.file_name.trim().is_empty() && self.size == 0
    }
}
