use crate::domain::{
    ApplicantName, DocumentKind, SubscriberEmail, UploadPolicy, UploadedDocument,
};

/// Raw, unvalidated content of the upload form.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    documents: Vec<UploadedDocument>,
}

impl ApplicationForm {
    pub fn new(applicant_name: impl Into<String>, applicant_email: impl Into<String>) -> Self {
        Self {
            applicant_name: Some(applicant_name.into()),
            applicant_email: Some(applicant_email.into()),
            documents: Vec::new(),
        }
    }

    /// Stores a document, replacing an earlier one of the same kind.
    /// Blank file inputs are ignored.
    pub fn add_document(&mut self, document: UploadedDocument) {
        if document.is_blank() {
            return;
        }
        self.documents.retain(|d| d.kind != document.kind);
        self.documents.push(document);
    }

    fn take_document(&mut self, kind: DocumentKind) -> Option<UploadedDocument> {
        let position = self.documents.iter().position(|d| d.kind == kind)?;
        Some(self.documents.swap_remove(position))
    }
}

/// A validated internship application: applicant details plus exactly one
/// PDF per `DocumentKind`, in `DocumentKind::ALL` order.
#[derive(Debug)]
pub struct ApplicationSubmission {
    name: ApplicantName,
    email: SubscriberEmail,
    documents: Vec<UploadedDocument>,
}

impl ApplicationSubmission {
    pub fn parse(
        mut form: ApplicationForm,
        policy: &UploadPolicy,
    ) -> Result<ApplicationSubmission, String> {
        let (name, email) = match (
            non_blank(form.applicant_name.take()),
            non_blank(form.applicant_email.take()),
        ) {
            (Some(name), Some(email)) => (name, email),
            _ => return Err("Name and email are required.".into()),
        };

        let documents = DocumentKind::ALL
            .into_iter()
            .map(|kind| form.take_document(kind))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| "All four documents are required.".to_string())?;

        for document in &documents {
            policy.check(document)?;
        }

        Ok(Self {
            name: ApplicantName::parse(name)?,
            email: SubscriberEmail::parse(email)?,
            documents,
        })
    }

    pub fn name(&self) -> &ApplicantName {
        &self.name
    }

    pub fn email(&self) -> &SubscriberEmail {
        &self.email
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    /// File name of the attachment forwarded to staff,
    /// e.g. `cover-letter-jane-doe.pdf`.
    pub fn attachment_name(&self, kind: DocumentKind) -> String {
        format!("{}-{}.pdf", kind.attachment_prefix(), self.name.slug())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
