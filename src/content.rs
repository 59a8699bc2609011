//! src/content.rs
//!
//! The site's static catalog: training resources and the Field Notes
//! newsletter archive. Both live in memory and never change at runtime.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ClinicalSkills,
    CulturalCompetence,
    Documentation,
    Career,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ClinicalSkills,
        Category::CulturalCompetence,
        Category::Documentation,
        Category::Career,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::ClinicalSkills => "clinical-skills",
            Category::CulturalCompetence => "cultural-competence",
            Category::Documentation => "documentation",
            Category::Career => "career",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::ClinicalSkills => "Clinical Skills",
            Category::CulturalCompetence => "Cultural Competence",
            Category::Documentation => "Documentation",
            Category::Career => "Career Development",
        }
    }
}

/// Category filter as selected on the resources page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl TryFrom<&str> for CategoryFilter {
    type Error = String;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        if id == "all" {
            return Ok(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.id() == id)
            .map(CategoryFilter::Only)
            .ok_or_else(|| format!("{} is not a resource category.", id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Pdf,
    Article,
    External,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub meta: &'static str,
    pub featured: bool,
}

impl Resource {
    fn matches(&self, filter: CategoryFilter, needle: &str) -> bool {
        let in_category = match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => self.category == category,
        };
        in_category
            && (self.title.to_lowercase().contains(needle)
                || self.description.to_lowercase().contains(needle))
    }
}

/// Resources in `filter` whose title or description contains `query`,
/// ignoring case. An empty query matches everything.
pub fn search_resources(filter: CategoryFilter, query: &str) -> Vec<&'static Resource> {
    let needle = query.trim().to_lowercase();
    RESOURCES
        .iter()
        .filter(|resource| resource.matches(filter, &needle))
        .collect()
}

pub fn featured_resources() -> Vec<&'static Resource> {
    RESOURCES.iter().filter(|resource| resource.featured).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Readable by everyone
    Preview,
    Subscribers,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNote {
    pub issue: u32,
    pub slug: &'static str,
    pub date: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub read_time: &'static str,
    pub access: Access,
    pub topics: &'static [&'static str],
}

/// Newest issue first.
pub fn field_notes() -> Vec<&'static FieldNote> {
    let mut notes: Vec<_> = FIELD_NOTES.iter().collect();
    notes.sort_by(|a, b| b.issue.cmp(&a.issue));
    notes
}

pub fn field_note(slug: &str) -> Option<&'static FieldNote> {
    FIELD_NOTES.iter().find(|note| note.slug == slug)
}

static RESOURCES: [Resource; 9] = [
    Resource {
        kind: ResourceKind::Video,
        title: "Cultural Assessment Framework",
        description: "15-minute walkthrough of the assessment process used with every client. Covers key questions, common pitfalls, and how to document cultural factors effectively.",
        category: Category::CulturalCompetence,
        meta: "15 min",
        featured: true,
    },
    Resource {
        kind: ResourceKind::Pdf,
        title: "Clinical Documentation Checklist",
        description: "Essential elements for progress notes, treatment plans, and assessment reports. What to include, what to skip, and how to write efficiently.",
        category: Category::Documentation,
        meta: "8 pages",
        featured: true,
    },
    Resource {
        kind: ResourceKind::Article,
        title: "Supervision: What to Expect",
        description: "How supervision works at SCTC: structure, expectations, feedback process, and how we support your growth as a clinician.",
        category: Category::ClinicalSkills,
        meta: "6 min read",
        featured: false,
    },
    Resource {
        kind: ResourceKind::Video,
        title: "Writing Culturally Responsive Reports",
        description: "How to integrate cultural formulation into your clinical documentation without it feeling like an add-on or checkbox exercise.",
        category: Category::CulturalCompetence,
        meta: "22 min",
        featured: false,
    },
    Resource {
        kind: ResourceKind::Pdf,
        title: "APPIC Application Timeline",
        description: "Month-by-month guide to the internship application process. When to reach out to sites, what to prepare, and how to stay organized.",
        category: Category::Career,
        meta: "6 pages",
        featured: false,
    },
    Resource {
        kind: ResourceKind::Article,
        title: "Common Assessment Mistakes",
        description: "The errors seen most often in student reports and how to avoid them. From diagnostic reasoning to cultural blind spots.",
        category: Category::ClinicalSkills,
        meta: "8 min read",
        featured: false,
    },
    Resource {
        kind: ResourceKind::External,
        title: "APA Multicultural Guidelines",
        description: "Official guidelines for integrating cultural considerations into psychological practice. Essential reading for all trainees.",
        category: Category::CulturalCompetence,
        meta: "External link",
        featured: false,
    },
    Resource {
        kind: ResourceKind::Pdf,
        title: "Interview Preparation Guide",
        description: "What training sites are really asking when they interview you, and how to prepare answers that show clinical maturity.",
        category: Category::Career,
        meta: "10 pages",
        featured: false,
    },
    Resource {
        kind: ResourceKind::Video,
        title: "Clinical Formulation Workshop",
        description: "How to think through a case from assessment data to treatment recommendations. Includes two worked examples.",
        category: Category::ClinicalSkills,
        meta: "28 min",
        featured: false,
    },
];

static FIELD_NOTES: [FieldNote; 4] = [
    FieldNote {
        issue: 1,
        slug: "writing-your-first-assessment-report",
        date: "March 2026",
        title: "Writing Your First Assessment Report",
        excerpt: "The structure, language, and thinking process that goes into clinical documentation that supervisors trust.",
        read_time: "7 min read",
        access: Access::Preview,
        topics: &["Clinical Skills", "Documentation"],
    },
    FieldNote {
        issue: 2,
        slug: "cultural-formulation-in-practice",
        date: "April 2026",
        title: "Cultural Formulation in Practice",
        excerpt: "Moving beyond theoretical frameworks to actual clinical application, with case examples and common pitfalls.",
        read_time: "8 min read",
        access: Access::Subscribers,
        topics: &["Cultural Competence", "Clinical Skills"],
    },
    FieldNote {
        issue: 3,
        slug: "understanding-training-site-culture",
        date: "May 2026",
        title: "Understanding Training Site Culture",
        excerpt: "Questions to ask during internship interviews that reveal whether a site will actually support your development.",
        read_time: "5 min read",
        access: Access::Subscribers,
        topics: &["Internship", "Career Advice"],
    },
    FieldNote {
        issue: 4,
        slug: "what-supervisors-actually-look-for",
        date: "June 2026",
        title: "What Supervisors Actually Look For",
        excerpt: "Beyond the credentials: how to demonstrate clinical judgment in your application materials and interviews.",
        read_time: "6 min read",
        access: Access::Subscribers,
        topics: &["Career Advice", "Applications"],
    },
];
