use super::types::SurveyKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPresentation {
    pub control: String,
    pub title: String,
}

/// Slug to presentation lookup. Hosts with translated copy plug in their own.
pub trait QuestionCatalog {
    fn presentation(&self, slug: &str, kind: SurveyKind) -> Option<QuestionPresentation>;
}

struct CatalogEntry {
    slug: &'static str,
    control: &'static str,
    question: &'static str,
    woo_question: &'static str,
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        slug: "score",
        control: "rating",
        question: "How would you rate your experience creating a website with the AI builder?",
        woo_question: "How would you rate your experience setting up your online store?",
    },
    CatalogEntry {
        slug: "comment",
        control: "comment",
        question: "What could we do to improve your experience?",
        woo_question: "What could we do to make setting up your store easier?",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl QuestionCatalog for DefaultCatalog {
    fn presentation(&self, slug: &str, kind: SurveyKind) -> Option<QuestionPresentation> {
        let entry = ENTRIES.iter().find(|e| e.slug == slug)?;
        let title = match kind {
            SurveyKind::Standard => entry.question,
            SurveyKind::WooOnboarding => entry.woo_question,
        };
        Some(QuestionPresentation {
            control: entry.control.to_string(),
            title: title.to_string(),
        })
    }
}
