use tracing::{debug, warn};

use crate::error::Result;
use crate::remote::types::{QuestionsEnvelope, RemoteQuestion};
use crate::remote::{decode, SurveyTransport, GET_SURVEY_PATH};

use super::types::{SurveyQuestion, CLIENT_SURVEY_IDENTIFIER};

/// Questions rendered for both survey variants.
pub const STANDARD_QUESTION_SLUGS: [&str; 2] = ["score", "comment"];

pub struct QuestionFetcher<'a> {
    transport: &'a dyn SurveyTransport,
}

impl<'a> QuestionFetcher<'a> {
    pub fn new(transport: &'a dyn SurveyTransport) -> Self {
        Self { transport }
    }

    /// Any failure degrades to an empty list.
    pub fn fetch_questions(&self, identifier: &str) -> Vec<SurveyQuestion> {
        self.try_fetch_questions(identifier).unwrap_or_else(|err| {
            warn!(identifier, error = %err, "unable to fetch survey questions");
            Vec::new()
        })
    }

    pub fn try_fetch_questions(&self, identifier: &str) -> Result<Vec<SurveyQuestion>> {
        let response = self
            .transport
            .get(GET_SURVEY_PATH, &[("identifier", identifier)])?;
        let envelope: QuestionsEnvelope = decode(&response)?;
        let questions = envelope
            .data
            .questions
            .into_iter()
            .filter_map(|raw| {
                let q = match serde_json::from_value::<RemoteQuestion>(raw) {
                    Ok(q) => q,
                    Err(err) => {
                        debug!(error = %err, "skipping unreadable survey question");
                        return None;
                    }
                };
                let slug = q.slug?;
                Some(SurveyQuestion {
                    slug,
                    rules: q.rules,
                })
            })
            .collect();
        Ok(questions)
    }

    pub fn standard_questions(&self) -> Vec<SurveyQuestion> {
        let all = self.fetch_questions(CLIENT_SURVEY_IDENTIFIER);
        select_by_slug(&all, &STANDARD_QUESTION_SLUGS)
    }
}

pub fn select_by_slug(all: &[SurveyQuestion], wanted: &[&str]) -> Vec<SurveyQuestion> {
    all.iter()
        .filter(|q| wanted.contains(&q.slug.as_str()))
        .cloned()
        .collect()
}
