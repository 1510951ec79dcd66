pub mod catalog;
pub mod eligibility;
pub mod page;
pub mod questions;
pub mod schema;
pub mod submit;
pub mod types;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod testing;

use serde_json::Value;

use crate::error::Result;
use crate::remote::SurveyTransport;
use crate::store::SettingsStore;

use catalog::QuestionCatalog;
use eligibility::EligibilityChecker;
use page::RequestContext;
use questions::QuestionFetcher;
use schema::FormSchemaBuilder;
use submit::{AnswerSubmitter, SubmitOutcome};
use types::SurveyKind;

/// Request-scoped wiring of the survey components over explicit collaborators.
pub struct Surveys<'a> {
    settings: &'a dyn SettingsStore,
    transport: &'a dyn SurveyTransport,
    catalog: &'a dyn QuestionCatalog,
}

impl<'a> Surveys<'a> {
    pub fn new(
        settings: &'a dyn SettingsStore,
        transport: &'a dyn SurveyTransport,
        catalog: &'a dyn QuestionCatalog,
    ) -> Self {
        Self {
            settings,
            transport,
            catalog,
        }
    }

    pub fn eligibility(&self) -> EligibilityChecker<'a> {
        EligibilityChecker::new(self.settings, self.transport)
    }

    pub fn questions(&self) -> QuestionFetcher<'a> {
        QuestionFetcher::new(self.transport)
    }

    pub fn submitter(&self) -> AnswerSubmitter<'a> {
        AnswerSubmitter::new(self.settings, self.transport)
    }

    /// Form schema JSON for the given variant, built from the score and comment questions.
    pub fn survey_form(&self, kind: SurveyKind) -> Result<String> {
        let questions = self.questions().standard_questions();
        FormSchemaBuilder::new(self.catalog).build(&questions, kind)
    }

    pub fn submit<I, K>(&self, answers: I, kind: SurveyKind) -> Result<SubmitOutcome>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.submitter().submit(answers, kind)
    }

    /// Footer markup for the onboarding survey, or `None` when it should stay hidden.
    pub fn admin_footer(&self, request: &RequestContext) -> Result<Option<String>> {
        if !self.eligibility().is_woo_survey_enabled(request) {
            return Ok(None);
        }
        wrapper::render_wrapper().map(Some)
    }
}
