use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{Result, SurveyError, SURVEY_COMPLETED};
use crate::remote::types::{StoreEnvelope, SubmissionPayload, SurveyAnswer};
use crate::remote::{decode, SurveyTransport, STORE_SURVEY_PATH};
use crate::store::SettingsStore;

use super::types::{SurveyKind, CLIENT_SURVEY_IDENTIFIER, LOCATION_SLUG};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed,
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Completed => SURVEY_COMPLETED,
        }
    }
}

pub struct AnswerSubmitter<'a> {
    settings: &'a dyn SettingsStore,
    transport: &'a dyn SurveyTransport,
}

impl<'a> AnswerSubmitter<'a> {
    pub fn new(settings: &'a dyn SettingsStore, transport: &'a dyn SurveyTransport) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Posts the answers; the completion flag flips only on a confirmed `success: true`.
    pub fn submit<I, K>(&self, answers: I, kind: SurveyKind) -> Result<SubmitOutcome>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let payload = build_payload(answers, kind);
        let body = serde_json::to_value(&payload).map_err(|e| SurveyError::Render(e.to_string()))?;

        let response = self.transport.post(STORE_SURVEY_PATH, &body).map_err(|err| {
            error!(survey = %kind, error = %err, "survey submission failed");
            err
        })?;

        let envelope: StoreEnvelope = decode(&response).map_err(|err| {
            warn!(survey = %kind, error = %err, "survey submission not confirmed");
            err
        })?;
        if !envelope.success {
            warn!(survey = %kind, "survey service rejected the submission");
            return Err(SurveyError::NotConfirmed {
                status: response.status,
            });
        }

        self.settings
            .set(kind.completion_key(), Value::Bool(true))
            .map_err(|err| {
                error!(
                    survey = %kind,
                    key = kind.completion_key(),
                    error = %err,
                    "survey stored remotely but completion flag could not be saved"
                );
                err
            })?;
        info!(survey = %kind, answers = payload.answers.len(), "survey completed");
        Ok(SubmitOutcome::Completed)
    }
}

/// Context answer first, then caller answers in iteration order.
pub fn build_payload<I, K>(answers: I, kind: SurveyKind) -> SubmissionPayload
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let mut entries = vec![SurveyAnswer {
        question_slug: LOCATION_SLUG.to_string(),
        answer: Value::String(kind.context_answer().to_string()),
    }];
    for (slug, answer) in answers {
        let question_slug = slug.into();
        if question_slug == LOCATION_SLUG {
            debug!("dropping caller-supplied context answer");
            continue;
        }
        entries.push(SurveyAnswer {
            question_slug,
            answer,
        });
    }
    SubmissionPayload {
        identifier: CLIENT_SURVEY_IDENTIFIER.to_string(),
        answers: entries,
    }
}
