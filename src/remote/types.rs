use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `GET client-eligible`. `data` stays loose so "present but not a bool" can be told apart.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityEnvelope {
    pub data: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionsEnvelope {
    pub data: QuestionsData,
}

/// Entries stay raw so one odd question cannot sink the rest of the list.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionsData {
    pub questions: Vec<Value>,
}

/// Question as served remotely; extra metadata is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteQuestion {
    #[serde(default, deserialize_with = "lenient_slug")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_rules")]
    pub rules: Vec<String>,
}

fn lenient_slug<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// `null` or a non-list means no rules; non-string entries are skipped.
fn lenient_rules<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let rules = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };
    Ok(rules)
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreEnvelope {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SurveyAnswer {
    pub question_slug: String,
    pub answer: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionPayload {
    pub identifier: String,
    pub answers: Vec<SurveyAnswer>,
}
