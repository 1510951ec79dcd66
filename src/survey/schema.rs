use regex::Regex;
use serde::Serialize;
use serde_json::Number;
use std::sync::OnceLock;

use crate::error::{Result, SurveyError};

use super::catalog::QuestionCatalog;
use super::types::{SurveyKind, SurveyQuestion};

const COMMENT_SLUG: &str = "comment";
const COMMENT_MAX_LENGTH: u32 = 250;
const FALLBACK_CONTROL: &str = "text";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
  pub pages: Vec<FormPage>,
  pub show_question_numbers: String,
  #[serde(rename = "showTOC")]
  pub show_toc: bool,
  pub page_next_text: String,
  pub page_prev_text: String,
  pub complete_text: String,
  pub completed_html: String,
  pub required_text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormPage {
  pub name: String,
  pub elements: Vec<FormElement>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
  #[serde(rename = "type")]
  pub control: String,
  pub name: String,
  pub title: String,
  pub required_error_text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rate_min: Option<Number>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rate_max: Option<Number>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_rate_description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_rate_description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_required: Option<bool>,
}

pub struct FormSchemaBuilder<'a> {
  catalog: &'a dyn QuestionCatalog,
}

impl<'a> FormSchemaBuilder<'a> {
  pub fn new(catalog: &'a dyn QuestionCatalog) -> Self {
    Self { catalog }
  }

  pub fn schema(&self, questions: &[SurveyQuestion], kind: SurveyKind) -> FormSchema {
    FormSchema {
      pages: questions
        .iter()
        .map(|q| FormPage {
          name: q.slug.clone(),
          elements: vec![self.element(q, kind)],
        })
        .collect(),
      show_question_numbers: "off".to_string(),
      show_toc: false,
      page_next_text: "Next".to_string(),
      page_prev_text: "Previous".to_string(),
      complete_text: "Submit".to_string(),
      completed_html: "Thank you for completing the survey !".to_string(),
      required_text: "*".to_string(),
    }
  }

  pub fn build(&self, questions: &[SurveyQuestion], kind: SurveyKind) -> Result<String> {
    serde_json::to_string(&self.schema(questions, kind)).map_err(|e| SurveyError::Render(e.to_string()))
  }

  fn element(&self, question: &SurveyQuestion, kind: SurveyKind) -> FormElement {
    let (control, title) = match self.catalog.presentation(&question.slug, kind) {
      Some(p) => (p.control, p.title),
      None => (FALLBACK_CONTROL.to_string(), question.slug.clone()),
    };
    let mut element = FormElement {
      control,
      name: question.slug.clone(),
      title,
      required_error_text: "Response required.".to_string(),
      max_length: None,
      rate_min: None,
      rate_max: None,
      min_rate_description: None,
      max_rate_description: None,
      is_required: None,
    };

    if question.slug == COMMENT_SLUG {
      element.max_length = Some(COMMENT_MAX_LENGTH);
    }
    if let Some((lo, hi)) = between_rule(&question.rules) {
      element.rate_min = Some(lo);
      element.rate_max = Some(hi);
      element.min_rate_description = Some("Poor".to_string());
      element.max_rate_description = Some("Excellent".to_string());
    }
    if question.is_required() {
      element.is_required = Some(true);
    }
    element
  }
}

fn between_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^between:([^,]*),([^,]*)$").expect("regex"))
}

/// First `between:<lo>,<hi>` rule whose bounds are both numbers.
pub fn between_rule(rules: &[String]) -> Option<(Number, Number)> {
  rules.iter().find_map(|rule| {
    let caps = between_regex().captures(rule)?;
    Some((bound(&caps[1])?, bound(&caps[2])?))
  })
}

/// Integers stay integers in the JSON output; other finite numbers become floats.
fn bound(raw: &str) -> Option<Number> {
  let raw = raw.trim();
  if let Ok(int) = raw.parse::<i64>() {
    return Some(Number::from(int));
  }
  raw.parse::<f64>().ok().and_then(Number::from_f64)
}
