use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::{FEEDBACK_SURVEY_COMPLETED, WOOCOMMERCE_SURVEY_COMPLETED};

/// Campaign identifier sent to every survey endpoint.
pub const CLIENT_SURVEY_IDENTIFIER: &str = "customer_satisfaction_score";
pub const WOO_SURVEY_IDENTIFIER: &str = "wordpress_woocommerce_onboarding";
pub const CMS_CONTEXT_ANSWER: &str = "wordpress_cms";
pub const LOCATION_SLUG: &str = "location";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyKind {
    #[serde(rename = "ai_survey")]
    Standard,
    #[serde(rename = "woo_survey")]
    WooOnboarding,
}

impl SurveyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "ai_survey",
            Self::WooOnboarding => "woo_survey",
        }
    }

    /// The synthetic `location` answer identifying the client context.
    pub fn context_answer(&self) -> &'static str {
        match self {
            Self::Standard => CMS_CONTEXT_ANSWER,
            Self::WooOnboarding => WOO_SURVEY_IDENTIFIER,
        }
    }

    pub fn completion_key(&self) -> &'static str {
        match self {
            Self::Standard => FEEDBACK_SURVEY_COMPLETED,
            Self::WooOnboarding => WOOCOMMERCE_SURVEY_COMPLETED,
        }
    }
}

impl fmt::Display for SurveyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ai_survey" | "ai" | "standard" => Ok(Self::Standard),
            "woo_survey" | "woo" => Ok(Self::WooOnboarding),
            other => Err(format!("unknown survey type '{other}'; use 'ai_survey' or 'woo_survey'")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SurveyQuestion {
    pub slug: String,
    pub rules: Vec<String>,
}

impl SurveyQuestion {
    pub fn new(slug: &str, rules: &[&str]) -> Self {
        Self {
            slug: slug.to_string(),
            rules: rules.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| r == "required")
    }
}
