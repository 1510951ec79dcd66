pub mod http;
pub mod types;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, SurveyError};

pub use http::HttpTransport;

pub const CLIENT_ELIGIBLE_PATH: &str = "/v3/wordpress/survey/client-eligible";
pub const GET_SURVEY_PATH: &str = "/v3/wordpress/survey/get";
pub const STORE_SURVEY_PATH: &str = "/v3/wordpress/survey/store";

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The outbound HTTP collaborator. Implementations attach the client-identifying headers.
pub trait SurveyTransport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse>;
    fn post(&self, path: &str, body: &Value) -> Result<RawResponse>;
}

/// Non-200 becomes `Status`, anything not matching `T` becomes `Malformed`.
pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    if response.status != 200 {
        return Err(SurveyError::Status(response.status));
    }
    if response.body.trim().is_empty() {
        return Err(SurveyError::Malformed("empty body".to_string()));
    }
    serde_json::from_str(&response.body).map_err(|e| SurveyError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::types::StoreEnvelope;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn decode_rejects_non_200() {
        let err = decode::<StoreEnvelope>(&response(500, r#"{"success":true}"#)).expect_err("status");
        assert!(matches!(err, SurveyError::Status(500)));
    }

    #[test]
    fn decode_flags_shape_mismatch() {
        let err = decode::<StoreEnvelope>(&response(200, r#"{"ok":1}"#)).expect_err("shape");
        assert!(matches!(err, SurveyError::Malformed(_)));
        let err = decode::<StoreEnvelope>(&response(200, "  ")).expect_err("empty");
        assert!(matches!(err, SurveyError::Malformed(_)));
    }
}
