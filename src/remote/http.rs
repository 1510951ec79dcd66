use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::SurveyConfig;
use crate::error::{Result, SurveyError};

use super::{RawResponse, SurveyTransport};

/// Blocking client for the survey service. One request per call, no retries.
pub struct HttpTransport {
    client: Client,
    base_uri: String,
    headers: Vec<(String, String)>,
}

impl HttpTransport {
    pub fn from_config(config: &SurveyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| SurveyError::Transport(e.to_string()))?;
        let mut headers = vec![(config.domain_header.clone(), config.domain.clone())];
        if let Some(token) = &config.api_token {
            headers.push((config.token_header.clone(), token.clone()));
        }
        Ok(Self {
            client,
            base_uri: config.base_rest_uri.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_uri, path.trim_start_matches('/'))
    }

    fn decorate(&self, mut request: RequestBuilder) -> RequestBuilder {
        request = request
            .header(USER_AGENT, "survey-gate/0.1")
            .header(ACCEPT, "application/json");
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }

    fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        let response = request
            .send()
            .map_err(|e| SurveyError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SurveyError::Transport(format!("Unable to read response body: {e}")))?;
        debug!(status, bytes = body.len(), "survey service responded");
        Ok(RawResponse { status, body })
    }
}

impl SurveyTransport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        let request = self.decorate(self.client.get(self.url(path)).query(query));
        self.send(request)
    }

    fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        let request = self.decorate(self.client.post(self.url(path)).json(body));
        self.send(request)
    }
}
