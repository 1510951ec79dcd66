use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, SurveyError};
use crate::remote::types::EligibilityEnvelope;
use crate::remote::{decode, SurveyTransport, CLIENT_ELIGIBLE_PATH};
use crate::store::{
    SettingsStore, CONTENT_PUBLISHED, FEEDBACK_SURVEY_COMPLETED, WEBSITE_TYPE,
    WOOCOMMERCE_SURVEY_COMPLETED, WOO_COMPLETED_TASKS,
};

use super::page::RequestContext;
use super::types::CLIENT_SURVEY_IDENTIFIER;

/// Setup tasks that must all be done before the onboarding survey is offered.
pub const REQUIRED_ONBOARDING_TASKS: [&str; 3] = ["products", "appearance", "payments"];

pub struct EligibilityChecker<'a> {
    settings: &'a dyn SettingsStore,
    transport: &'a dyn SurveyTransport,
}

impl<'a> EligibilityChecker<'a> {
    pub fn new(settings: &'a dyn SettingsStore, transport: &'a dyn SurveyTransport) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Local gates run first so the remote service is only asked when they pass.
    pub fn is_survey_enabled(&self) -> bool {
        if self.flag(FEEDBACK_SURVEY_COMPLETED) {
            debug!("feedback survey already completed");
            return false;
        }
        if !self.flag(CONTENT_PUBLISHED) {
            debug!("no published content yet");
            return false;
        }
        self.is_client_eligible()
    }

    pub fn is_woo_survey_enabled(&self, request: &RequestContext) -> bool {
        if self.flag(WOOCOMMERCE_SURVEY_COMPLETED) {
            debug!("woocommerce survey already completed");
            return false;
        }
        if !self.flag(WEBSITE_TYPE) {
            debug!("website type not set");
            return false;
        }
        if !request.is_woocommerce_admin_page() {
            return false;
        }
        if !self.onboarding_completed() {
            debug!("onboarding tasks incomplete");
            return false;
        }
        self.is_client_eligible()
    }

    pub fn onboarding_completed(&self) -> bool {
        let completed = match self.settings.string_list(WOO_COMPLETED_TASKS) {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, "unable to read completed onboarding tasks");
                return false;
            }
        };
        REQUIRED_ONBOARDING_TASKS
            .iter()
            .all(|task| completed.iter().any(|done| done == task))
    }

    /// Fail-closed view of [`Self::try_client_eligible`].
    pub fn is_client_eligible(&self) -> bool {
        match self.try_client_eligible() {
            Ok(eligible) => eligible,
            Err(err) => {
                warn!(error = %err, "eligibility check failed");
                false
            }
        }
    }

    pub fn try_client_eligible(&self) -> Result<bool> {
        let response = self.transport.get(
            CLIENT_ELIGIBLE_PATH,
            &[("identifier", CLIENT_SURVEY_IDENTIFIER)],
        )?;
        let envelope: EligibilityEnvelope = decode(&response)?;
        match envelope.data {
            Value::Bool(eligible) => Ok(eligible),
            other => Err(SurveyError::Malformed(format!(
                "eligibility data is not a boolean: {other}"
            ))),
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.settings.is_truthy(key).unwrap_or_else(|err| {
            warn!(key, error = %err, "unable to read setting");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySettings;
    use crate::survey::testing::FakeTransport;
    use serde_json::json;

    fn enabled_settings() -> MemorySettings {
        MemorySettings::with([
            (FEEDBACK_SURVEY_COMPLETED, json!(false)),
            (CONTENT_PUBLISHED, json!(true)),
        ])
    }

    #[test]
    fn completed_survey_is_never_shown() {
        let settings = enabled_settings();
        settings.set(FEEDBACK_SURVEY_COMPLETED, json!(true)).expect("set");
        let transport = FakeTransport::replying(200, r#"{"data":true}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        assert!(!checker.is_survey_enabled());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn survey_enabled_when_published_and_eligible() {
        let settings = enabled_settings();
        let transport = FakeTransport::replying(200, r#"{"data":true}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        assert!(checker.is_survey_enabled());
        let request = transport.last_request().expect("request");
        assert_eq!(request.path, CLIENT_ELIGIBLE_PATH);
        assert_eq!(
            request.query,
            vec![("identifier".to_string(), "customer_satisfaction_score".to_string())]
        );
    }

    #[test]
    fn unpublished_site_is_not_enabled() {
        let settings = MemorySettings::new();
        let transport = FakeTransport::replying(200, r#"{"data":true}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        assert!(!checker.is_survey_enabled());
    }

    #[test]
    fn eligibility_fails_closed() {
        let settings = MemorySettings::new();
        for (status, body) in [
            (500, r#"{"data":true}"#),
            (200, r#"{"data":false}"#),
            (200, r#"{"data":"true"}"#),
            (200, r#"{"data":1}"#),
            (200, r#"{}"#),
            (200, "not json"),
            (200, ""),
        ] {
            let transport = FakeTransport::replying(status, body);
            let checker = EligibilityChecker::new(&settings, &transport);
            assert!(!checker.is_client_eligible(), "{status} {body}");
        }
        let transport = FakeTransport::failing("dns failure");
        let checker = EligibilityChecker::new(&settings, &transport);
        assert!(!checker.is_client_eligible());
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn non_boolean_data_is_reported_as_malformed() {
        let settings = MemorySettings::new();
        let transport = FakeTransport::replying(200, r#"{"data":"yes"}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        let err = checker.try_client_eligible().expect_err("malformed");
        assert!(matches!(err, SurveyError::Malformed(_)));
    }

    fn woo_settings() -> MemorySettings {
        MemorySettings::with([
            (WOOCOMMERCE_SURVEY_COMPLETED, json!(false)),
            (WEBSITE_TYPE, json!("online_store")),
            (WOO_COMPLETED_TASKS, json!(["store_details", "products", "appearance", "payments"])),
        ])
    }

    #[test]
    fn woo_survey_enabled_on_commerce_admin_page() {
        let settings = woo_settings();
        let transport = FakeTransport::replying(200, r#"{"data":true}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        let request = RequestContext::page("/wp-admin/admin.php?page=wc-admin");
        assert!(checker.is_woo_survey_enabled(&request));
    }

    #[test]
    fn woo_survey_hidden_when_remote_check_refuses() {
        let settings = woo_settings();
        let request = RequestContext::page("/wp-admin/admin.php?page=wc-admin");
        for transport in [
            FakeTransport::replying(200, r#"{"data":false}"#),
            FakeTransport::replying(503, r#"{"data":true}"#),
            FakeTransport::failing("connection refused"),
        ] {
            let checker = EligibilityChecker::new(&settings, &transport);
            assert!(!checker.is_woo_survey_enabled(&request));
            assert_eq!(transport.calls(), 1);
        }
    }

    #[test]
    fn woo_survey_requires_every_onboarding_task() {
        let settings = woo_settings();
        settings
            .set(WOO_COMPLETED_TASKS, json!(["products", "payments"]))
            .expect("set");
        let transport = FakeTransport::replying(200, r#"{"data":true}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        let request = RequestContext::page("/wp-admin/admin.php?page=wc-admin");
        assert!(!checker.is_woo_survey_enabled(&request));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn woo_survey_skips_other_pages_and_missing_website_type() {
        let settings = woo_settings();
        let transport = FakeTransport::replying(200, r#"{"data":true}"#);
        let checker = EligibilityChecker::new(&settings, &transport);
        assert!(!checker.is_woo_survey_enabled(&RequestContext::page("/wp-admin/index.php")));

        settings.set(WEBSITE_TYPE, json!("")).expect("set");
        let request = RequestContext::page("/wp-admin/admin.php?page=wc-admin");
        assert!(!checker.is_woo_survey_enabled(&request));

        settings.set(WEBSITE_TYPE, json!("blog")).expect("set");
        settings.set(WOOCOMMERCE_SURVEY_COMPLETED, json!(true)).expect("set");
        assert!(!checker.is_woo_survey_enabled(&request));
        assert_eq!(transport.calls(), 0);
    }
}
