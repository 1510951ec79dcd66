use serde_json::{json, Value};
use std::cell::RefCell;

use survey_gate::remote::{
    RawResponse, SurveyTransport, CLIENT_ELIGIBLE_PATH, GET_SURVEY_PATH, STORE_SURVEY_PATH,
};
use survey_gate::store::{
    SettingsStore, SqliteSettings, CONTENT_PUBLISHED, FEEDBACK_SURVEY_COMPLETED, WEBSITE_TYPE,
    WOOCOMMERCE_SURVEY_COMPLETED, WOO_COMPLETED_TASKS,
};
use survey_gate::survey::catalog::DefaultCatalog;
use survey_gate::survey::page::RequestContext;
use survey_gate::survey::types::SurveyKind;
use survey_gate::{Result, Surveys};

/// Routes each endpoint to a fixed reply, like the real service would.
struct ScriptedService {
    eligible: &'static str,
    questions: &'static str,
    store: &'static str,
    posted: RefCell<Vec<Value>>,
}

impl ScriptedService {
    fn happy() -> Self {
        Self {
            eligible: r#"{"data":true}"#,
            questions: r#"{"data":{"questions":[
                {"slug":"score","rules":["required","between:1,5"]},
                {"slug":"reason","rules":[]},
                {"slug":"comment","rules":[]}
            ]}}"#,
            store: r#"{"success":true}"#,
            posted: RefCell::new(Vec::new()),
        }
    }
}

impl SurveyTransport for ScriptedService {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        assert_eq!(query, &[("identifier", "customer_satisfaction_score")]);
        let body = match path {
            CLIENT_ELIGIBLE_PATH => self.eligible,
            GET_SURVEY_PATH => self.questions,
            _ => return Ok(RawResponse { status: 404, body: String::new() }),
        };
        Ok(RawResponse { status: 200, body: body.to_string() })
    }

    fn post(&self, path: &str, body: &Value) -> Result<RawResponse> {
        assert_eq!(path, STORE_SURVEY_PATH);
        self.posted.borrow_mut().push(body.clone());
        Ok(RawResponse { status: 200, body: self.store.to_string() })
    }
}

#[test]
fn standard_survey_is_shown_rendered_and_retired_after_submission() {
    let settings = SqliteSettings::in_memory().expect("store");
    settings.set(CONTENT_PUBLISHED, json!(true)).expect("set");
    let service = ScriptedService::happy();
    let surveys = Surveys::new(&settings, &service, &DefaultCatalog);

    assert!(surveys.eligibility().is_survey_enabled());

    let form: Value = serde_json::from_str(&surveys.survey_form(SurveyKind::Standard).expect("form"))
        .expect("json");
    let pages = form["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["elements"][0]["isRequired"], true);
    assert_eq!(pages[0]["elements"][0]["rateMin"], 1);
    assert_eq!(pages[1]["name"], "comment");

    let outcome = surveys
        .submit([("score", json!(5)), ("comment", json!("great"))], SurveyKind::Standard)
        .expect("submit");
    assert_eq!(outcome.message(), "Survey completed");
    assert_eq!(settings.get(FEEDBACK_SURVEY_COMPLETED).expect("get"), Some(json!(true)));
    assert_eq!(service.posted.borrow()[0]["answers"][0]["answer"], "wordpress_cms");

    assert!(!surveys.eligibility().is_survey_enabled());
}

#[test]
fn onboarding_survey_footer_follows_gates() {
    let settings = SqliteSettings::in_memory().expect("store");
    settings.set(WEBSITE_TYPE, json!("online_store")).expect("set");
    settings
        .set(WOO_COMPLETED_TASKS, json!(["products", "appearance", "payments"]))
        .expect("set");
    let service = ScriptedService::happy();
    let surveys = Surveys::new(&settings, &service, &DefaultCatalog);

    let page = RequestContext::page("/wp-admin/admin.php?page=wc-admin");
    let footer = surveys.admin_footer(&page).expect("render");
    assert!(footer.expect("shown").contains("hostinger-feedback-survey"));

    let elsewhere = RequestContext::page("/wp-admin/plugins.php");
    assert!(surveys.admin_footer(&elsewhere).expect("render").is_none());

    surveys
        .submit([("score", json!(4))], SurveyKind::WooOnboarding)
        .expect("submit");
    assert_eq!(settings.get(WOOCOMMERCE_SURVEY_COMPLETED).expect("get"), Some(json!(true)));
    assert!(surveys.admin_footer(&page).expect("render").is_none());
}

#[test]
fn rejected_submission_keeps_survey_open() {
    let settings = SqliteSettings::in_memory().expect("store");
    settings.set(CONTENT_PUBLISHED, json!(true)).expect("set");
    let mut service = ScriptedService::happy();
    service.store = r#"{"success":false}"#;
    let surveys = Surveys::new(&settings, &service, &DefaultCatalog);

    let err = surveys
        .submit([("comment", json!("meh"))], SurveyKind::Standard)
        .expect_err("not confirmed");
    assert_eq!(err.user_message(), "Survey failed");
    assert!(surveys.eligibility().is_survey_enabled());
}
