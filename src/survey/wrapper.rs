use tera::{Context, Tera};

use crate::error::{Result, SurveyError};

const WRAPPER_TEMPLATE: &str = r#"<div class="hts-survey-wrapper hts-woocommerce-csat">
	<div id="{{ mount_id }}"></div>
	<div id="hts-questionsLeft">
		<span id="hts-currentQuestion">1</span> {{ question_label }} {{ of_label }}
		<span id="hts-allQuestions"></span></div>
</div>
"#;

/// Container the onboarding survey is mounted into on commerce admin pages.
pub fn render_wrapper() -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("mount_id", "hostinger-feedback-survey");
    ctx.insert("question_label", "Question");
    ctx.insert("of_label", "of");
    Tera::one_off(WRAPPER_TEMPLATE, &ctx, true)
        .map_err(|e| SurveyError::Render(format!("Wrapper render failed: {e}")))
}
