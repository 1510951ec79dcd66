use anyhow::{anyhow, Context as _};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use survey_gate::config::load_config;
use survey_gate::remote::HttpTransport;
use survey_gate::store::{SettingsStore, SqliteSettings};
use survey_gate::survey::catalog::DefaultCatalog;
use survey_gate::survey::page::RequestContext;
use survey_gate::survey::types::SurveyKind;
use survey_gate::Surveys;

#[derive(Parser)]
#[command(name = "survey-gate")]
#[command(about = "Decide, render and submit admin feedback surveys.")]
struct CommandLine {
  /// Path of the JSON config file; created with defaults when missing
  #[arg(long, global = true, default_value = "survey-gate.json")]
  config: PathBuf,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Report whether each survey would be shown
  Status {
    /// Current request path and query
    #[arg(long, default_value = "")]
    uri: String,
    /// Treat the request as a background ajax call
    #[arg(long)]
    ajax: bool,
  },
  /// Print the form schema JSON for a survey
  Questions {
    #[arg(long, default_value = "ai_survey")]
    kind: SurveyKind,
  },
  /// Submit answers given as slug=value
  Submit {
    #[arg(long, default_value = "ai_survey")]
    kind: SurveyKind,
    #[arg(long = "answer", value_parser = parse_answer)]
    answers: Vec<(String, Value)>,
  },
  /// Print the admin footer markup for a request, if the onboarding survey applies
  Wrapper {
    #[arg(long)]
    uri: String,
  },
  /// Inspect or change local settings
  Settings {
    #[command(subcommand)]
    action: SettingsAction,
  },
}

#[derive(Subcommand)]
enum SettingsAction {
  Get { key: String },
  /// VALUE is parsed as JSON, falling back to a plain string
  Set { key: String, value: String },
}

fn parse_answer(raw: &str) -> Result<(String, Value), String> {
  let (slug, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected slug=value, got '{raw}'"))?;
  if slug.trim().is_empty() {
    return Err("answer slug must not be empty".to_string());
  }
  Ok((slug.trim().to_string(), json_or_string(value)))
}

fn json_or_string(raw: &str) -> Value {
  serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() -> anyhow::Result<()> {
  let cli = CommandLine::parse();
  init_logging();

  let config = load_config(&cli.config)?.apply_env();
  let settings = SqliteSettings::open(&PathBuf::from(&config.settings_db))
    .with_context(|| format!("opening settings at {}", config.settings_db))?;

  if let Commands::Settings { action } = &cli.command {
    return run_settings(&settings, action);
  }

  let transport = HttpTransport::from_config(&config)?;
  let surveys = Surveys::new(&settings, &transport, &DefaultCatalog);

  match cli.command {
    Commands::Status { uri, ajax } => {
      let request = RequestContext { uri, is_ajax: ajax };
      let checker = surveys.eligibility();
      println!("ai_survey: {}", checker.is_survey_enabled());
      println!("woo_survey: {}", checker.is_woo_survey_enabled(&request));
      Ok(())
    }
    Commands::Questions { kind } => {
      println!("{}", surveys.survey_form(kind)?);
      Ok(())
    }
    Commands::Submit { kind, answers } => match surveys.submit(answers, kind) {
      Ok(outcome) => {
        println!("{}", outcome.message());
        Ok(())
      }
      Err(err) => {
        info!(error = %err, "submission did not complete");
        Err(anyhow!(err.user_message()))
      }
    },
    Commands::Wrapper { uri } => {
      if let Some(markup) = surveys.admin_footer(&RequestContext::page(&uri))? {
        print!("{markup}");
      }
      Ok(())
    }
    Commands::Settings { .. } => Ok(()),
  }
}

fn run_settings(settings: &SqliteSettings, action: &SettingsAction) -> anyhow::Result<()> {
  match action {
    SettingsAction::Get { key } => {
      match settings.get(key)? {
        Some(value) => println!("{value}"),
        None => println!("null"),
      }
    }
    SettingsAction::Set { key, value } => {
      settings.set(key, json_or_string(value))?;
      info!(key = key.as_str(), "setting updated");
    }
  }
  Ok(())
}
