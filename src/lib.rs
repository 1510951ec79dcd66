pub mod config;
pub mod error;
pub mod remote;
pub mod store;
pub mod survey;

pub use error::{Result, SurveyError};
pub use survey::Surveys;
