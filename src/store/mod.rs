pub mod memory;
pub mod sqlite;

use serde_json::Value;

use crate::error::Result;

pub use memory::MemorySettings;
pub use sqlite::SqliteSettings;

pub const FEEDBACK_SURVEY_COMPLETED: &str = "feedback_survey_completed";
pub const WOOCOMMERCE_SURVEY_COMPLETED: &str = "woocommerce_survey_completed";
pub const WEBSITE_TYPE: &str = "survey.website.type";
pub const CONTENT_PUBLISHED: &str = "content_published";
/// Owned by the commerce plugin; only ever read here.
pub const WOO_COMPLETED_TASKS: &str = "woocommerce_task_list_tracked_completed_tasks";

/// Persistent key/value settings shared across requests.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;

    fn is_truthy(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.as_ref().map(truthy).unwrap_or(false))
    }

    fn string_list(&self, key: &str) -> Result<Vec<String>> {
        let list = match self.get(key)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        Ok(list)
    }
}

/// Loose host-style truthiness.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
