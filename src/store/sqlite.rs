use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;

use crate::error::{Result, SurveyError};

use super::SettingsStore;

/// Settings persisted as JSON text in a single SQLite table.
pub struct SqliteSettings {
  conn: Connection,
}

impl SqliteSettings {
  pub fn open(path: &Path) -> Result<Self> {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent).map_err(|e| SurveyError::Settings(e.to_string()))?;
      }
    }
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(Self { conn })
  }

  pub fn in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(Self { conn })
  }
}

fn init_schema(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    "CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
      );"
  )?;
  Ok(())
}

impl SettingsStore for SqliteSettings {
  fn get(&self, key: &str) -> Result<Option<Value>> {
    let raw: Option<String> = self
      .conn
      .query_row(
        "SELECT value FROM settings WHERE key = ?1",
        params![key],
        |row| row.get(0)
      )
      .optional()?;
    match raw {
      Some(text) => serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| SurveyError::Settings(format!("Invalid value for '{key}': {e}"))),
      None => Ok(None),
    }
  }

  fn set(&self, key: &str, value: Value) -> Result<()> {
    let text = serde_json::to_string(&value).map_err(|e| SurveyError::Settings(e.to_string()))?;
    self.conn.execute(
      "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
      params![key, text, Utc::now().to_rfc3339()]
    )?;
    Ok(())
  }
}
