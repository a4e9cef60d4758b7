use super::files::{atomic_write, ensure_data_dir, key_file, read_file};
use crate::domain::{random_quote, AppState};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Storage key of the persisted snapshot
pub const STORAGE_KEY: &str = "focusForge_v1";

/// Why a snapshot (stored or imported) could not be turned into an `AppState`
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),

    #[error("field `{field}` has the wrong shape: {source}")]
    Field {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Overlay a parsed document onto `defaults`.
///
/// Recognized top-level keys from `incoming` replace the default value whole;
/// nested objects fill their own missing fields from their defaults.
/// Unknown keys and `null` values are ignored.
pub fn merge_with_defaults(defaults: &AppState, incoming: Value) -> Result<AppState, SnapshotError> {
    let incoming = match incoming {
        Value::Object(map) => map,
        other => return Err(SnapshotError::NotAnObject(kind_of(&other))),
    };

    let mut merged: Map<String, Value> = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        other => return Err(SnapshotError::NotAnObject(kind_of(&other))),
    };

    for (key, value) in incoming {
        if value.is_null() || !merged.contains_key(&key) {
            continue;
        }
        merged.insert(key, value);
    }

    // Deserialize field by field so the error names the offending key
    for (key, value) in &merged {
        if let Err(source) = check_field(key, value) {
            return Err(SnapshotError::Field {
                field: key.clone(),
                source,
            });
        }
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

fn check_field(key: &str, value: &Value) -> Result<(), serde_json::Error> {
    use crate::domain::{HistoryEntry, Mood, Quote, Settings, Task, UiPrefs};

    let value = value.clone();
    match key {
        "tasks" => serde_json::from_value::<Vec<Task>>(value).map(drop),
        "settings" => serde_json::from_value::<Settings>(value).map(drop),
        "mood" => serde_json::from_value::<Mood>(value).map(drop),
        "history" => serde_json::from_value::<Vec<HistoryEntry>>(value).map(drop),
        "quoteOfDay" => serde_json::from_value::<Quote>(value).map(drop),
        "lastResetDate" => serde_json::from_value::<NaiveDate>(value).map(drop),
        "ui" => serde_json::from_value::<UiPrefs>(value).map(drop),
        _ => Ok(()),
    }
}

/// Parse document text and merge it over `defaults`
pub fn import_str(contents: &str, defaults: &AppState) -> Result<AppState, SnapshotError> {
    let value: Value = serde_json::from_str(contents)?;
    merge_with_defaults(defaults, value)
}

/// Pretty-printed JSON of the full state
pub fn export_json(state: &AppState) -> Result<String> {
    serde_json::to_string_pretty(state).context("Failed to serialize state")
}

/// Suggested file name for an export made on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("focusforge-backup-{}.json", date.format("%Y-%m-%d"))
}

/// The persisted snapshot under [`STORAGE_KEY`]
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Store inside an explicit data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: key_file(dir, STORAGE_KEY),
        }
    }

    /// Store inside the discovered data directory, creating it if needed
    pub fn open() -> Result<Self> {
        Ok(Self::in_dir(&ensure_data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, reporting failures
    pub fn write(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state).context("Failed to serialize state")?;
        atomic_write(&self.path, &json)?;
        debug!(path = %self.path.display(), tasks = state.tasks.len(), "saved snapshot");
        Ok(())
    }

    /// Best-effort write; the in-memory state stays authoritative on failure
    pub fn save(&self, state: &AppState) {
        if let Err(e) = self.write(state) {
            error!(path = %self.path.display(), "failed to save snapshot: {:#}", e);
        }
    }

    /// Load the snapshot for `today`.
    ///
    /// First run seeds the example tasks and persists them. A snapshot that
    /// cannot be read or parsed is logged and replaced by defaults in memory
    /// only, so the bad file survives until the next save.
    pub fn load(&self, today: NaiveDate) -> AppState {
        let contents = match read_file(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                info!(path = %self.path.display(), "no snapshot found, seeding example tasks");
                let seeded = AppState::seeded(today, random_quote(), Utc::now());
                self.save(&seeded);
                return seeded;
            }
            Err(e) => {
                error!("failed to read snapshot: {:#}", e);
                return AppState::defaults(today, random_quote());
            }
        };

        let defaults = AppState::defaults(today, random_quote());
        match import_str(&contents, &defaults) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), "snapshot is corrupt, using defaults: {}", e);
                defaults
            }
        }
    }
}
