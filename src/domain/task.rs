use super::enums::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A tracked task
///
/// `priority_weight` is private and only ever derived from `priority`, so a
/// task can never carry a mismatched pair. Deserialization goes through
/// [`TaskRecord`] and recomputes the weight, ignoring whatever was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskRecord")]
pub struct Task {
    id: String,
    pub text: String,
    priority: Priority,
    priority_weight: u32,
    pub repeat_daily: bool,
    pub tags: BTreeSet<String>,
    pub notes: String,
    pub done: bool,
    created_at: DateTime<Utc>,
}

/// Wire shape of a task as found in snapshots and import files
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    text: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    repeat_daily: bool,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    done: bool,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let text = record.text.trim();
        if text.is_empty() {
            return Err(format!("task {} has empty text", record.id));
        }
        Ok(Self {
            id: record.id,
            text: text.to_string(),
            priority: record.priority,
            priority_weight: record.priority.weight(),
            repeat_daily: record.repeat_daily,
            tags: record.tags,
            notes: record.notes,
            done: record.done,
            created_at: record.created_at,
        })
    }
}

/// Partial update for a task; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub repeat_daily: Option<bool>,
    pub tags: Option<BTreeSet<String>>,
    pub notes: Option<String>,
    pub done: Option<bool>,
}

impl Task {
    pub fn new(text: &str, priority: Priority) -> Self {
        Self::new_at(text, priority, Utc::now())
    }

    /// Create a task with an explicit creation time
    pub fn new_at(text: &str, priority: Priority, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, priority, created_at)
    }

    pub(crate) fn with_id(id: String, text: &str, priority: Priority, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.trim().to_string(),
            priority,
            priority_weight: priority.weight(),
            repeat_daily: false,
            tags: BTreeSet::new(),
            notes: String::new(),
            done: false,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn priority_weight(&self) -> u32 {
        self.priority_weight
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Change priority, recomputing the weight
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
        self.priority_weight = priority.weight();
    }

    /// Merge a patch into this task
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            // An empty label is never accepted
            if !text.trim().is_empty() {
                self.text = text.trim().to_string();
            }
        }
        if let Some(priority) = patch.priority {
            self.set_priority(priority);
        }
        if let Some(repeat_daily) = patch.repeat_daily {
            self.repeat_daily = repeat_daily;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
    }
}

/// Parse a comma-separated tag list, dropping blanks
pub fn parse_tags(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Weighted completion for a list of tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub completed_weighted: u32,
    pub total_weighted: u32,
    pub percentage: u32,
}

/// round(100 * completed / total), or 0 when total is 0
pub fn weighted_percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (u64::from(completed), u64::from(total));
    ((200 * completed + total) / (2 * total)) as u32
}

pub fn calculate_progress(tasks: &[Task]) -> ProgressSnapshot {
    let mut completed_weighted = 0;
    let mut total_weighted = 0;

    for task in tasks {
        total_weighted += task.priority_weight();
        if task.done {
            completed_weighted += task.priority_weight();
        }
    }

    ProgressSnapshot {
        completed_weighted,
        total_weighted,
        percentage: weighted_percentage(completed_weighted, total_weighted),
    }
}

/// Canonical order: open before done, heavier first, older first
pub fn sort_tasks<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    // sort_by is stable, so fully tied tasks keep their input order
    sorted.sort_by(|a, b| {
        a.done
            .cmp(&b.done)
            .then_with(|| b.priority_weight().cmp(&a.priority_weight()))
            .then_with(|| a.created_at().cmp(&b.created_at()))
    });
    sorted
}

/// Tasks matching a case-insensitive text search and an optional tag, in canonical order
pub fn filter_tasks<'a>(tasks: &'a [Task], search: &str, tag: Option<&str>) -> Vec<&'a Task> {
    let needle = search.trim().to_lowercase();
    sort_tasks(tasks.iter().filter(|task| {
        let matches_search = needle.is_empty() || task.text.to_lowercase().contains(&needle);
        let matches_tag = tag.map_or(true, |t| task.tags.contains(t));
        matches_search && matches_tag
    }))
}

/// Every distinct tag in use, sorted
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    let tags: BTreeSet<&String> = tasks.iter().flat_map(|t| t.tags.iter()).collect();
    tags.into_iter().cloned().collect()
}

/// The first open task in canonical order
pub fn current_task(tasks: &[Task]) -> Option<&Task> {
    sort_tasks(tasks).into_iter().find(|t| !t.done)
}
