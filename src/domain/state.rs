use super::enums::{Accent, MoodKind, Priority, Theme};
use super::quotes::Quote;
use super::task::{parse_tags, weighted_percentage, Task};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current calendar day in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Pomodoro phase lengths, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroDurations {
    pub work: u32,
    #[serde(rename = "break")]
    pub break_secs: u32,
}

impl Default for PomodoroDurations {
    fn default() -> Self {
        Self {
            work: 25 * 60,
            break_secs: 5 * 60,
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub accent: Accent,
    pub pomodoro: PomodoroDurations,
    pub sounds_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            accent: Accent::Blue,
            pomodoro: PomodoroDurations::default(),
            sounds_on: true,
        }
    }
}

/// Partial settings update; `pomodoro` replaces both durations at once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub accent: Option<Accent>,
    pub pomodoro: Option<PomodoroDurations>,
    pub sounds_on: Option<bool>,
}

impl Settings {
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(accent) = patch.accent {
            self.accent = accent;
        }
        if let Some(pomodoro) = patch.pomodoro {
            self.pomodoro = pomodoro;
        }
        if let Some(sounds_on) = patch.sounds_on {
            self.sounds_on = sounds_on;
        }
    }
}

/// Current mood and the day it was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mood {
    pub value: MoodKind,
    pub saved_at: NaiveDate,
}

impl Mood {
    pub fn new(value: MoodKind, saved_at: NaiveDate) -> Self {
        Self { value, saved_at }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::new(MoodKind::Calm, today())
    }
}

/// Frozen progress for a past day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub completed_weighted: u32,
    pub total_weighted: u32,
}

impl HistoryEntry {
    pub fn percentage(&self) -> u32 {
        weighted_percentage(self.completed_weighted, self.total_weighted)
    }
}

/// Persisted view flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiPrefs {
    pub show_focus_mode: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiPatch {
    pub show_focus_mode: Option<bool>,
}

/// The aggregate root: everything that is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub settings: Settings,
    pub mood: Mood,
    pub history: Vec<HistoryEntry>,
    pub quote_of_day: Quote,
    pub last_reset_date: NaiveDate,
    pub ui: UiPrefs,
}

impl AppState {
    /// The default snapshot for a given day: no tasks, no history
    pub fn defaults(today: NaiveDate, quote: Quote) -> Self {
        Self {
            tasks: Vec::new(),
            settings: Settings::default(),
            mood: Mood::new(MoodKind::Calm, today),
            history: Vec::new(),
            quote_of_day: quote,
            last_reset_date: today,
            ui: UiPrefs::default(),
        }
    }

    /// Defaults plus the example tasks shown on first run
    pub fn seeded(today: NaiveDate, quote: Quote, now: DateTime<Utc>) -> Self {
        Self {
            tasks: seed_tasks(now),
            ..Self::defaults(today, quote)
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }
}

fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let mut reading = Task::with_id(
        "t-1".to_string(),
        "Read 20 pages - Economics",
        Priority::High,
        now - Duration::hours(1),
    );
    reading.tags = parse_tags("study");

    let mut jog = Task::with_id(
        "t-2".to_string(),
        "Morning jog 20 mins",
        Priority::Medium,
        now - Duration::hours(2),
    );
    jog.repeat_daily = true;
    jog.tags = parse_tags("health");

    let mut replies = Task::with_id(
        "t-3".to_string(),
        "Reply to 3 client messages",
        Priority::High,
        now,
    );
    replies.tags = parse_tags("work");

    vec![reading, jog, replies]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_defaults() {
        let state = AppState::defaults(day(), Quote::from_catalog(3));
        assert!(state.tasks.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.last_reset_date, day());
        assert_eq!(state.mood, Mood::new(MoodKind::Calm, day()));
        assert_eq!(state.settings.pomodoro.work, 1500);
        assert_eq!(state.settings.pomodoro.break_secs, 300);
        assert!(state.settings.sounds_on);
        assert!(!state.ui.show_focus_mode);
    }

    #[test]
    fn test_seeded_has_example_tasks() {
        let state = AppState::seeded(day(), Quote::default(), Utc::now());
        let ids: Vec<&str> = state.tasks.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["t-1", "t-2", "t-3"]);
        assert!(state.find_task("t-2").map_or(false, |t| t.repeat_daily));
    }

    #[test]
    fn test_settings_merge_is_shallow() {
        let mut settings = Settings::default();
        settings.merge(SettingsPatch {
            sounds_on: Some(false),
            pomodoro: Some(PomodoroDurations {
                work: 50 * 60,
                break_secs: 10 * 60,
            }),
            ..Default::default()
        });
        assert!(!settings.sounds_on);
        assert_eq!(settings.pomodoro.work, 3000);
        assert_eq!(settings.pomodoro.break_secs, 600);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_settings_json_shape() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "theme": "light",
                "accent": "blue",
                "pomodoro": { "work": 1500, "break": 300 },
                "soundsOn": true
            })
        );
    }

    #[test]
    fn test_partial_settings_fill_from_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"soundsOn": false}"#).unwrap();
        assert_eq!(
            settings,
            Settings {
                sounds_on: false,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_history_entry_percentage() {
        let entry = HistoryEntry {
            date: day(),
            completed_weighted: 5,
            total_weighted: 8,
        };
        assert_eq!(entry.percentage(), 63);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["completedWeighted"], 5);
    }
}
