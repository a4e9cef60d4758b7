pub mod enums;
pub mod quotes;
pub mod state;
pub mod task;

pub use enums::{Accent, MoodKind, Priority, Theme, UiMode};
pub use quotes::{random_quote, Quote};
pub use state::{
    today, AppState, HistoryEntry, Mood, PomodoroDurations, Settings, SettingsPatch, UiPatch,
    UiPrefs,
};
pub use task::{
    all_tags, calculate_progress, current_task, filter_tasks, parse_tags,
    ProgressSnapshot, Task, TaskPatch,
};
