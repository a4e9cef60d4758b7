use crate::domain::{
    all_tags, calculate_progress, current_task, filter_tasks, parse_tags, random_quote, today,
    Accent, AppState, Mood, MoodKind, PomodoroDurations, Priority, ProgressSnapshot,
    SettingsPatch, Task, TaskPatch, UiMode, UiPatch,
};
use crate::notifications::AudioCue;
use crate::persistence::{export_filename, export_json, import_str, atomic_write, SnapshotError, Store};
use crate::rollover::{apply_rollover, RolloverReport, ROLLOVER_POLL};
use crate::ticker::Interval;
use crate::timer::{DrivenTimer, ExitDecision, FocusSession, PhaseComplete};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Input form state for adding or editing a task
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    /// Task being edited; `None` adds a new one
    pub editing_id: Option<String>,
    pub text: String,
    pub tags: String, // Comma-separated tags
    pub notes: String,
    pub priority: Priority,
    pub repeat_daily: bool,
    pub editing_field: usize, // 0 = text, 1 = tags, 2 = notes, 3 = priority, 4 = repeat
}

impl InputFormState {
    pub const FIELD_COUNT: usize = 5;

    /// Form prefilled from an existing task
    pub fn from_task(task: &Task) -> Self {
        let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
        Self {
            editing_id: Some(task.id().to_string()),
            text: task.text.clone(),
            tags: tags.join(", "),
            notes: task.notes.clone(),
            priority: task.priority(),
            repeat_daily: task.repeat_daily,
            editing_field: 0,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }
}

/// Rows of the settings panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    Accent,
    WorkMinutes,
    BreakMinutes,
    Sounds,
    Export,
    Import,
    Reset,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 8] = [
        SettingsRow::Theme,
        SettingsRow::Accent,
        SettingsRow::WorkMinutes,
        SettingsRow::BreakMinutes,
        SettingsRow::Sounds,
        SettingsRow::Export,
        SettingsRow::Import,
        SettingsRow::Reset,
    ];
}

/// A destructive action waiting for a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Import(PathBuf),
    Reset,
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Import(path) => format!(
                "Replace all current data with the contents of {}?",
                path.display()
            ),
            PendingAction::Reset => "Delete all tasks, history and settings?".to_string(),
        }
    }
}

/// Main application state: the single owner of the persisted snapshot
pub struct App {
    pub state: AppState,
    store: Store,
    cue: Box<dyn AudioCue>,

    /// Compact Pomodoro widget, alive for the whole session
    pub widget: DrivenTimer,
    /// Present while the focus view is open
    pub focus: Option<FocusSession>,
    infer_release: bool,

    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub search: String,
    pub tag_filter: Option<String>,
    pub input_form: Option<InputFormState>,
    pub settings_index: usize,
    pub path_input: String,
    pub pending: Option<PendingAction>,
    pub status: Option<String>,
    pub needs_save: bool,
    rollover_poll: Interval,
}

impl App {
    /// `infer_release` is set when the terminal cannot report key releases
    pub fn new(
        state: AppState,
        store: Store,
        cue: Box<dyn AudioCue>,
        now: Instant,
        infer_release: bool,
    ) -> Self {
        let durations = state.settings.pomodoro;
        let mut app = Self {
            state,
            store,
            cue,
            widget: DrivenTimer::new(durations, now),
            focus: None,
            infer_release,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            search: String::new(),
            tag_filter: None,
            input_form: None,
            settings_index: 0,
            path_input: String::new(),
            pending: None,
            status: None,
            needs_save: false,
            rollover_poll: Interval::new(ROLLOVER_POLL, now),
        };
        // The focus view survives restarts through the persisted flag
        if app.state.ui.show_focus_mode {
            app.focus = Some(FocusSession::new(durations, now, infer_release));
        }
        app
    }

    // ---- derived views ----

    /// Tasks shown in the list: filtered, in canonical order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.state.tasks, &self.search, self.tag_filter.as_deref())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id().to_string())
    }

    pub fn progress(&self) -> ProgressSnapshot {
        calculate_progress(&self.state.tasks)
    }

    /// First open task in canonical order, shown in the focus view
    pub fn current_task(&self) -> Option<&Task> {
        current_task(&self.state.tasks)
    }

    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.state.tasks)
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    // ---- selection ----

    /// Move selection up, wrapping to the bottom
    pub fn move_selection_up(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index.min(len) - 1
        };
    }

    /// Move selection down, wrapping to the top
    pub fn move_selection_down(&mut self) {
        let len = self.visible_tasks().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // ---- task store ----

    /// Add a task; returns its id, or `None` when the text is blank
    pub fn add_task(
        &mut self,
        text: &str,
        priority: Priority,
        repeat_daily: bool,
        tags: BTreeSet<String>,
        notes: &str,
    ) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let mut task = Task::new(text, priority);
        task.repeat_daily = repeat_daily;
        task.tags = tags;
        task.notes = notes.to_string();
        let id = task.id().to_string();
        self.state.tasks.push(task);
        self.needs_save = true;
        Some(id)
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) {
        if let Some(task) = self.state.find_task_mut(id) {
            task.apply(patch);
            self.needs_save = true;
        }
    }

    /// Id of the task whose id is `prefix` or uniquely starts with it
    pub fn resolve_task_id(&self, prefix: &str) -> Result<String> {
        if prefix.is_empty() {
            anyhow::bail!("Task id cannot be empty");
        }
        if let Some(task) = self.state.find_task(prefix) {
            return Ok(task.id().to_string());
        }
        let matches: Vec<&str> = self
            .state
            .tasks
            .iter()
            .map(|t| t.id())
            .filter(|id| id.starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [id] => Ok(id.to_string()),
            [] => anyhow::bail!("No task with id {}", prefix),
            _ => anyhow::bail!("Task id {} matches {} tasks", prefix, matches.len()),
        }
    }

    pub fn delete_task(&mut self, id: &str) {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id() != id);
        if self.state.tasks.len() != before {
            self.needs_save = true;
            self.clamp_selection();
        }
    }

    /// Flip `done`; completing a task plays the cue when sounds are on
    pub fn toggle_task(&mut self, id: &str) {
        let sounds_on = self.state.settings.sounds_on;
        let Some(task) = self.state.find_task_mut(id) else {
            return;
        };
        task.done = !task.done;
        let completed = task.done;
        self.needs_save = true;
        if completed && sounds_on {
            self.cue.play();
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.toggle_task(&id);
        }
    }

    pub fn cycle_selected_priority(&mut self) {
        if let Some(task) = self.selected_task() {
            let id = task.id().to_string();
            let priority = task.priority().cycle();
            self.update_task(
                &id,
                TaskPatch {
                    priority: Some(priority),
                    ..Default::default()
                },
            );
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.delete_task(&id);
        }
    }

    // ---- settings, mood, ui ----

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        let durations_changed = patch.pomodoro.is_some();
        self.state.settings.merge(patch);
        if durations_changed {
            self.push_durations();
        }
        self.needs_save = true;
    }

    fn push_durations(&mut self) {
        let durations = self.state.settings.pomodoro;
        self.widget.timer.set_durations(durations);
        if let Some(session) = &mut self.focus {
            session.clock.timer.set_durations(durations);
        }
    }

    pub fn update_mood(&mut self, value: MoodKind) {
        self.state.mood = Mood::new(value, today());
        self.needs_save = true;
    }

    pub fn cycle_mood(&mut self) {
        let next = self.state.mood.value.cycle();
        self.update_mood(next);
    }

    pub fn update_ui(&mut self, patch: UiPatch) {
        if let Some(show) = patch.show_focus_mode {
            self.state.ui.show_focus_mode = show;
        }
        self.needs_save = true;
    }

    /// Replace everything with fresh defaults (no example tasks)
    pub fn reset_all_data(&mut self, today: NaiveDate) {
        self.state = AppState::defaults(today, random_quote());
        self.after_replace();
        info!("all data reset");
    }

    fn after_replace(&mut self) {
        // The screen follows the replaced focus flag
        if !self.state.ui.show_focus_mode {
            self.focus = None;
        } else if self.focus.is_none() {
            self.focus = Some(FocusSession::new(
                self.state.settings.pomodoro,
                Instant::now(),
                self.infer_release,
            ));
        }
        self.push_durations();
        self.widget.reset();
        self.search.clear();
        self.tag_filter = None;
        self.selected_index = 0;
        self.needs_save = true;
    }

    // ---- rollover ----

    pub fn check_rollover(&mut self, today: NaiveDate) -> Option<RolloverReport> {
        let report = apply_rollover(&mut self.state, today, random_quote)?;
        info!(
            closed_day = %report.closed_day,
            completed = report.entry.completed_weighted,
            total = report.entry.total_weighted,
            reset_tasks = report.reset_tasks,
            "daily rollover"
        );
        self.status = Some(format!(
            "New day. Yesterday: {}%",
            report.entry.percentage()
        ));
        self.needs_save = true;
        self.clamp_selection();
        Some(report)
    }

    // ---- import / export ----

    /// Parse `contents` and replace the whole state; on error nothing changes
    pub fn import_from_str(&mut self, contents: &str, today: NaiveDate) -> Result<(), SnapshotError> {
        let defaults = AppState::defaults(today, random_quote());
        let imported = import_str(contents, &defaults)?;
        self.state = imported;
        self.after_replace();
        info!(tasks = self.state.tasks.len(), "imported snapshot");
        Ok(())
    }

    pub fn import_from_file(&mut self, path: &Path, today: NaiveDate) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        self.import_from_str(&contents, today)
            .with_context(|| format!("Failed to import {}", path.display()))
    }

    /// Write a pretty-printed backup; `None` picks the dated default name
    pub fn export(&self, output: Option<PathBuf>, today: NaiveDate) -> Result<PathBuf> {
        let path = output.unwrap_or_else(|| PathBuf::from(export_filename(today)));
        atomic_write(&path, &export_json(&self.state)?)?;
        info!(path = %path.display(), "exported snapshot");
        Ok(path)
    }

    // ---- widget timer ----

    pub fn toggle_widget_timer(&mut self, now: Instant) {
        self.widget.toggle(now);
    }

    pub fn reset_widget_timer(&mut self) {
        self.widget.reset();
    }

    // ---- focus view ----

    pub fn open_focus(&mut self, now: Instant) {
        if self.focus.is_none() {
            self.focus = Some(FocusSession::new(
                self.state.settings.pomodoro,
                now,
                self.infer_release,
            ));
        }
        self.update_ui(UiPatch {
            show_focus_mode: Some(true),
        });
    }

    /// Close the view, dropping its timer
    pub fn close_focus(&mut self) {
        self.focus = None;
        self.update_ui(UiPatch {
            show_focus_mode: Some(false),
        });
    }

    pub fn toggle_focus_timer(&mut self, now: Instant) {
        if let Some(session) = &mut self.focus {
            session.clock.toggle(now);
        }
    }

    pub fn reset_focus_timer(&mut self) {
        if let Some(session) = &mut self.focus {
            session.clock.reset();
        }
    }

    pub fn toggle_shield(&mut self) {
        if let Some(session) = &mut self.focus {
            let on = !session.exit.shield();
            session.exit.set_shield(on);
        }
    }

    /// Exit key pressed or repeated in the focus view
    pub fn press_exit(&mut self, now: Instant) {
        let decision = match &mut self.focus {
            Some(session) => session.exit.press(now),
            None => return,
        };
        if decision == ExitDecision::Exit {
            self.close_focus();
        }
    }

    pub fn release_exit(&mut self) {
        if let Some(session) = &mut self.focus {
            session.exit.release();
        }
    }

    // ---- event loop ----

    /// Advance timers, the exit gesture and the rollover poll
    pub fn tick(&mut self, now: Instant) {
        if let Some(done) = self.widget.advance(now) {
            self.phase_finished(done);
        }

        let mut exit = false;
        let mut focus_done = None;
        if let Some(session) = &mut self.focus {
            focus_done = session.clock.advance(now);
            exit = session.exit.update(now);
        }
        if let Some(done) = focus_done {
            self.phase_finished(done);
        }
        if exit {
            self.close_focus();
        }

        if self.rollover_poll.ready(now) {
            self.check_rollover(today());
        }
    }

    fn phase_finished(&mut self, done: PhaseComplete) {
        info!(finished = ?done.finished, "timer phase finished");
        self.status = Some(format!("{} is over", done.finished.label()));
        if self.state.settings.sounds_on {
            self.cue.play();
        }
    }

    /// Persist if anything changed since the last flush
    pub fn flush(&mut self) {
        if self.needs_save {
            self.store.save(&self.state);
            self.needs_save = false;
        }
    }

    /// Persist, reporting failures (command line use)
    pub fn flush_strict(&mut self) -> Result<()> {
        self.store.write(&self.state)?;
        self.needs_save = false;
        Ok(())
    }

    // ---- input form ----

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form on an existing task; no-op if the id is unknown
    pub fn start_edit_task(&mut self, id: &str) {
        if let Some(task) = self.state.find_task(id) {
            self.input_form = Some(InputFormState::from_task(task));
            self.ui_mode = UiMode::AddingTask;
        }
    }

    pub fn start_edit_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.start_edit_task(&id);
        }
    }

    /// Cycle editing fields: text -> tags -> notes -> priority -> repeat
    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % InputFormState::FIELD_COUNT;
        }
    }

    /// Add character to the current field; on the toggles a space flips the value
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.text.push(c),
                1 => form.tags.push(c),
                2 => form.notes.push(c),
                3 if c == ' ' => form.priority = form.priority.cycle(),
                4 if c == ' ' => form.repeat_daily = !form.repeat_daily,
                _ => {}
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => {
                    form.text.pop();
                }
                1 => {
                    form.tags.pop();
                }
                2 => {
                    form.notes.pop();
                }
                _ => {}
            }
        }
    }

    /// Add the new task, or apply the form to the task being edited
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        match form.editing_id {
            Some(id) => self.update_task(
                &id,
                TaskPatch {
                    text: Some(form.text),
                    priority: Some(form.priority),
                    repeat_daily: Some(form.repeat_daily),
                    tags: Some(parse_tags(&form.tags)),
                    notes: Some(form.notes),
                    done: None,
                },
            ),
            None => {
                self.add_task(
                    &form.text,
                    form.priority,
                    form.repeat_daily,
                    parse_tags(&form.tags),
                    &form.notes,
                );
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- search and tag filter ----

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_push(&mut self, c: char) {
        self.search.push(c);
        self.selected_index = 0;
    }

    pub fn search_pop(&mut self) {
        self.search.pop();
        self.selected_index = 0;
    }

    /// Keep the query and return to the list
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.search.clear();
        self.selected_index = 0;
        self.ui_mode = UiMode::Normal;
    }

    /// No filter -> first tag -> ... -> last tag -> no filter
    pub fn cycle_tag_filter(&mut self) {
        let tags = self.all_tags();
        self.tag_filter = match &self.tag_filter {
            None => tags.first().cloned(),
            Some(current) => tags
                .iter()
                .position(|t| t == current)
                .and_then(|i| tags.get(i + 1))
                .cloned(),
        };
        self.selected_index = 0;
    }

    // ---- settings panel ----

    pub fn open_settings(&mut self) {
        self.settings_index = 0;
        self.ui_mode = UiMode::Settings;
    }

    pub fn close_settings(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn selected_setting(&self) -> SettingsRow {
        SettingsRow::ALL[self.settings_index % SettingsRow::ALL.len()]
    }

    pub fn settings_up(&mut self) {
        let len = SettingsRow::ALL.len();
        self.settings_index = (self.settings_index + len - 1) % len;
    }

    pub fn settings_down(&mut self) {
        self.settings_index = (self.settings_index + 1) % SettingsRow::ALL.len();
    }

    /// Change or activate the selected row; `delta` is -1 or +1
    pub fn adjust_setting(&mut self, delta: i32, today: NaiveDate) {
        let settings = &self.state.settings;
        let patch = match self.selected_setting() {
            SettingsRow::Theme => SettingsPatch {
                theme: Some(settings.theme.toggle()),
                ..Default::default()
            },
            SettingsRow::Accent => SettingsPatch {
                accent: Some(step_accent(settings.accent, delta)),
                ..Default::default()
            },
            SettingsRow::WorkMinutes => SettingsPatch {
                pomodoro: Some(PomodoroDurations {
                    work: step_minutes(settings.pomodoro.work, delta, 120),
                    ..settings.pomodoro
                }),
                ..Default::default()
            },
            SettingsRow::BreakMinutes => SettingsPatch {
                pomodoro: Some(PomodoroDurations {
                    break_secs: step_minutes(settings.pomodoro.break_secs, delta, 60),
                    ..settings.pomodoro
                }),
                ..Default::default()
            },
            SettingsRow::Sounds => SettingsPatch {
                sounds_on: Some(!settings.sounds_on),
                ..Default::default()
            },
            SettingsRow::Export => {
                self.status = Some(match self.export(None, today) {
                    Ok(path) => format!("Exported to {}", path.display()),
                    Err(e) => {
                        warn!("export failed: {:#}", e);
                        format!("Export failed: {}", e)
                    }
                });
                return;
            }
            SettingsRow::Import => {
                self.path_input.clear();
                self.ui_mode = UiMode::ImportPath;
                return;
            }
            SettingsRow::Reset => {
                self.ask(PendingAction::Reset);
                return;
            }
        };
        self.update_settings(patch);
    }

    // ---- import prompt and confirmation ----

    pub fn path_push(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn path_pop(&mut self) {
        self.path_input.pop();
    }

    pub fn submit_import_path(&mut self) {
        let path = self.path_input.trim();
        if path.is_empty() {
            self.ui_mode = UiMode::Settings;
            return;
        }
        self.ask(PendingAction::Import(PathBuf::from(path)));
    }

    fn ask(&mut self, action: PendingAction) {
        self.pending = Some(action);
        self.ui_mode = UiMode::Confirm;
    }

    pub fn confirm_pending(&mut self, today: NaiveDate) {
        match self.pending.take() {
            Some(PendingAction::Import(path)) => {
                self.status = Some(match self.import_from_file(&path, today) {
                    Ok(()) => format!("Imported {}", path.display()),
                    Err(e) => {
                        warn!("import failed: {:#}", e);
                        format!("Import failed: {:#}", e)
                    }
                });
            }
            Some(PendingAction::Reset) => {
                self.reset_all_data(today);
                self.status = Some("All data reset".to_string());
            }
            None => {}
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
        self.ui_mode = UiMode::Settings;
    }
}

fn step_accent(accent: Accent, delta: i32) -> Accent {
    if delta >= 0 {
        return accent.cycle();
    }
    let all = Accent::all();
    let idx = all.iter().position(|a| *a == accent).unwrap_or(0);
    all[(idx + all.len() - 1) % all.len()]
}

/// Step a duration in whole minutes, keeping it within 1..=max_minutes
fn step_minutes(secs: u32, delta: i32, max_minutes: i32) -> u32 {
    let minutes = (secs / 60) as i32 + delta;
    (minutes.clamp(1, max_minutes) as u32) * 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HistoryEntry, Quote, Theme};
    use crate::timer::exit_hold::EXIT_HOLD;
    use crate::timer::Phase;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Counts how often the cue was played
    #[derive(Clone, Default)]
    struct CountingCue(Rc<Cell<usize>>);

    impl AudioCue for CountingCue {
        fn play(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn create_test_app() -> (App, CountingCue, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let cue = CountingCue::default();
        let state = AppState::defaults(day(1), Quote::from_catalog(0));
        let app = App::new(
            state,
            Store::in_dir(dir.path()),
            Box::new(cue.clone()),
            Instant::now(),
            false,
        );
        (app, cue, dir)
    }

    fn add(app: &mut App, text: &str, priority: Priority) -> String {
        app.add_task(text, priority, false, BTreeSet::new(), "").unwrap()
    }

    #[test]
    fn test_add_task() {
        let (mut app, _, _dir) = create_test_app();
        let id = app
            .add_task("  Write report ", Priority::High, true, parse_tags("work"), "draft")
            .unwrap();

        let task = app.state.find_task(&id).unwrap();
        assert_eq!(task.text, "Write report");
        assert_eq!(task.priority_weight(), 3);
        assert!(task.repeat_daily);
        assert_eq!(task.notes, "draft");
        assert!(app.needs_save);
    }

    #[test]
    fn test_add_blank_task_is_noop() {
        let (mut app, _, _dir) = create_test_app();
        assert_eq!(app.add_task("   ", Priority::Low, false, BTreeSet::new(), ""), None);
        assert!(app.state.tasks.is_empty());
        assert!(!app.needs_save);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let (mut app, cue, _dir) = create_test_app();
        add(&mut app, "Task", Priority::Low);
        app.needs_save = false;
        let before = app.state.clone();

        app.update_task("nope", TaskPatch::default());
        app.delete_task("nope");
        app.toggle_task("nope");

        assert_eq!(app.state, before);
        assert!(!app.needs_save);
        assert_eq!(cue.0.get(), 0);
    }

    #[test]
    fn test_toggle_plays_cue_only_on_completion() {
        let (mut app, cue, _dir) = create_test_app();
        let id = add(&mut app, "Task", Priority::Low);

        app.toggle_task(&id);
        assert!(app.state.find_task(&id).unwrap().done);
        assert_eq!(cue.0.get(), 1);

        app.toggle_task(&id);
        assert!(!app.state.find_task(&id).unwrap().done);
        assert_eq!(cue.0.get(), 1);

        app.update_settings(SettingsPatch {
            sounds_on: Some(false),
            ..Default::default()
        });
        app.toggle_task(&id);
        assert_eq!(cue.0.get(), 1);
    }

    #[test]
    fn test_weighted_progress_example() {
        let (mut app, _, _dir) = create_test_app();
        let a = add(&mut app, "A", Priority::High);
        let b = add(&mut app, "B", Priority::Medium);
        add(&mut app, "C", Priority::High);
        app.toggle_task(&a);
        app.toggle_task(&b);

        let progress = app.progress();
        assert_eq!(progress.completed_weighted, 5);
        assert_eq!(progress.total_weighted, 8);
        assert_eq!(progress.percentage, 63);
    }

    #[test]
    fn test_selection_wraps_over_visible_tasks() {
        let (mut app, _, _dir) = create_test_app();
        add(&mut app, "Low", Priority::Low);
        add(&mut app, "High", Priority::High);

        assert_eq!(app.selected_task().unwrap().text, "High");
        app.move_selection_down();
        assert_eq!(app.selected_task().unwrap().text, "Low");
        app.move_selection_down();
        assert_eq!(app.selected_index, 0);
        app.move_selection_up();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let (mut app, _, _dir) = create_test_app();
        add(&mut app, "One", Priority::High);
        add(&mut app, "Two", Priority::Low);
        app.selected_index = 1;

        app.delete_selected();
        assert_eq!(app.state.tasks.len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_cycle_selected_priority() {
        let (mut app, _, _dir) = create_test_app();
        let id = add(&mut app, "Task", Priority::Low);
        app.cycle_selected_priority();
        let task = app.state.find_task(&id).unwrap();
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.priority_weight(), 2);
    }

    #[test]
    fn test_tag_filter_cycles_through_tags() {
        let (mut app, _, _dir) = create_test_app();
        app.add_task("Read", Priority::Low, false, parse_tags("study"), "");
        app.add_task("Jog", Priority::Low, false, parse_tags("health"), "");

        app.cycle_tag_filter();
        assert_eq!(app.tag_filter.as_deref(), Some("health"));
        assert_eq!(app.visible_tasks().len(), 1);
        app.cycle_tag_filter();
        assert_eq!(app.tag_filter.as_deref(), Some("study"));
        app.cycle_tag_filter();
        assert_eq!(app.tag_filter, None);
        assert_eq!(app.visible_tasks().len(), 2);
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let (mut app, _, _dir) = create_test_app();
        add(&mut app, "Read Economics", Priority::Low);
        add(&mut app, "Jog", Priority::Low);

        app.start_search();
        for c in "ECON".chars() {
            app.search_push(c);
        }
        app.finish_search();
        let visible: Vec<&str> = app.visible_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(visible, vec!["Read Economics"]);

        app.cancel_search();
        assert_eq!(app.visible_tasks().len(), 2);
    }

    #[test]
    fn test_settings_update_rebases_idle_widget() {
        let (mut app, _, _dir) = create_test_app();
        app.update_settings(SettingsPatch {
            pomodoro: Some(PomodoroDurations {
                work: 600,
                break_secs: 120,
            }),
            ..Default::default()
        });
        assert_eq!(app.widget.timer.time_left(), 600);
        assert_eq!(app.state.settings.pomodoro.break_secs, 120);
    }

    #[test]
    fn test_adjust_setting_rows() {
        let (mut app, _, _dir) = create_test_app();
        app.open_settings();
        app.adjust_setting(1, day(1));
        assert_eq!(app.state.settings.theme, Theme::Dark);

        app.settings_down();
        app.adjust_setting(-1, day(1));
        assert_eq!(app.state.settings.accent, Accent::Orange);

        app.settings_down();
        app.adjust_setting(1, day(1));
        assert_eq!(app.state.settings.pomodoro.work, 26 * 60);

        app.settings_down();
        for _ in 0..10 {
            app.adjust_setting(-1, day(1));
        }
        assert_eq!(app.state.settings.pomodoro.break_secs, 60);

        for _ in 0..4 {
            app.settings_up();
        }
        assert_eq!(app.selected_setting(), SettingsRow::Reset);
        app.adjust_setting(1, day(1));
        assert_eq!(app.ui_mode, UiMode::Confirm);
        assert_eq!(app.pending, Some(PendingAction::Reset));
    }

    #[test]
    fn test_update_mood() {
        let (mut app, _, _dir) = create_test_app();
        app.update_mood(MoodKind::Focused);
        assert_eq!(app.state.mood.value, MoodKind::Focused);
        assert_eq!(app.state.mood.saved_at, today());
        app.cycle_mood();
        assert_eq!(app.state.mood.value, MoodKind::Stressed);
    }

    #[test]
    fn test_reset_all_data() {
        let (mut app, _, _dir) = create_test_app();
        add(&mut app, "Task", Priority::High);
        app.state.history.push(HistoryEntry {
            date: day(1),
            completed_weighted: 1,
            total_weighted: 2,
        });
        app.search = "x".to_string();

        app.reset_all_data(day(5));
        assert!(app.state.tasks.is_empty());
        assert!(app.state.history.is_empty());
        assert_eq!(app.state.last_reset_date, day(5));
        assert!(app.search.is_empty());
        assert!(app.needs_save);
    }

    #[test]
    fn test_check_rollover() {
        let (mut app, _, _dir) = create_test_app();
        let id = app
            .add_task("Jog", Priority::High, true, BTreeSet::new(), "")
            .unwrap();
        app.toggle_task(&id);

        assert!(app.check_rollover(day(1)).is_none());
        assert!(app.state.find_task(&id).unwrap().done);

        let report = app.check_rollover(day(2)).unwrap();
        assert_eq!(report.entry.percentage(), 100);
        assert!(!app.state.find_task(&id).unwrap().done);
        assert!(app.check_rollover(day(2)).is_none());
        assert_eq!(app.state.history.len(), 1);
    }

    #[test]
    fn test_import_replaces_state_and_bad_import_leaves_it() {
        let (mut app, _, _dir) = create_test_app();
        add(&mut app, "Keep me", Priority::High);
        let before = app.state.clone();

        assert!(app.import_from_str("not json", day(1)).is_err());
        assert!(app.import_from_str("42", day(1)).is_err());
        assert_eq!(app.state, before);

        app.import_from_str(r#"{"settings":{"soundsOn":false}}"#, day(1))
            .unwrap();
        assert!(app.state.tasks.is_empty());
        assert!(!app.state.settings.sounds_on);
        assert_eq!(app.state.settings.pomodoro, PomodoroDurations::default());
    }

    #[test]
    fn test_import_syncs_focus_view_with_flag() {
        let (mut app, _, _dir) = create_test_app();
        assert!(app.focus.is_none());

        app.import_from_str(r#"{"ui":{"showFocusMode":true}}"#, day(1))
            .unwrap();
        assert!(app.state.ui.show_focus_mode);
        assert!(app.focus.is_some());

        app.import_from_str(r#"{"ui":{"showFocusMode":false}}"#, day(1))
            .unwrap();
        assert!(app.focus.is_none());
    }

    #[test]
    fn test_export_then_import_file() {
        let (mut app, _, dir) = create_test_app();
        add(&mut app, "Backed up", Priority::Medium);
        let path = app
            .export(Some(dir.path().join("backup.json")), day(1))
            .unwrap();
        let exported = app.state.clone();

        app.reset_all_data(day(1));
        app.import_from_file(&path, day(1)).unwrap();
        assert_eq!(app.state, exported);
    }

    #[test]
    fn test_confirm_import_with_missing_file_reports_error() {
        let (mut app, _, dir) = create_test_app();
        app.pending = Some(PendingAction::Import(dir.path().join("missing.json")));
        app.ui_mode = UiMode::Confirm;

        app.confirm_pending(day(1));
        assert!(app.status.as_deref().unwrap_or("").starts_with("Import failed"));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_flush_persists() {
        let (mut app, _, _dir) = create_test_app();
        add(&mut app, "Saved", Priority::Low);
        app.flush();
        assert!(!app.needs_save);

        let reloaded = Store::in_dir(app.store_path().parent().unwrap()).load(day(1));
        assert_eq!(reloaded.tasks, app.state.tasks);
    }

    #[test]
    fn test_widget_phase_end_plays_cue() {
        let (mut app, cue, _dir) = create_test_app();
        app.update_settings(SettingsPatch {
            pomodoro: Some(PomodoroDurations {
                work: 2,
                break_secs: 1,
            }),
            ..Default::default()
        });
        let start = Instant::now();
        app.toggle_widget_timer(start);
        app.tick(start + Duration::from_secs(2));

        assert_eq!(app.widget.timer.phase(), Phase::Break);
        assert!(!app.widget.timer.is_running());
        assert_eq!(cue.0.get(), 1);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_focus_session_is_dropped_on_close() {
        let (mut app, _, _dir) = create_test_app();
        let start = Instant::now();
        app.open_focus(start);
        assert!(app.state.ui.show_focus_mode);
        app.toggle_focus_timer(start);
        app.tick(start + Duration::from_secs(5));
        assert_eq!(app.focus.as_ref().unwrap().clock.timer.time_left(), 1495);

        app.press_exit(start + Duration::from_secs(5));
        assert!(app.focus.is_none());
        assert!(!app.state.ui.show_focus_mode);

        // Reopening starts from a fresh countdown
        app.open_focus(start + Duration::from_secs(6));
        assert_eq!(app.focus.as_ref().unwrap().clock.timer.time_left(), 1500);
    }

    #[test]
    fn test_shielded_exit_requires_hold() {
        let (mut app, _, _dir) = create_test_app();
        let start = Instant::now();
        app.open_focus(start);
        app.toggle_shield();

        app.press_exit(start);
        assert!(app.focus.is_some());
        app.tick(start + Duration::from_secs(1));
        assert!(app.focus.is_some());

        app.tick(start + EXIT_HOLD);
        assert!(app.focus.is_none());
    }

    #[test]
    fn test_focus_view_restored_from_prefs() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::defaults(day(1), Quote::default());
        state.ui.show_focus_mode = true;
        let app = App::new(
            state,
            Store::in_dir(dir.path()),
            Box::new(CountingCue::default()),
            Instant::now(),
            false,
        );
        assert!(app.focus.is_some());
    }

    #[test]
    fn test_input_form_submit() {
        let (mut app, _, _dir) = create_test_app();
        app.start_add_task();
        for c in "Plan".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        for c in "work, deep".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        app.input_form_next_field();
        app.input_form_add_char(' ');
        app.input_form_next_field();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let task = &app.state.tasks[0];
        assert_eq!(task.text, "Plan");
        assert_eq!(task.priority(), Priority::High);
        assert!(task.repeat_daily);
        assert_eq!(task.tags, parse_tags("deep,work"));
    }

    #[test]
    fn test_edit_form_updates_task_in_place() {
        let (mut app, _, _dir) = create_test_app();
        let id = add(&mut app, "Draft", Priority::Low);
        let created = app.state.find_task(&id).unwrap().created_at();
        app.needs_save = false;

        app.start_edit_task(&id);
        let form = app.input_form.as_ref().unwrap();
        assert!(form.is_edit());
        assert_eq!(form.text, "Draft");

        for c in " v2".chars() {
            app.input_form_add_char(c);
        }
        // tags -> notes -> priority
        app.input_form_next_field();
        app.input_form_next_field();
        app.input_form_next_field();
        app.input_form_add_char(' ');
        app.input_form_next_field();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert_eq!(app.state.tasks.len(), 1);
        let task = app.state.find_task(&id).unwrap();
        assert_eq!(task.text, "Draft v2");
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.priority_weight(), 2);
        assert!(task.repeat_daily);
        assert_eq!(task.created_at(), created);
        assert!(app.needs_save);
    }

    #[test]
    fn test_edit_form_keeps_text_when_cleared() {
        let (mut app, _, _dir) = create_test_app();
        let id = add(&mut app, "Keep", Priority::High);
        app.start_edit_task(&id);
        for _ in 0..4 {
            app.input_form_backspace();
        }
        app.submit_input_form();
        assert_eq!(app.state.find_task(&id).unwrap().text, "Keep");

        app.start_edit_task("missing");
        assert!(app.input_form.is_none());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_resolve_task_id_by_prefix() {
        let (mut app, _, _dir) = create_test_app();
        app.import_from_str(
            r#"{"tasks":[{"id":"ab-1","text":"One"},{"id":"ab-12","text":"Two"},{"id":"cd-3","text":"Three"}]}"#,
            day(1),
        )
        .unwrap();

        assert_eq!(app.resolve_task_id("ab-1").unwrap(), "ab-1");
        assert_eq!(app.resolve_task_id("cd").unwrap(), "cd-3");
        assert!(app.resolve_task_id("ab").is_err());
        assert!(app.resolve_task_id("zz").is_err());
        assert!(app.resolve_task_id("").is_err());
    }

    #[test]
    fn test_step_minutes_clamps() {
        assert_eq!(step_minutes(60, -1, 60), 60);
        assert_eq!(step_minutes(3600, 1, 60), 3600);
        assert_eq!(step_minutes(1500, 1, 120), 1560);
    }
}
