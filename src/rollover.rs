//! Daily rollover: closes out the previous tracked day.
//!
//! The check is polled (at startup and every [`ROLLOVER_POLL`]) rather than
//! scheduled for midnight. However many days were skipped, one check records
//! a single history entry, dated with the last tracked day.

use crate::domain::{calculate_progress, AppState, HistoryEntry, Quote};
use chrono::NaiveDate;
use std::time::Duration;

/// Most recent history entries kept
pub const HISTORY_LIMIT: usize = 30;

/// How often the running app re-checks the date
pub const ROLLOVER_POLL: Duration = Duration::from_secs(60);

/// What a rollover did, for logging and the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverReport {
    pub closed_day: NaiveDate,
    pub entry: HistoryEntry,
    pub reset_tasks: usize,
}

/// Apply the rollover for `today`, drawing the new quote from `next_quote`.
///
/// Returns `None` (and leaves the state untouched) when `today` has already
/// been rolled over. The snapshot uses the tasks as they are now, which may
/// include edits made after midnight but before this check.
pub fn apply_rollover(
    state: &mut AppState,
    today: NaiveDate,
    next_quote: impl FnOnce() -> Quote,
) -> Option<RolloverReport> {
    if state.last_reset_date == today {
        return None;
    }

    let progress = calculate_progress(&state.tasks);
    let entry = HistoryEntry {
        date: state.last_reset_date,
        completed_weighted: progress.completed_weighted,
        total_weighted: progress.total_weighted,
    };
    push_history(&mut state.history, entry.clone());

    let mut reset_tasks = 0;
    for task in state.tasks.iter_mut().filter(|t| t.repeat_daily) {
        if task.done {
            reset_tasks += 1;
        }
        task.done = false;
    }

    let closed_day = state.last_reset_date;
    state.last_reset_date = today;
    state.quote_of_day = next_quote();

    Some(RolloverReport {
        closed_day,
        entry,
        reset_tasks,
    })
}

/// Append to the history log, dropping the oldest entries past the cap
fn push_history(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.push(entry);
    if history.len() > HISTORY_LIMIT {
        let excess = history.len() - HISTORY_LIMIT;
        history.drain(..excess);
    }
}

/// The last `n` history entries, oldest first
pub fn recent_history(history: &[HistoryEntry], n: usize) -> &[HistoryEntry] {
    &history[history.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, Task};
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn state_on(d: u32) -> AppState {
        AppState::defaults(day(d), Quote::from_catalog(0))
    }

    fn recurring_done_task() -> Task {
        let mut t = Task::new("Morning jog", Priority::High);
        t.repeat_daily = true;
        t.done = true;
        t
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut state = state_on(1);
        state.tasks.push(recurring_done_task());
        let before = state.clone();

        assert_eq!(apply_rollover(&mut state, day(1), || Quote::from_catalog(5)), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_new_day_records_history_and_resets_recurring() {
        let mut state = state_on(1);
        state.tasks.push(recurring_done_task());
        let mut one_off = Task::new("File taxes", Priority::Medium);
        one_off.done = true;
        state.tasks.push(one_off);

        let report = apply_rollover(&mut state, day(2), || Quote::from_catalog(5)).unwrap();

        assert_eq!(report.closed_day, day(1));
        assert_eq!(report.reset_tasks, 1);
        assert_eq!(
            state.history,
            vec![HistoryEntry {
                date: day(1),
                completed_weighted: 5,
                total_weighted: 5,
            }]
        );
        assert!(!state.tasks[0].done);
        // Non-recurring tasks keep their state across days
        assert!(state.tasks[1].done);
        assert_eq!(state.last_reset_date, day(2));
        assert_eq!(state.quote_of_day, Quote::from_catalog(5));
    }

    #[test]
    fn test_second_check_same_day_adds_nothing() {
        let mut state = state_on(1);
        assert!(apply_rollover(&mut state, day(2), || Quote::from_catalog(1)).is_some());
        assert!(apply_rollover(&mut state, day(2), || Quote::from_catalog(2)).is_none());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.last_reset_date, day(2));
        assert_eq!(state.quote_of_day, Quote::from_catalog(1));
    }

    #[test]
    fn test_gap_records_single_entry_for_last_tracked_day() {
        let mut state = state_on(1);
        apply_rollover(&mut state, day(9), Quote::default);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].date, day(1));
        assert_eq!(state.last_reset_date, day(9));
    }

    #[test]
    fn test_history_is_capped() {
        let mut state = AppState::defaults(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Quote::default(),
        );
        let mut date = state.last_reset_date;
        for _ in 0..45 {
            date = date.succ_opt().unwrap();
            apply_rollover(&mut state, date, Quote::default);
            assert!(state.history.len() <= HISTORY_LIMIT);
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        // Oldest entries were dropped first
        assert_eq!(
            state.history[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
    }

    #[test]
    fn test_recent_history() {
        let entries: Vec<HistoryEntry> = (1..=10)
            .map(|d| HistoryEntry {
                date: day(d),
                completed_weighted: 0,
                total_weighted: 0,
            })
            .collect();
        let last = recent_history(&entries, 7);
        assert_eq!(last.len(), 7);
        assert_eq!(last[0].date, day(4));
        assert_eq!(recent_history(&entries[..2], 7).len(), 2);
    }
}
