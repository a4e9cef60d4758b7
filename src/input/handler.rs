use crate::app::App;
use crate::domain::{today, TaskPatch, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::env;
use std::fs;
use std::process::Command;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Keys that leave the focus view
fn is_exit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('X'))
}

/// Key that opens the notes editor; the event loop suspends the terminal for it
pub fn is_edit_notes_key(app: &App, key: &KeyEvent) -> bool {
    app.focus.is_none()
        && app.ui_mode == UiMode::Normal
        && key.kind != KeyEventKind::Release
        && matches!(key.code, KeyCode::Char('e') | KeyCode::Char('E'))
}

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Result<bool> {
    if app.focus.is_some() {
        return handle_focus_mode(app, key, now);
    }

    // Releases only matter for the focus view's hold gesture
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
        UiMode::ImportPath => handle_import_path_mode(app, key),
        UiMode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent, now: Instant) -> Result<bool> {
    // Any key dismisses the last status message
    app.status = None;

    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            app.move_selection_down();
            Ok(false)
        }

        // Toggle done
        KeyCode::Char(' ') => {
            app.toggle_selected();
            Ok(false)
        }

        KeyCode::Enter => {
            app.start_edit_selected();
            Ok(false)
        }

        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.start_add_task();
            Ok(false)
        }

        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.cycle_selected_priority();
            Ok(false)
        }

        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        KeyCode::Char('e') | KeyCode::Char('E') => {
            edit_notes_external(app)?;
            Ok(false)
        }

        KeyCode::Char('/') => {
            app.start_search();
            Ok(false)
        }

        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.cycle_tag_filter();
            Ok(false)
        }

        // Pomodoro widget
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.toggle_widget_timer(now);
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_widget_timer();
            Ok(false)
        }

        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.open_focus(now);
            Ok(false)
        }

        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.cycle_mood();
            Ok(false)
        }

        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.open_settings();
            Ok(false)
        }

        // Clear search and tag filter
        KeyCode::Esc => {
            app.cancel_search();
            app.tag_filter = None;
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the focus view
fn handle_focus_mode(app: &mut App, key: KeyEvent, now: Instant) -> Result<bool> {
    if is_exit_key(key.code) {
        match key.kind {
            KeyEventKind::Release => app.release_exit(),
            KeyEventKind::Press | KeyEventKind::Repeat => app.press_exit(now),
        }
        return Ok(false);
    }

    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    match key.code {
        KeyCode::Char(' ') => app.toggle_focus_timer(now),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_focus_timer(),
        KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_shield(),
        // Toggling `f` closes the view like it opened it, unless shielded
        KeyCode::Char('f') | KeyCode::Char('F') => {
            let shielded = app.focus.as_ref().map_or(false, |s| s.exit.shield());
            if !shielded {
                app.close_focus();
            }
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode
fn handle_input_form_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab => app.input_form_next_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing a search query
fn handle_search_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the settings panel
fn handle_settings_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.settings_up(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_down(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust_setting(-1, today()),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('+')
        | KeyCode::Char(' ')
        | KeyCode::Enter => app.adjust_setting(1, today()),
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => app.close_settings(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing the path of a backup to import
fn handle_import_path_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_import_path(),
        KeyCode::Esc => app.ui_mode = UiMode::Settings,
        KeyCode::Backspace => app.path_pop(),
        KeyCode::Char(c) => app.path_push(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the yes/no confirmation
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(today()),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending(),
        _ => {}
    }
    Ok(false)
}

/// Edit notes of the selected task using external $EDITOR
fn edit_notes_external(app: &mut App) -> Result<()> {
    let Some(task) = app.selected_task() else {
        return Ok(());
    };
    let id = task.id().to_string();

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    });

    let mut temp_file = NamedTempFile::new()?;
    std::io::Write::write_all(&mut temp_file, task.notes.as_bytes())?;
    let temp_path = temp_file.into_temp_path();

    // The event loop has left raw mode before calling us
    let status = Command::new(&editor).arg(&temp_path).status()?;

    if status.success() {
        let notes = fs::read_to_string(&temp_path)?;
        app.update_task(
            &id,
            TaskPatch {
                notes: Some(notes.trim_end().to_string()),
                ..Default::default()
            },
        );
    }

    Ok(())
}
