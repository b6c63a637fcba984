use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Focus};
use crate::grid::GridHit;
use crate::input::InputEvent;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.focus {
        Focus::Search => handle_search_key(app, key),
        Focus::Grid => handle_grid_key(app, key),
    }
}

/// Key input while the search field has focus.
fn handle_search_key(app: &mut App, key: KeyEvent) {
    // Focus moves take priority over editing
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            return;
        }
        KeyCode::Esc => {
            app.focus = Focus::Grid;
            return;
        }
        _ => {}
    }

    match app.search.handle_key(key) {
        InputEvent::Changed => app.apply_filter(),
        InputEvent::Submitted => app.focus = Focus::Grid,
        InputEvent::Handled | InputEvent::Ignored => {}
    }
}

/// Key input while the grid has focus.
fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Focus
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => {
            app.focus = Focus::Search;
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::PageUp => app.cursor_by(-10),
        KeyCode::PageDown => app.cursor_by(10),
        KeyCode::Home => app.cursor_first(),
        KeyCode::End => app.cursor_last(),

        // Selection
        KeyCode::Char(' ') => app.toggle_cursor_row(),
        KeyCode::Char('a') => app.toggle_all(),

        // Sorting: digits address columns left to right
        KeyCode::Char(c @ '1'..='9') => {
            app.sort_by_position(c as usize - '1' as usize);
        }

        // Reload
        KeyCode::Char('r') => {
            let _ = app.reload_rows();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("users_export.json");
            match app.export_selection(&export_path) {
                Ok(count) => {
                    app.set_status_message(format!(
                        "Exported {} rows to {}",
                        count,
                        export_path.display()
                    ));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel moves the cursor without wrapping
        MouseEventKind::ScrollUp => app.cursor_by(-1),
        MouseEventKind::ScrollDown => app.cursor_by(1),

        MouseEventKind::Down(MouseButton::Left) => {
            let hit = app.grid.hit_test(mouse.column, mouse.row);
            if hit.is_some() {
                app.focus = Focus::Grid;
            }
            match hit {
                Some(GridHit::Header(column)) => app.sort_by_position(column),
                Some(GridHit::SelectAll) => app.toggle_all(),
                Some(GridHit::RowToggle(view_index)) => {
                    app.cursor_to(view_index);
                    app.toggle_view_row(view_index);
                }
                Some(GridHit::Row(view_index)) => app.cursor_to(view_index),
                None => {}
            }
        }

        _ => {}
    }
}
