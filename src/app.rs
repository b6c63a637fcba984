//! Demo application state and navigation logic.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::{Alignment, Constraint};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Cell;

use crate::data::duration::format_duration;
use crate::data::{filter_users, User, UserStatus};
use crate::grid::{Column, GridState, KeyStrategy, SortDirection};
use crate::input::TextFieldState;
use crate::source::RowSource;
use crate::theme::Theme;

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Grid,
}

impl Focus {
    /// Cycle to the other pane.
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Grid,
            Focus::Grid => Focus::Search,
        }
    }

    /// Returns the display label for this pane.
    pub fn label(&self) -> &'static str {
        match self {
            Focus::Search => "Search",
            Focus::Grid => "Users",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub focus: Focus,

    // Row pipeline
    source: Box<dyn RowSource<User>>,
    /// Full collection as last delivered by the source.
    pub users: Vec<User>,
    /// Rows currently handed to the grid, after the search filter.
    pub visible: Vec<User>,
    pub loading: bool,
    pub load_error: Option<String>,

    // Widgets
    pub columns: Vec<Column<User>>,
    pub keys: KeyStrategy<User>,
    pub grid: GridState,
    pub search: TextFieldState,

    // UI
    pub theme: Theme,
    started: Instant,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around the given row source.
    pub fn new(source: Box<dyn RowSource<User>>, theme: Theme) -> Self {
        let columns = user_columns(&theme);
        Self {
            running: true,
            show_help: false,
            focus: Focus::Grid,
            source,
            users: Vec::new(),
            visible: Vec::new(),
            loading: true,
            load_error: None,
            columns,
            keys: KeyStrategy::field(|u: &User| u.id.into()),
            grid: GridState::new(),
            search: TextFieldState::new(),
            theme,
            started: Instant::now(),
            status_message: None,
        }
    }

    /// Animation frame for the loading indicator, derived from wall time.
    pub fn spinner_frame(&self) -> usize {
        self.started.elapsed().as_millis() as usize / 100
    }

    /// Returns a description of the current row source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the row source for a fresh collection.
    ///
    /// Returns Ok(true) if new rows were received. The first delivery ends
    /// the loading phase; selection and sort carry over untouched.
    pub fn reload_rows(&mut self) -> Result<bool> {
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return Ok(false);
        }

        if let Some(rows) = self.source.poll() {
            tracing::debug!(count = rows.len(), "rows delivered");
            if self.loading {
                self.set_status_message(format!(
                    "Loaded {} rows in {}",
                    rows.len(),
                    format_duration(self.started.elapsed())
                ));
            }
            self.users = rows;
            self.loading = false;
            self.load_error = None;
            self.apply_filter();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Re-derive the visible rows from the search text.
    ///
    /// This replaces the grid's row collection wholesale; sort and selection
    /// state survive because they live in `grid`, not in the rows.
    pub fn apply_filter(&mut self) {
        self.visible = filter_users(&self.users, self.search.text());
        self.grid.clamp_cursor(self.visible.len());
    }

    /// Map a sorted-view index back to an index into `visible`.
    pub fn view_to_original(&self, view_index: usize) -> Option<usize> {
        self.grid
            .sorted_view(&self.visible, &self.columns)
            .get(view_index)
            .map(|(original, _)| *original)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cursor_down(&mut self) {
        if self.loading {
            return;
        }
        self.grid.cursor_down(self.visible.len());
    }

    pub fn cursor_up(&mut self) {
        if self.loading {
            return;
        }
        self.grid.cursor_up(self.visible.len());
    }

    /// Move the cursor by a signed amount without wrapping.
    pub fn cursor_by(&mut self, delta: isize) {
        if self.loading || self.visible.is_empty() {
            return;
        }
        let max = self.visible.len() - 1;
        let current = self.grid.cursor().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, max as isize) as usize;
        self.grid.table.select(Some(next));
    }

    pub fn cursor_first(&mut self) {
        if self.loading || self.visible.is_empty() {
            return;
        }
        self.grid.table.select(Some(0));
    }

    pub fn cursor_last(&mut self) {
        if self.loading || self.visible.is_empty() {
            return;
        }
        self.grid.table.select(Some(self.visible.len() - 1));
    }

    /// Place the cursor on a specific sorted-view row.
    pub fn cursor_to(&mut self, view_index: usize) {
        if self.loading || view_index >= self.visible.len() {
            return;
        }
        self.grid.table.select(Some(view_index));
    }

    /// Toggle selection of the row under the cursor.
    pub fn toggle_cursor_row(&mut self) {
        if self.loading {
            return;
        }
        let Some(view_index) = self.grid.cursor() else {
            return;
        };
        self.toggle_view_row(view_index);
    }

    /// Toggle selection of a sorted-view row.
    pub fn toggle_view_row(&mut self, view_index: usize) {
        if self.loading {
            return;
        }
        let Some(original) = self.view_to_original(view_index) else {
            return;
        };
        let name = self.visible[original].name.clone();
        let selected = self.grid.toggle_row(&self.visible, &self.keys, original);
        let verb = if selected { "selected" } else { "deselected" };
        self.set_status_message(format!("{} {}", verb, name));
        self.announce_selection();
    }

    /// Toggle bulk selection of every visible row.
    pub fn toggle_all(&mut self) {
        if self.loading {
            return;
        }
        self.grid.toggle_select_all(&self.visible, &self.keys);
        let message = if self.grid.all_selected(&self.visible) {
            format!("selected all {} rows", self.visible.len())
        } else {
            "selection cleared".to_string()
        };
        self.set_status_message(message);
        self.announce_selection();
    }

    /// Advance the sort cycle on a column by its position.
    pub fn sort_by_position(&mut self, position: usize) {
        if self.loading {
            return;
        }
        let Some(column) = self.columns.get(position) else {
            return;
        };
        if !column.sortable {
            self.set_status_message(format!("{} is not sortable", column.title));
            return;
        }
        let id = column.id.clone();
        let title = column.title.clone();
        self.grid.sort_cycle(&self.columns, &id);
        let message = match self.grid.sort_direction(&id) {
            Some(SortDirection::Ascending) => format!("sorted by {} ascending", title),
            Some(SortDirection::Descending) => format!("sorted by {} descending", title),
            None => "sort cleared".to_string(),
        };
        self.set_status_message(message);
    }

    /// The selection payload: count plus names in display order.
    pub fn selection_summary(&self) -> Option<String> {
        let count = self.grid.selected_count(&self.visible, &self.keys);
        if count == 0 {
            return None;
        }
        let names: Vec<&str> = self
            .grid
            .selected_rows(&self.visible, &self.columns, &self.keys)
            .iter()
            .map(|u| u.name.as_str())
            .collect();
        Some(format!("{} selected: {}", count, names.join(", ")))
    }

    fn announce_selection(&self) {
        let count = self.grid.selected_count(&self.visible, &self.keys);
        tracing::debug!(
            count,
            stale = self.grid.selected.len().saturating_sub(count),
            "selection changed"
        );
    }

    /// Export the selected rows (all visible rows when none are selected)
    /// to a pretty-printed JSON file, in display order.
    pub fn export_selection(&self, path: &Path) -> Result<usize> {
        use std::io::Write;

        let selected = self
            .grid
            .selected_rows(&self.visible, &self.columns, &self.keys);
        let rows: Vec<&User> = if selected.is_empty() {
            self.grid
                .sorted_view(&self.visible, &self.columns)
                .into_iter()
                .map(|(_, u)| u)
                .collect()
        } else {
            selected
        };

        let export = serde_json::json!({
            "count": rows.len(),
            "users": rows,
        });

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(rows.len())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// The demo's column set over [`User`].
pub fn user_columns(theme: &Theme) -> Vec<Column<User>> {
    let success = theme.success;
    let warning = theme.warning;
    let danger = theme.danger;
    let muted = theme.placeholder;

    vec![
        Column::new("id", "ID", |u: &User| u.id.into())
            .sortable()
            .width(Constraint::Length(4))
            .align(Alignment::Right),
        Column::new("name", "Name", |u: &User| u.name.as_str().into())
            .sortable()
            .width(Constraint::Fill(2)),
        Column::new("email", "Email", |u: &User| u.email.as_str().into())
            .sortable()
            .width(Constraint::Fill(3)),
        Column::new("role", "Role", |u: &User| u.role.as_str().into()).width(Constraint::Fill(1)),
        Column::new("status", "Status", |u: &User| u.status.label().into())
            .width(Constraint::Min(9))
            .render_with(move |_, user, _| {
                let color = match user.status {
                    UserStatus::Active => success,
                    UserStatus::Away => warning,
                    UserStatus::Suspended => danger,
                };
                Cell::from(Span::styled(
                    user.status.label(),
                    Style::default().fg(color),
                ))
            }),
        Column::new("last_login", "Last seen", |u: &User| {
            u.last_login.clone().into()
        })
        .sortable()
        .width(Constraint::Min(10))
        .render_with(move |value, _, _| {
            if value.is_null() {
                Cell::from(Span::styled("-", muted))
            } else {
                Cell::from(value.to_string())
            }
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_users;
    use crate::source::ChannelSource;

    fn ready_app() -> App {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), Theme::dark());
        tx.send(Some(sample_users())).unwrap();
        app.reload_rows().unwrap();
        app
    }

    #[test]
    fn loading_ends_on_first_delivery() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), Theme::dark());
        assert!(app.loading);
        assert!(!app.reload_rows().unwrap());
        assert!(app.loading);

        tx.send(Some(sample_users())).unwrap();
        assert!(app.reload_rows().unwrap());
        assert!(!app.loading);
        assert_eq!(app.visible.len(), app.users.len());
        assert!(app
            .get_status_message()
            .unwrap()
            .starts_with("Loaded 8 rows in"));
    }

    #[test]
    fn grid_operations_are_inert_while_loading() {
        let (_tx, source) = ChannelSource::<User>::create("test");
        let mut app = App::new(Box::new(source), Theme::dark());

        app.cursor_down();
        app.toggle_cursor_row();
        app.toggle_all();
        app.sort_by_position(1);
        assert_eq!(app.grid.cursor(), None);
        assert!(app.grid.selected.is_empty());
        assert_eq!(app.grid.sort, None);
    }

    #[test]
    fn filtering_replaces_rows_but_keeps_sort_and_selection() {
        let mut app = ready_app();
        app.sort_by_position(1);
        // Select Bob (id 1) via the sorted view: case-folded ascending puts
        // alice first, Bob second.
        app.cursor_down();
        app.cursor_down();
        app.toggle_cursor_row();
        assert_eq!(app.selection_summary().unwrap(), "1 selected: Bob");

        app.search.set_text("ali");
        app.apply_filter();
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.visible[0].name, "alice");
        // Bob's key is stale but retained.
        assert_eq!(app.grid.selected.len(), 1);
        assert!(app.selection_summary().is_none());

        app.search.clear();
        app.apply_filter();
        assert_eq!(app.selection_summary().unwrap(), "1 selected: Bob");
        // Sort survived the filter round trip.
        assert_eq!(
            app.grid.sort_direction("name"),
            Some(SortDirection::Ascending)
        );
    }

    #[test]
    fn toggle_cursor_row_follows_the_sorted_view() {
        let mut app = ready_app();
        // Descending by name puts heidi first.
        app.sort_by_position(1);
        app.sort_by_position(1);
        app.cursor_first();
        app.toggle_cursor_row();
        assert_eq!(app.selection_summary().unwrap(), "1 selected: heidi");
    }

    #[test]
    fn select_all_summary_lists_names_in_display_order() {
        let mut app = ready_app();
        app.sort_by_position(1);
        app.toggle_all();
        let summary = app.selection_summary().unwrap();
        assert!(summary.starts_with("8 selected: alice, Bob"));

        app.toggle_all();
        assert!(app.selection_summary().is_none());
    }

    #[test]
    fn sort_cycle_status_messages_track_the_phase() {
        let mut app = ready_app();
        app.sort_by_position(1);
        assert_eq!(app.get_status_message(), Some("sorted by Name ascending"));
        app.sort_by_position(1);
        assert_eq!(app.get_status_message(), Some("sorted by Name descending"));
        app.sort_by_position(1);
        assert_eq!(app.get_status_message(), Some("sort cleared"));
    }

    #[test]
    fn non_sortable_column_reports_instead_of_sorting() {
        let mut app = ready_app();
        // Role column is not sortable.
        app.sort_by_position(3);
        assert_eq!(app.grid.sort, None);
        assert_eq!(app.get_status_message(), Some("Role is not sortable"));
    }

    #[test]
    fn export_writes_selected_rows_in_display_order() {
        let mut app = ready_app();
        app.sort_by_position(1);
        app.sort_by_position(1);
        app.cursor_first();
        app.toggle_cursor_row();
        app.cursor_down();
        app.toggle_cursor_row();

        let file = tempfile::NamedTempFile::new().unwrap();
        let count = app.export_selection(file.path()).unwrap();
        assert_eq!(count, 2);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["users"][0]["name"], "heidi");
        assert_eq!(json["users"][1]["name"], "Grace");
    }

    #[test]
    fn export_without_selection_takes_all_visible_rows() {
        let app = ready_app();
        let file = tempfile::NamedTempFile::new().unwrap();
        let count = app.export_selection(file.path()).unwrap();
        assert_eq!(count, 8);
    }
}
