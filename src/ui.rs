//! Demo page layout and chrome.
//!
//! Composes the title bar, search field, user grid, selection footer and
//! status bar, plus the help overlay shown as a centered modal.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::grid::{DataGrid, SortDirection};
use crate::input::TextField;

/// Minimum terminal size for a usable layout.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 14;

/// Render the whole demo page.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let message = format!(
            "Terminal too small ({}x{}, need {}x{})",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        frame.render_widget(Paragraph::new(message), area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(3), // Search field
        Constraint::Min(5),    // Grid
        Constraint::Length(1), // Selection footer
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, app, chunks[0]);

    let search = TextField::new("Search")
        .placeholder("name or email")
        .theme(&app.theme)
        .focused(app.focus == Focus::Search);
    frame.render_stateful_widget(search, chunks[1], &mut app.search);

    let grid = DataGrid::new(&app.visible, &app.columns, &app.keys)
        .theme(&app.theme)
        .title(grid_title(app))
        .empty_message("No users")
        .loading(app.loading)
        .spinner_frame(app.spinner_frame())
        .selectable(true)
        .focused(app.focus == Focus::Grid);
    frame.render_stateful_widget(grid, chunks[2], &mut app.grid);

    render_footer(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        render_help(frame, app, area);
    }
}

/// Title bar: application name, focused pane and row source.
fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" GRIDFIELD ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(app.focus.label(), Style::default().fg(app.theme.accent)),
        Span::raw(" │ "),
        Span::raw(app.source_description().to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Grid block title: visible/total counts plus the active sort.
fn grid_title(app: &App) -> String {
    let sort_info = match &app.grid.sort {
        Some(sort) => {
            let arrow = match sort.direction {
                SortDirection::Ascending => "↑",
                SortDirection::Descending => "↓",
            };
            format!(" [sort: {}{}]", sort.column, arrow)
        }
        None => String::new(),
    };
    format!(
        " Users ({}/{}){} ",
        app.visible.len(),
        app.users.len(),
        sort_info
    )
}

/// Selection footer: the callback payload, or a hint when nothing is selected.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = match app.selection_summary() {
        Some(summary) => {
            Paragraph::new(format!(" {}", summary)).style(app.theme.control)
        }
        None => Paragraph::new(" Space:select  a:select all")
            .style(Style::default().add_modifier(Modifier::DIM)),
    };
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages and errors first, then context-sensitive
/// controls for the focused pane.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.accent));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit", err)
    } else if app.loading {
        " Loading... | Tab:search q:quit".to_string()
    } else {
        let controls = match app.focus {
            Focus::Grid => "Tab:search ↑↓ j/k:move Space:select a:all 1-6:sort e:export ?:help q:quit",
            Focus::Search => "Type to filter | Tab:grid Ctrl+U:clear Esc:grid",
        };
        format!(" {}", controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Focus",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab         Switch search/grid"),
        Line::from("  Esc         Back to the grid"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Grid",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Move cursor"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Space       Toggle row selection"),
        Line::from("  a           Toggle select all"),
        Line::from("  1..6        Sort by column (3-step cycle)"),
        Line::from("  Mouse       Click headers, boxes, rows"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e           Export selection to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.accent));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
