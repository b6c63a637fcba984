//! The grid widget itself.
//!
//! [`DataGrid`] is a [`StatefulWidget`] over borrowed rows and columns. Each
//! render derives the sorted view from [`GridState`], draws exactly one of
//! the three bodies (loading, empty, populated) and records a layout
//! snapshot in the state so mouse coordinates can be resolved afterwards
//! with [`GridState::hit_test`].

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table, Widget,
};
use unicode_width::UnicodeWidthStr;

use super::column::{Column, KeyStrategy};
use super::state::{GridPhase, GridState, SortDirection};
use crate::theme::Theme;

/// Cursor marker, drawn left of the cursor row.
const CURSOR_SYMBOL: &str = "▶ ";
/// Selection gutter glyphs.
const MARK_ON: &str = "[x]";
const MARK_OFF: &str = "[ ]";
const MARK_SOME: &str = "[-]";
/// Loading indicator frames, advanced via [`DataGrid::spinner_frame`].
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// What a terminal coordinate resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHit {
    /// The select-all control in the header gutter.
    SelectAll,
    /// A column header, by index into the column slice.
    Header(usize),
    /// A data row, by index into the sorted view.
    Row(usize),
    /// A row's selection gutter, by index into the sorted view.
    RowToggle(usize),
}

/// Layout snapshot from the most recent render.
#[derive(Debug, Default, Clone)]
pub(crate) struct GridLayout {
    area: Rect,
    header_y: Option<u16>,
    data_top: u16,
    data_height: u16,
    offset: usize,
    row_count: usize,
    selectable: bool,
    /// Cursor gutter, then the selection gutter when selectable, then one
    /// rect per data column.
    spans: Vec<Rect>,
}

impl GridLayout {
    pub(crate) fn hit(&self, x: u16, y: u16) -> Option<GridHit> {
        if x < self.area.x
            || x >= self.area.right()
            || y < self.area.y
            || y >= self.area.bottom()
        {
            return None;
        }
        let span_at = |x: u16| self.spans.iter().position(|r| x >= r.x && x < r.right());
        let first_data_span = 1 + usize::from(self.selectable);

        if self.header_y == Some(y) {
            return match span_at(x)? {
                0 => None,
                1 if self.selectable => Some(GridHit::SelectAll),
                span => Some(GridHit::Header(span - first_data_span)),
            };
        }
        if y >= self.data_top && y < self.data_top.saturating_add(self.data_height) {
            let view_index = self.offset + usize::from(y - self.data_top);
            if view_index >= self.row_count {
                return None;
            }
            if self.selectable && span_at(x) == Some(1) {
                return Some(GridHit::RowToggle(view_index));
            }
            return Some(GridHit::Row(view_index));
        }
        None
    }
}

/// A sortable, selectable table over borrowed rows.
///
/// The widget owns no data and no state; rows, columns and key strategy are
/// borrowed for the duration of one render, and everything that must survive
/// the frame lives in [`GridState`].
///
/// ```no_run
/// use gridfield::grid::{Column, DataGrid, GridState, KeyStrategy};
/// use gridfield::theme::Theme;
///
/// struct User { id: i64, name: String }
///
/// let users = vec![User { id: 1, name: "ada".into() }];
/// let columns = vec![
///     Column::new("id", "ID", |u: &User| u.id.into()).sortable(),
///     Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable(),
/// ];
/// let keys = KeyStrategy::field(|u: &User| u.id.into());
/// let theme = Theme::dark();
/// let mut state = GridState::new();
///
/// let grid = DataGrid::new(&users, &columns, &keys)
///     .theme(&theme)
///     .title(" Users ");
/// # let _ = (grid, &mut state);
/// ```
pub struct DataGrid<'a, T> {
    rows: &'a [T],
    columns: &'a [Column<T>],
    keys: &'a KeyStrategy<T>,
    theme: Theme,
    block: Option<Block<'a>>,
    title: Option<String>,
    empty_message: &'a str,
    loading: bool,
    spinner_frame: usize,
    selectable: bool,
    focused: bool,
}

impl<'a, T> DataGrid<'a, T> {
    pub fn new(rows: &'a [T], columns: &'a [Column<T>], keys: &'a KeyStrategy<T>) -> Self {
        Self {
            rows,
            columns,
            keys,
            theme: Theme::default(),
            block: None,
            title: None,
            empty_message: "No rows",
            loading: false,
            spinner_frame: 0,
            selectable: false,
            focused: true,
        }
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }

    /// Replace the default themed surrounding block.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set the title of the default block. Ignored when [`Self::block`] is
    /// used.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Message shown when the collection is empty and not loading.
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// Draw the loading body instead of rows, regardless of row count.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Advance the loading indicator. Callers bump this once per tick; the
    /// widget wraps it over its frame set.
    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    /// Show the selection gutter and select-all control.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Dim the border when another component holds focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn header_cell(&self, column: &Column<T>, state: &GridState) -> Cell<'static> {
        let text = match state.sort_direction(&column.id) {
            Some(SortDirection::Ascending) => format!("{}↑", column.title),
            Some(SortDirection::Descending) => format!("{}↓", column.title),
            None => column.title.clone(),
        };
        Cell::from(Span::raw(text))
    }

    fn select_all_mark(&self, state: &GridState) -> &'static str {
        if state.all_selected(self.rows) {
            MARK_ON
        } else if state.partially_selected(self.rows) {
            MARK_SOME
        } else {
            MARK_OFF
        }
    }

    fn header_row(&self, state: &GridState) -> Row<'static> {
        let mut cells = Vec::with_capacity(self.columns.len() + 1);
        if self.selectable {
            cells.push(Cell::from(self.select_all_mark(state)).style(self.theme.control));
        }
        for column in self.columns {
            cells.push(self.header_cell(column, state));
        }
        Row::new(cells).height(1).style(self.theme.header)
    }

    /// Selection gutter width (when selectable) followed by one entry per
    /// column.
    fn column_widths(&self) -> Vec<Constraint> {
        let mut widths = Vec::with_capacity(self.columns.len() + 1);
        if self.selectable {
            widths.push(Constraint::Length(MARK_OFF.width() as u16));
        }
        widths.extend(self.columns.iter().map(|c| c.width));
        widths
    }

    /// Mirror the table's internal column layout so clicks can be mapped
    /// back to headers and gutter cells. The table reserves the cursor
    /// gutter first without spacing, then splits the rest with spacing
    /// between columns.
    fn column_spans(&self, inner: Rect, widths: &[Constraint]) -> Vec<Rect> {
        let chunks = Layout::horizontal([
            Constraint::Length(CURSOR_SYMBOL.width() as u16),
            Constraint::Fill(1),
        ])
        .split(inner);
        let mut spans = vec![chunks[0]];
        spans.extend(
            Layout::horizontal(widths.iter().copied())
                .spacing(1)
                .split(chunks[1])
                .iter()
                .copied(),
        );
        spans
    }

    fn loading_text(&self) -> String {
        let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        format!("{} Loading...", frame)
    }

    fn centered_line(&self, inner: Rect, buf: &mut Buffer, text: &str, style: Style) {
        if inner.height == 0 || inner.width == 0 {
            return;
        }
        let line = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .render(line, buf);
    }
}

impl<T> StatefulWidget for DataGrid<'_, T> {
    type State = GridState;

    fn render(mut self, area: Rect, buf: &mut Buffer, state: &mut GridState) {
        let block = match self.block.take() {
            Some(block) => block,
            None => {
                let border_style = if self.focused {
                    Style::default().fg(self.theme.accent)
                } else {
                    Style::default().fg(self.theme.border)
                };
                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(self.theme.border_type)
                    .border_style(border_style);
                if let Some(title) = &self.title {
                    block = block.title(title.clone());
                }
                block
            }
        };
        let inner = block.inner(area);
        block.render(area, buf);

        state.layout = GridLayout {
            area: inner,
            ..GridLayout::default()
        };
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        match GridPhase::of(self.loading, self.rows.len()) {
            GridPhase::Loading => self.render_loading(inner, buf, state),
            GridPhase::Empty => {
                self.centered_line(inner, buf, self.empty_message, self.theme.empty);
            }
            GridPhase::Populated => {
                if self.columns.is_empty() {
                    tracing::debug!("grid rendered with no columns");
                    return;
                }
                self.render_rows(inner, buf, state);
            }
        }
    }
}

impl<T> DataGrid<'_, T> {
    /// Header plus a single placeholder row spanning every column. Headers
    /// and the select-all gutter stay visible, but no data rows exist yet so
    /// clicks below the header resolve to nothing.
    fn render_loading(self, inner: Rect, buf: &mut Buffer, state: &mut GridState) {
        if self.columns.is_empty() {
            self.centered_line(inner, buf, &self.loading_text(), self.theme.loading);
            return;
        }

        let widths = self.column_widths();
        let table = Table::new(Vec::<Row>::new(), widths.clone())
            .header(self.header_row(state))
            .column_spacing(1)
            .highlight_symbol(CURSOR_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);
        StatefulWidget::render(table, inner, buf, &mut state.table);

        if inner.height > 1 {
            let line = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            Paragraph::new(self.loading_text())
                .style(self.theme.loading)
                .alignment(Alignment::Center)
                .render(line, buf);
        }

        state.layout = GridLayout {
            area: inner,
            header_y: Some(inner.y),
            data_top: inner.y + 1,
            data_height: inner.height.saturating_sub(1),
            offset: 0,
            row_count: 0,
            selectable: self.selectable,
            spans: self.column_spans(inner, &widths),
        };
    }

    fn render_rows(self, inner: Rect, buf: &mut Buffer, state: &mut GridState) {
        let view = state.sorted_view(self.rows, self.columns);
        state.clamp_cursor(view.len());

        let rows: Vec<Row> = view
            .iter()
            .enumerate()
            .map(|(view_index, (original_index, row))| {
                let mut cells = Vec::with_capacity(self.columns.len() + 1);
                if self.selectable {
                    let mark = if state.is_selected(self.rows, self.keys, *original_index) {
                        MARK_ON
                    } else {
                        MARK_OFF
                    };
                    cells.push(Cell::from(mark).style(self.theme.control));
                }
                for column in self.columns {
                    cells.push(column.cell_for(row, view_index));
                }
                Row::new(cells)
            })
            .collect();

        let widths = self.column_widths();
        let table = Table::new(rows, widths.clone())
            .header(self.header_row(state))
            .column_spacing(1)
            .row_highlight_style(self.theme.selected)
            .highlight_symbol(CURSOR_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);

        StatefulWidget::render(table, inner, buf, &mut state.table);

        state.layout = GridLayout {
            area: inner,
            header_y: Some(inner.y),
            data_top: inner.y + 1,
            data_height: inner.height.saturating_sub(1),
            offset: state.table.offset(),
            row_count: view.len(),
            selectable: self.selectable,
            spans: self.column_spans(inner, &widths),
        };
    }
}
