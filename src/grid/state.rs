//! Grid state: sort order, selection set and cursor.
//!
//! [`GridState`] owns everything that survives between frames. It never owns
//! the rows; every operation takes the caller's current row slice (plus the
//! column and key configuration) as arguments, so callers can swap, filter
//! or reload their collection freely between events.

use std::collections::HashSet;

use ratatui::widgets::TableState;

use super::column::{compare_values, Column, KeyStrategy, RowKey};
use super::widget::{GridHit, GridLayout};

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: one column, one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    /// Column identifier, matching [`Column::id`].
    pub column: String,
    pub direction: SortDirection,
}

/// Which of the three mutually exclusive grid bodies to draw.
///
/// Loading wins over empty: a caller refreshing an empty collection sees the
/// loading body, not the empty message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
    Loading,
    Empty,
    Populated,
}

impl GridPhase {
    /// Classify the current frame.
    pub fn of(loading: bool, row_count: usize) -> Self {
        if loading {
            GridPhase::Loading
        } else if row_count == 0 {
            GridPhase::Empty
        } else {
            GridPhase::Populated
        }
    }
}

/// Retained grid state: active sort, selected row keys, cursor position and
/// the layout snapshot recorded by the last render (for mouse hit-testing).
///
/// Selection is a set of [`RowKey`]s, deliberately independent of the rows
/// themselves: keys whose rows have disappeared from the caller's collection
/// stay in the set untouched, and become live again if the rows come back.
/// Only [`toggle_select_all`](GridState::toggle_select_all) replaces the set
/// wholesale.
#[derive(Debug, Default)]
pub struct GridState {
    /// Active sort, if any. `None` renders the caller's original order.
    pub sort: Option<ColumnSort>,
    /// Selected row keys, including keys for rows not currently present.
    pub selected: HashSet<RowKey>,
    /// Underlying ratatui table state (cursor row and scroll offset).
    pub table: TableState,
    pub(crate) layout: GridLayout,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the sort cycle for a column: unsorted to ascending, ascending
    /// to descending, descending back to unsorted. Activating a different
    /// column always starts at ascending. Unknown or non-sortable columns
    /// leave the state untouched.
    pub fn sort_cycle<T>(&mut self, columns: &[Column<T>], column_id: &str) {
        let Some(column) = columns.iter().find(|c| c.id == column_id) else {
            tracing::debug!(column = column_id, "sort requested for unknown column");
            return;
        };
        if !column.sortable {
            return;
        }
        self.sort = match self.sort.take() {
            Some(sort) if sort.column == column_id => match sort.direction {
                SortDirection::Ascending => Some(ColumnSort {
                    column: sort.column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(ColumnSort {
                column: column_id.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// The active direction on `column_id`, if that column is the sorted one.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|s| s.column == column_id)
            .map(|s| s.direction)
    }

    /// Produce the display order as `(original_index, row)` pairs.
    ///
    /// With no active sort, or a sort referencing a column that no longer
    /// exists, rows come back in the caller's original order. The sort is
    /// stable, so rows comparing equal keep their relative input order and
    /// re-deriving the view never reshuffles them.
    pub fn sorted_view<'a, T>(&self, rows: &'a [T], columns: &[Column<T>]) -> Vec<(usize, &'a T)> {
        let mut view: Vec<(usize, &T)> = rows.iter().enumerate().collect();
        let Some(sort) = &self.sort else {
            return view;
        };
        let Some(column) = columns.iter().find(|c| c.id == sort.column) else {
            tracing::debug!(
                column = %sort.column,
                "active sort references a missing column, keeping input order"
            );
            return view;
        };
        let values: Vec<_> = rows.iter().map(|row| column.value_of(row)).collect();
        view.sort_by(|(a, _), (b, _)| {
            let ordering = compare_values(&values[*a], &values[*b]);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        view
    }

    /// Toggle selection of the row at `original_index`, returning whether the
    /// row is selected afterwards. Out-of-range indexes are ignored.
    pub fn toggle_row<T>(
        &mut self,
        rows: &[T],
        keys: &KeyStrategy<T>,
        original_index: usize,
    ) -> bool {
        let Some(row) = rows.get(original_index) else {
            tracing::debug!(index = original_index, "selection toggle out of range");
            return false;
        };
        let key = keys.key_of(row, original_index);
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    /// Toggle bulk selection. When [`GridState::all_selected`] holds the
    /// whole set is cleared (stale keys included); otherwise the set is
    /// replaced with exactly the current rows' keys.
    pub fn toggle_select_all<T>(&mut self, rows: &[T], keys: &KeyStrategy<T>) {
        if self.all_selected(rows) {
            self.selected.clear();
        } else {
            self.selected = rows
                .iter()
                .enumerate()
                .map(|(i, row)| keys.key_of(row, i))
                .collect();
        }
    }

    /// Drop every selected key.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Whether the row at `original_index` is currently selected.
    pub fn is_selected<T>(&self, rows: &[T], keys: &KeyStrategy<T>, original_index: usize) -> bool {
        rows.get(original_index)
            .map(|row| self.selected.contains(&keys.key_of(row, original_index)))
            .unwrap_or(false)
    }

    /// True when the collection is non-empty and the selection set is exactly
    /// as large as it. The set is never pruned, so keys held over from a
    /// previous collection still count toward the size.
    pub fn all_selected<T>(&self, rows: &[T]) -> bool {
        !rows.is_empty() && self.selected.len() == rows.len()
    }

    /// True when the selection set is non-empty and strictly smaller than
    /// the current collection, computed from the unpruned set size like
    /// [`GridState::all_selected`].
    pub fn partially_selected<T>(&self, rows: &[T]) -> bool {
        !self.selected.is_empty() && self.selected.len() < rows.len()
    }

    /// Number of *current* rows whose key is selected. Stale keys are not
    /// counted; see [`GridState::selected`] for the raw set.
    pub fn selected_count<T>(&self, rows: &[T], keys: &KeyStrategy<T>) -> usize {
        rows.iter()
            .enumerate()
            .filter(|(i, row)| self.selected.contains(&keys.key_of(row, *i)))
            .count()
    }

    /// The selected rows in display order.
    pub fn selected_rows<'a, T>(
        &self,
        rows: &'a [T],
        columns: &[Column<T>],
        keys: &KeyStrategy<T>,
    ) -> Vec<&'a T> {
        self.sorted_view(rows, columns)
            .into_iter()
            .filter(|(i, row)| self.selected.contains(&keys.key_of(row, *i)))
            .map(|(_, row)| row)
            .collect()
    }

    /// Cursor position within the sorted view, if any.
    pub fn cursor(&self) -> Option<usize> {
        self.table.selected()
    }

    /// Move the cursor one row down, wrapping to the top.
    pub fn cursor_down(&mut self, row_count: usize) {
        if row_count == 0 {
            self.table.select(None);
            return;
        }
        let next = match self.table.selected() {
            Some(i) => (i + 1) % row_count,
            None => 0,
        };
        self.table.select(Some(next));
    }

    /// Move the cursor one row up, wrapping to the bottom.
    pub fn cursor_up(&mut self, row_count: usize) {
        if row_count == 0 {
            self.table.select(None);
            return;
        }
        let prev = match self.table.selected() {
            Some(0) | None => row_count - 1,
            Some(i) => i - 1,
        };
        self.table.select(Some(prev));
    }

    /// Keep the cursor inside the current row range after the collection
    /// shrinks or empties.
    pub fn clamp_cursor(&mut self, row_count: usize) {
        match self.table.selected() {
            Some(_) if row_count == 0 => self.table.select(None),
            Some(i) if i >= row_count => self.table.select(Some(row_count - 1)),
            _ => {}
        }
    }

    /// Resolve a terminal coordinate against the layout recorded by the last
    /// render. Returns `None` before the first render or for points outside
    /// the grid.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<GridHit> {
        self.layout.hit(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellValue;

    struct Item {
        id: i64,
        name: &'static str,
        score: Option<i64>,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, name: "Bob", score: Some(4) },
            Item { id: 2, name: "alice", score: None },
            Item { id: 3, name: "Carol", score: Some(4) },
            Item { id: 4, name: "dave", score: Some(2) },
        ]
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", "ID", |i: &Item| i.id.into()).sortable(),
            Column::new("name", "Name", |i: &Item| i.name.into()).sortable(),
            Column::new("score", "Score", |i: &Item| i.score.into()).sortable(),
            Column::new("note", "Note", |_: &Item| CellValue::Null),
        ]
    }

    fn keys() -> KeyStrategy<Item> {
        KeyStrategy::field(|i: &Item| i.id.into())
    }

    fn names(view: &[(usize, &Item)]) -> Vec<&'static str> {
        view.iter().map(|(_, i)| i.name).collect()
    }

    #[test]
    fn sort_cycle_returns_to_unsorted_after_three_steps() {
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "name");
        assert_eq!(state.sort_direction("name"), Some(SortDirection::Ascending));
        state.sort_cycle(&cols, "name");
        assert_eq!(state.sort_direction("name"), Some(SortDirection::Descending));
        state.sort_cycle(&cols, "name");
        assert_eq!(state.sort, None);
    }

    #[test]
    fn switching_column_restarts_at_ascending() {
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "name");
        state.sort_cycle(&cols, "name");
        state.sort_cycle(&cols, "id");
        assert_eq!(state.sort_direction("id"), Some(SortDirection::Ascending));
        assert_eq!(state.sort_direction("name"), None);
    }

    #[test]
    fn non_sortable_and_unknown_columns_are_ignored() {
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "note");
        assert_eq!(state.sort, None);
        state.sort_cycle(&cols, "missing");
        assert_eq!(state.sort, None);
    }

    #[test]
    fn text_sort_is_case_folded() {
        let rows = items();
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "name");
        let view = state.sorted_view(&rows, &cols);
        assert_eq!(names(&view), vec!["alice", "Bob", "Carol", "dave"]);
    }

    #[test]
    fn null_sorts_first_ascending_last_descending() {
        let rows = items();
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "score");
        let view = state.sorted_view(&rows, &cols);
        assert_eq!(view[0].1.name, "alice");

        state.sort_cycle(&cols, "score");
        let view = state.sorted_view(&rows, &cols);
        assert_eq!(view.last().unwrap().1.name, "alice");
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let rows = items();
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "score");
        let view = state.sorted_view(&rows, &cols);
        // Bob and Carol tie on score and must stay in input order.
        assert_eq!(names(&view), vec!["alice", "dave", "Bob", "Carol"]);
    }

    #[test]
    fn re_deriving_the_view_is_idempotent() {
        let rows = items();
        let cols = columns();
        let mut state = GridState::new();

        state.sort_cycle(&cols, "score");
        let first = state.sorted_view(&rows, &cols);
        let second = state.sorted_view(&rows, &cols);
        assert_eq!(
            first.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            second.iter().map(|(i, _)| *i).collect::<Vec<_>>()
        );
    }

    #[test]
    fn sort_on_vanished_column_keeps_input_order() {
        let rows = items();
        let cols = columns();
        let mut state = GridState::new();
        state.sort = Some(ColumnSort {
            column: "retired".into(),
            direction: SortDirection::Ascending,
        });

        let view = state.sorted_view(&rows, &cols);
        assert_eq!(names(&view), vec!["Bob", "alice", "Carol", "dave"]);
    }

    #[test]
    fn toggle_row_round_trips() {
        let rows = items();
        let keys = keys();
        let mut state = GridState::new();

        assert!(state.toggle_row(&rows, &keys, 1));
        assert!(state.is_selected(&rows, &keys, 1));
        assert!(!state.toggle_row(&rows, &keys, 1));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn toggle_row_ignores_out_of_range_index() {
        let rows = items();
        let keys = keys();
        let mut state = GridState::new();

        assert!(!state.toggle_row(&rows, &keys, 99));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn select_all_round_trips() {
        let rows = items();
        let keys = keys();
        let mut state = GridState::new();

        state.toggle_select_all(&rows, &keys);
        assert!(state.all_selected(&rows));
        assert!(!state.partially_selected(&rows));

        state.toggle_select_all(&rows, &keys);
        assert!(state.selected.is_empty());
        assert!(!state.all_selected(&rows));
        assert!(!state.partially_selected(&rows));
    }

    #[test]
    fn partial_selection_sits_between_none_and_all() {
        let rows = items();
        let keys = keys();
        let mut state = GridState::new();

        assert!(!state.partially_selected(&rows));
        state.toggle_row(&rows, &keys, 0);
        assert!(state.partially_selected(&rows));
        assert!(!state.all_selected(&rows));
    }

    #[test]
    fn shrinking_the_collection_leaves_stale_keys_in_place() {
        let rows = items();
        let keys = keys();
        let mut state = GridState::new();

        state.toggle_select_all(&rows, &keys);
        assert_eq!(state.selected.len(), 4);

        // Caller filters down to two of the four rows. The set is untouched
        // and the predicates compare its full size against the new count.
        let fewer: Vec<Item> = items().into_iter().take(2).collect();
        assert_eq!(state.selected.len(), 4);
        assert_eq!(state.selected_count(&fewer, &keys), 2);
        assert!(!state.all_selected(&fewer));
        assert!(!state.partially_selected(&fewer));
    }

    #[test]
    fn stale_selection_recomputes_against_new_collection_size() {
        let keys = keys();
        let mut state = GridState::new();

        let five: Vec<Item> = (1..=5)
            .map(|id| Item { id, name: "row", score: None })
            .collect();
        state.toggle_row(&five, &keys, 1);
        state.toggle_row(&five, &keys, 3);

        // The replacement collection shares no keys with the selection.
        let three: Vec<Item> = (10..=12)
            .map(|id| Item { id, name: "row", score: None })
            .collect();
        assert_eq!(state.selected.len(), 2);
        assert_eq!(state.selected_count(&three, &keys), 0);
        assert!(!state.all_selected(&three));
        assert!(state.partially_selected(&three));
    }

    #[test]
    fn select_all_on_shrunken_collection_rebuilds_then_clears() {
        let rows = items();
        let keys = keys();
        let mut state = GridState::new();

        state.toggle_select_all(&rows, &keys);
        let fewer: Vec<Item> = items().into_iter().take(2).collect();

        // Four held keys against two rows does not count as all-selected,
        // so the first toggle rebuilds the set from the current rows.
        state.toggle_select_all(&fewer, &keys);
        assert_eq!(state.selected.len(), 2);
        assert!(state.all_selected(&fewer));

        state.toggle_select_all(&fewer, &keys);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn all_selected_is_false_for_empty_collection() {
        let state = GridState::new();
        let rows: Vec<Item> = Vec::new();
        assert!(!state.all_selected(&rows));
    }

    #[test]
    fn selected_rows_follow_display_order() {
        let rows = items();
        let cols = columns();
        let keys = keys();
        let mut state = GridState::new();

        state.toggle_row(&rows, &keys, 0); // Bob
        state.toggle_row(&rows, &keys, 3); // dave

        state.sort_cycle(&cols, "name");
        state.sort_cycle(&cols, "name"); // descending
        let picked: Vec<_> = state
            .selected_rows(&rows, &cols, &keys)
            .iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(picked, vec!["dave", "Bob"]);
    }

    #[test]
    fn selection_survives_sorting() {
        let rows = items();
        let cols = columns();
        let keys = keys();
        let mut state = GridState::new();

        state.toggle_row(&rows, &keys, 2);
        state.sort_cycle(&cols, "name");
        let _ = state.sorted_view(&rows, &cols);
        assert!(state.is_selected(&rows, &keys, 2));
        assert_eq!(state.selected_count(&rows, &keys), 1);
    }

    #[test]
    fn phase_prefers_loading_over_empty() {
        assert_eq!(GridPhase::of(true, 0), GridPhase::Loading);
        assert_eq!(GridPhase::of(true, 7), GridPhase::Loading);
        assert_eq!(GridPhase::of(false, 0), GridPhase::Empty);
        assert_eq!(GridPhase::of(false, 7), GridPhase::Populated);
    }

    #[test]
    fn cursor_wraps_both_directions() {
        let mut state = GridState::new();
        state.cursor_down(3);
        assert_eq!(state.cursor(), Some(0));
        state.cursor_up(3);
        assert_eq!(state.cursor(), Some(2));
        state.cursor_down(3);
        assert_eq!(state.cursor(), Some(0));
    }

    #[test]
    fn cursor_clamps_when_rows_shrink() {
        let mut state = GridState::new();
        state.table.select(Some(5));
        state.clamp_cursor(3);
        assert_eq!(state.cursor(), Some(2));
        state.clamp_cursor(0);
        assert_eq!(state.cursor(), None);
    }
}
