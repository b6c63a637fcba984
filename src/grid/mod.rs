//! Sortable, selectable data grid.
//!
//! The grid splits into three pieces: [`column`] describes how to read and
//! display caller-owned records, [`state`] holds the sort, selection and
//! cursor that persist across frames, and [`widget`] renders one frame from
//! the two.

pub mod column;
pub mod state;
pub mod widget;

pub use column::{compare_values, CellValue, Column, KeyStrategy, RowKey};
pub use state::{ColumnSort, GridPhase, GridState, SortDirection};
pub use widget::{DataGrid, GridHit};
