// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # gridfield
//!
//! Sortable, selectable data grid and text field widgets for ratatui.
//!
//! This crate provides presentational building blocks for terminal data
//! browsers: a generic table widget that sorts and selects rows it does not
//! own, a single-line text field with cursor and scroll handling, and row
//! sources that deliver collections from files or channels. A demo binary
//! wires them into a small user browser.
//!
//! ## Architecture
//!
//! The widgets are stateless by construction: each render borrows the rows,
//! the column definitions and a state struct, draws one frame, and gives
//! everything back. Sorting and selection live in the state, keyed so they
//! survive the collection being filtered or replaced underneath them.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   grid   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │  input   │    │ (page)  │    │         │  │
//! │  └────┬────┘    │(widgets) │    └─────────┘    └─────────┘  │
//! │       │         └──────────┘                                 │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── FileSource | ChannelSource                   │
//! │  │ (rows)  │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`grid`]**: The [`DataGrid`] widget with its column model, sort cycle
//!   and key-based row selection
//! - **[`input`]**: The [`TextField`] widget and its editing state
//! - **[`source`]**: Row delivery abstraction ([`RowSource`] trait) with
//!   implementations for file polling and channel-based input
//! - **[`theme`]**: Dark and light palettes shared by all widgets
//! - **[`app`]**, **[`ui`]**, **[`events`]**: The demo user browser built on
//!   top of the widgets
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Browse the bundled sample users
//! gridfield-demo
//!
//! # Browse rows from a JSON file (watched for changes)
//! gridfield-demo --data users.json
//! ```
//!
//! ### Driving the grid from your own state
//!
//! ```
//! use gridfield::grid::{Column, GridState, KeyStrategy};
//!
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let users = vec![
//!     User { id: 1, name: "Bob".into() },
//!     User { id: 2, name: "alice".into() },
//! ];
//! let columns = vec![
//!     Column::new("id", "ID", |u: &User| u.id.into()).sortable(),
//!     Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable(),
//! ];
//! let keys = KeyStrategy::field(|u: &User| u.id.into());
//!
//! let mut state = GridState::new();
//! state.sort_cycle(&columns, "name");
//!
//! // Case-folded: "alice" sorts before "Bob"
//! let view = state.sorted_view(&users, &columns);
//! assert_eq!(view[0].1.name, "alice");
//!
//! // Selection is keyed by row identity, not position
//! state.toggle_row(&users, &keys, 0);
//! assert_eq!(state.selected_count(&users, &keys), 1);
//! ```
//!
//! ### Feeding rows through a channel
//!
//! ```
//! use gridfield::source::{ChannelSource, RowSource};
//!
//! #[derive(Clone, Debug)]
//! struct User { name: String }
//!
//! let (tx, mut source) = ChannelSource::create("backend");
//!
//! // Nothing delivered yet
//! assert!(source.poll().is_none());
//!
//! tx.send(Some(vec![User { name: "ada".into() }])).unwrap();
//! assert_eq!(source.poll().unwrap().len(), 1);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod grid;
pub mod input;
pub mod logging;
pub mod source;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use grid::{
    CellValue, Column, ColumnSort, DataGrid, GridHit, GridPhase, GridState, KeyStrategy, RowKey,
    SortDirection,
};
pub use input::{InputEvent, TextField, TextFieldState};
pub use source::{ChannelSource, FileSource, RowSender, RowSource};
pub use theme::Theme;
