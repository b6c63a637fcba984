//! Row source abstraction for feeding the grid.
//!
//! The grid itself never loads anything; something upstream produces row
//! collections and the application polls for them between frames. This
//! module provides the trait plus file-polling and channel-backed
//! implementations.

mod channel;
mod file;

pub use channel::{ChannelSource, RowSender};
pub use file::FileSource;

use std::fmt::Debug;

/// Trait for receiving row collections from various backends.
///
/// Implementations deliver whole replacement collections; the application
/// swaps its row vector on every delivery and the grid re-derives its view
/// from the new rows.
///
/// # Example
///
/// ```no_run
/// use gridfield::source::{FileSource, RowSource};
///
/// #[derive(Clone, Debug, serde::Deserialize)]
/// struct User { id: i64, name: String }
///
/// let mut source: FileSource<User> = FileSource::new("users.json");
/// if let Some(users) = source.poll() {
///     println!("loaded {} users", users.len());
/// }
/// ```
pub trait RowSource<T>: Send + Debug {
    /// Poll for a fresh collection.
    ///
    /// Returns `Some(rows)` when new data is available, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<Vec<T>>;

    /// Human-readable description of the source, for status display.
    fn description(&self) -> &str;

    /// Error message from the last poll, if it failed.
    fn error(&self) -> Option<&str>;
}
