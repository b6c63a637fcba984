//! Column descriptors, cell values and row identity.
//!
//! A [`Column`] tells the grid how to read one field out of a caller-owned
//! record: an accessor producing a [`CellValue`], plus display hints. Row
//! identity for selection tracking comes from a [`KeyStrategy`] producing
//! [`RowKey`]s.

use std::cmp::Ordering;
use std::fmt;

use ratatui::layout::{Alignment, Constraint};
use ratatui::text::Text;
use ratatui::widgets::Cell;

/// A single field value extracted from a row.
///
/// `Null` models an absent/unset field; it displays as an empty string and
/// sorts before every defined value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value, if it has one.
    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<u64> for CellValue {
    fn from(i: u64) -> Self {
        CellValue::Int(i as i64)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Compare two cell values in ascending order.
///
/// Equal values short-circuit first (`Null` equals `Null`); a lone `Null`
/// sorts before any defined value; two text values compare case-folded with
/// a byte-order tiebreak; everything else compares numerically where both
/// sides have a numeric view, falling back to display-string comparison for
/// mixed pairs. Never panics on odd input.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match (a, b) {
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,
        (CellValue::Text(x), CellValue::Text(y)) => compare_text(x, y),
        (x, y) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx.partial_cmp(&fy).unwrap_or(Ordering::Equal),
            _ => compare_text(&x.to_string(), &y.to_string()),
        },
    }
}

/// Case-folded comparison with a byte-order tiebreak so the result stays a
/// total order ("alice" sorts before "Bob").
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

type Accessor<T> = Box<dyn Fn(&T) -> CellValue + Send + Sync>;
type CellRenderer<T> = Box<dyn Fn(&CellValue, &T, usize) -> Cell<'static> + Send + Sync>;

/// Descriptor for one grid column.
///
/// Built fluently:
///
/// ```
/// use gridfield::grid::Column;
/// use ratatui::layout::Constraint;
///
/// struct User { name: String }
///
/// let col = Column::new("name", "Name", |u: &User| u.name.as_str().into())
///     .sortable()
///     .width(Constraint::Fill(2));
/// assert_eq!(col.id, "name");
/// assert!(col.sortable);
/// ```
pub struct Column<T> {
    /// Unique identifier, referenced by sort operations.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Whether header clicks cycle a sort on this column.
    pub sortable: bool,
    /// Width hint passed through to the ratatui table.
    pub width: Constraint,
    /// Cell text alignment.
    pub align: Alignment,
    accessor: Accessor<T>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a column with the given identifier, header title and accessor.
    ///
    /// Columns default to non-sortable, left-aligned, `Constraint::Fill(1)`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sortable: false,
            width: Constraint::Fill(1),
            align: Alignment::Left,
            accessor: Box::new(accessor),
            render: None,
        }
    }

    /// Mark the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    /// Set the cell alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Install a custom cell renderer.
    ///
    /// The renderer receives the extracted value, the full record and the
    /// row's index within the *sorted* view, and fully replaces the default
    /// formatting for this column.
    pub fn render_with(
        mut self,
        render: impl Fn(&CellValue, &T, usize) -> Cell<'static> + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Extract this column's value from a record.
    pub fn value_of(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Render one cell, consulting the custom renderer if installed.
    pub(crate) fn cell_for(&self, row: &T, sorted_index: usize) -> Cell<'static> {
        let value = self.value_of(row);
        match &self.render {
            Some(render) => render(&value, row, sorted_index),
            None => Cell::from(Text::from(value.to_string()).alignment(self.align)),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Hashable row identity used by the selection set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Int(i64),
    Text(String),
    /// Positional identity; the index refers to the row's position in the
    /// caller's original (pre-sort) collection.
    Index(usize),
}

impl RowKey {
    /// Derive a key from a field value, falling back to the row's original
    /// index when the field is absent.
    fn from_value(value: CellValue, fallback_index: usize) -> Self {
        match value {
            CellValue::Null => RowKey::Index(fallback_index),
            CellValue::Int(i) => RowKey::Int(i),
            CellValue::Bool(b) => RowKey::Int(b as i64),
            CellValue::Text(s) => RowKey::Text(s),
            CellValue::Float(x) => RowKey::Text(x.to_string()),
        }
    }
}

/// How the grid derives a [`RowKey`] for each record.
///
/// `Index` is a degraded fallback: identity is tied to the record's position
/// in the caller's collection, which goes stale if the caller filters or
/// reorders that collection between renders. Supply `Field` or `With` when
/// rows carry a stable unique value.
pub enum KeyStrategy<T> {
    /// Positional identity (default).
    Index,
    /// Key from a field value; `Null` falls back to positional identity.
    Field(Box<dyn Fn(&T) -> CellValue + Send + Sync>),
    /// Fully custom key derivation from the record and its original index.
    With(Box<dyn Fn(&T, usize) -> RowKey + Send + Sync>),
}

impl<T> KeyStrategy<T> {
    /// Key a record by a field accessor.
    pub fn field(accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        KeyStrategy::Field(Box::new(accessor))
    }

    /// Key a record with a custom function.
    pub fn with(f: impl Fn(&T, usize) -> RowKey + Send + Sync + 'static) -> Self {
        KeyStrategy::With(Box::new(f))
    }

    /// Compute the key for a record at its original (pre-sort) index.
    pub fn key_of(&self, row: &T, original_index: usize) -> RowKey {
        match self {
            KeyStrategy::Index => RowKey::Index(original_index),
            KeyStrategy::Field(accessor) => RowKey::from_value(accessor(row), original_index),
            KeyStrategy::With(f) => f(row, original_index),
        }
    }
}

impl<T> Default for KeyStrategy<T> {
    fn default() -> Self {
        KeyStrategy::Index
    }
}

impl<T> fmt::Debug for KeyStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::Index => f.write_str("KeyStrategy::Index"),
            KeyStrategy::Field(_) => f.write_str("KeyStrategy::Field(..)"),
            KeyStrategy::With(_) => f.write_str("KeyStrategy::With(..)"),
        }
    }
}
