use std::borrow::Cow;
use std::fmt;

use rsel_lang::ValueKind;
use rsel_lang::render::format_float;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One typed value of a row, or the absence of one.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Str(String),
    Missing,
}

static MISSING: Cell = Cell::Missing;

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Kind of the stored value; `None` for [`Cell::Missing`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Cell::Int(_) => Some(ValueKind::Int),
            Cell::Float(_) => Some(ValueKind::Float),
            Cell::Str(_) => Some(ValueKind::String),
            Cell::Missing => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Textual rendering used by lexical comparison, `IN` and `LIKE`.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Int(v) => Some(Cow::Owned(v.to_string())),
            Cell::Float(v) => Some(Cow::Owned(format_float(*v))),
            Cell::Str(s) => Some(Cow::Borrowed(s)),
            Cell::Missing => None,
        }
    }

    /// Whether this cell may be stored in a column of `kind`.
    /// Missing fits every column; integers also fit float columns.
    pub fn fits(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (Cell::Missing, _)
                | (Cell::Int(_), ValueKind::Int | ValueKind::Float)
                | (Cell::Float(_), ValueKind::Float)
                | (Cell::Str(_), ValueKind::String)
        )
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(t) => f.write_str(&t),
            None => f.write_str("?"),
        }
    }
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// A keyed, fixed-width row. Cells are addressed by column position.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: String,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(key: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            key: key.into(),
            cells,
        }
    }

    /// Cell at `index`; out-of-range positions read as Missing.
    pub fn cell(&self, index: usize) -> &Cell {
        self.cells.get(index).unwrap_or(&MISSING)
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}
