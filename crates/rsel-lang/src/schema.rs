use std::fmt;
use std::str::FromStr;

/// Declared value kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    String,
}

impl ValueKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Float)
    }

    /// The comparator used to order two cells of this kind.
    pub fn comparator(self) -> Comparator {
        if self.is_numeric() {
            Comparator::Numeric
        } else {
            Comparator::Lexical
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        })
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(ValueKind::Int),
            "float" | "double" => Ok(ValueKind::Float),
            "string" | "str" => Ok(ValueKind::String),
            other => Err(format!(
                "unknown column kind {other:?} (expected int|float|string)"
            )),
        }
    }
}

/// Type-aware ordering strategy for column-vs-column comparisons.
///
/// Two columns are comparable only when their kinds share a comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Numeric order; integers and floats mix freely.
    Numeric,
    /// Lexical order of the cells' textual rendering.
    Lexical,
}

/// A single column descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ValueKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered column descriptors that rules are bound against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Resolve the text between `$...$` to a column index.
    ///
    /// A token is a column name or, when all digits, a position. A digit
    /// token that names one column and is the position of another is
    /// rejected as [`Unresolved::Ambiguous`].
    pub fn resolve(&self, token: &str) -> Result<usize, Unresolved> {
        let named = self.index_of(token);
        let position = if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            token.parse::<usize>().ok().filter(|&i| i < self.columns.len())
        } else {
            None
        };
        match (named, position) {
            (Some(named), Some(position)) if named != position => {
                Err(Unresolved::Ambiguous { named, position })
            }
            (Some(index), _) | (None, Some(index)) => Ok(index),
            (None, None) => Err(Unresolved::Unknown),
        }
    }
}

/// Why a `$token$` did not resolve to exactly one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    Unknown,
    Ambiguous { named: usize, position: usize },
}
