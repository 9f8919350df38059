//! Kind-aware ordering of cells and literals.

use std::cmp::Ordering;

use rsel_lang::Comparator;
use rsel_lang::ast::Literal;

use crate::value::Cell;

/// Order two cells with the column comparator.
///
/// Missing sorts before every value and equals another Missing. Cells the
/// comparator cannot read (a string under a numeric comparator) sort with
/// Missing.
pub fn compare_cells(comparator: Comparator, a: &Cell, b: &Cell) -> Ordering {
    match comparator {
        Comparator::Numeric => match (a, b) {
            (Cell::Int(x), Cell::Int(y)) => x.cmp(y),
            _ => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => cmp_f64(x, y),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            },
        },
        Comparator::Lexical => match (a.text(), b.text()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        },
    }
}

/// Order a cell against a literal. `None` when the cell is Missing or the
/// pair is not comparable.
pub fn compare_literal(cell: &Cell, literal: &Literal) -> Option<Ordering> {
    match (cell, literal) {
        (Cell::Missing, _) => None,
        (Cell::Int(v), Literal::Integer(l)) => Some(v.cmp(l)),
        (_, Literal::Integer(l)) => Some(cmp_f64(cell.as_f64()?, *l as f64)),
        (_, Literal::Float(l)) => Some(cmp_f64(cell.as_f64()?, *l)),
        (_, Literal::String(l)) => Some(cell.text()?.as_ref().cmp(l.as_str())),
    }
}

fn cmp_f64(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}
