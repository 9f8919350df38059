use rsel_lang::{ColumnSpec, Schema, ValueKind, parse_rule};

use super::Predicate;
use crate::value::{Cell, Row};

fn schema() -> Schema {
    Schema::new(vec![
        ColumnSpec::new("ID", ValueKind::Int),
        ColumnSpec::new("NAME", ValueKind::String),
        ColumnSpec::new("SCORE", ValueKind::Float),
        ColumnSpec::new("PAT", ValueKind::String),
        ColumnSpec::new("LIMIT", ValueKind::Int),
    ])
}

fn eval(rule: &str, cells: Vec<Cell>) -> bool {
    let s = schema();
    let node = parse_rule(rule, &s).unwrap();
    Predicate::compile(&node, &s).unwrap().evaluate(&Row::new("r", cells))
}

fn row(id: Cell, name: Cell, score: Cell) -> Vec<Cell> {
    vec![id, name, score, Cell::Missing, Cell::Missing]
}

fn s(v: &str) -> Cell {
    Cell::Str(v.to_string())
}

// -----------------------------------------------------------------------
// Missing semantics
// -----------------------------------------------------------------------

#[test]
fn missing_cell_fails_every_literal_comparison() {
    for op in [">", ">=", "<", "<=", "="] {
        let rule = format!("$ID$ {op} 0");
        assert!(!eval(&rule, row(Cell::Missing, s("a"), Cell::Float(1.0))), "{rule}");
        let rule = format!("NOT $ID$ {op} 0");
        assert!(eval(&rule, row(Cell::Missing, s("a"), Cell::Float(1.0))), "{rule}");
    }
    assert!(!eval(r#"$NAME$ = """#, row(Cell::Int(1), Cell::Missing, Cell::Missing)));
}

#[test]
fn missing_test_node() {
    assert!(eval("MISSING $SCORE$", row(Cell::Int(1), s("a"), Cell::Missing)));
    assert!(!eval("MISSING $SCORE$", row(Cell::Int(1), s("a"), Cell::Float(0.0))));
}

#[test]
fn column_pair_orders_missing_first() {
    let cells = vec![Cell::Missing, s("a"), Cell::Float(1.0), Cell::Missing, Cell::Int(3)];
    assert!(eval("$ID$ < $LIMIT$", cells.clone()));
    assert!(!eval("$ID$ >= $LIMIT$", cells.clone()));
    // Two missing cells compare equal.
    let cells = vec![Cell::Missing, s("a"), Cell::Float(1.0), Cell::Missing, Cell::Missing];
    assert!(eval("$ID$ = $LIMIT$", cells.clone()));
    assert!(eval("$ID$ <= $LIMIT$", cells));
}

// -----------------------------------------------------------------------
// Comparisons
// -----------------------------------------------------------------------

#[test]
fn integer_and_float_literals() {
    let r = row(Cell::Int(3), s("a"), Cell::Float(2.5));
    assert!(eval("$ID$ > 2", r.clone()));
    assert!(eval("$ID$ < 3.5", r.clone()));
    assert!(eval("$ID$ = 3.0", r.clone()));
    assert!(eval("$SCORE$ >= 2.5", r.clone()));
    assert!(eval("$SCORE$ < 3", r.clone()));
    assert!(!eval("$SCORE$ = 2", r));
}

#[test]
fn integer_cell_in_float_column() {
    assert!(eval("$SCORE$ = 4", row(Cell::Int(1), s("a"), Cell::Int(4))));
}

#[test]
fn string_literals_compare_lexically() {
    let r = row(Cell::Int(1), s("Banana"), Cell::Missing);
    assert!(eval(r#"$NAME$ > "Apple""#, r.clone()));
    assert!(eval(r#"$NAME$ = "Banana""#, r.clone()));
    assert!(!eval(r#"$NAME$ = "banana""#, r));
}

#[test]
fn column_pair_numeric() {
    let cells = vec![Cell::Int(10), s("a"), Cell::Float(9.5), Cell::Missing, Cell::Int(10)];
    assert!(eval("$ID$ > $SCORE$", cells.clone()));
    assert!(eval("$ID$ = $LIMIT$", cells));
}

// -----------------------------------------------------------------------
// LIKE
// -----------------------------------------------------------------------

#[test]
fn like_fixed_pattern() {
    assert!(eval(r#"$NAME$ LIKE "A*""#, row(Cell::Int(1), s("Apple"), Cell::Missing)));
    assert!(!eval(r#"$NAME$ LIKE "A*""#, row(Cell::Int(2), s("Banana"), Cell::Missing)));
    assert!(!eval(r#"$NAME$ LIKE "*""#, row(Cell::Int(2), Cell::Missing, Cell::Missing)));
}

#[test]
fn like_without_wildcards_is_equality() {
    for name in ["a.c", "abc", "A.C"] {
        let r = row(Cell::Int(1), s(name), Cell::Missing);
        assert_eq!(eval(r#"$NAME$ LIKE "a.c""#, r.clone()), eval(r#"$NAME$ = "a.c""#, r));
    }
    let r = row(Cell::Int(1), Cell::Missing, Cell::Missing);
    assert_eq!(eval(r#"$NAME$ LIKE "a.c""#, r.clone()), eval(r#"$NAME$ = "a.c""#, r));
}

#[test]
fn like_on_numeric_cell_uses_text() {
    assert!(eval(r#"$ID$ LIKE "1?""#, row(Cell::Int(12), s("x"), Cell::Missing)));
    assert!(eval(r#"$SCORE$ LIKE "*.5""#, row(Cell::Int(1), s("x"), Cell::Float(2.5))));
}

#[test]
fn like_with_pattern_from_row() {
    let mut cells = row(Cell::Int(1), s("Apple"), Cell::Missing);
    cells[3] = s("Ap*");
    assert!(eval(r#""Apricot" LIKE $PAT$"#, cells.clone()));
    assert!(eval("$NAME$ LIKE $PAT$", cells.clone()));
    assert!(!eval(r#""Banana" LIKE $PAT$"#, cells));

    let cells = row(Cell::Int(1), s("Apple"), Cell::Missing);
    assert!(!eval(r#""Apple" LIKE $PAT$"#, cells.clone()));
    assert!(!eval("$NAME$ LIKE $PAT$", cells));
}

// -----------------------------------------------------------------------
// IN
// -----------------------------------------------------------------------

#[test]
fn in_set_membership() {
    let rule = r#"$NAME$ IN ["Oslo", "Berlin"]"#;
    assert!(eval(rule, row(Cell::Int(1), s("Berlin"), Cell::Missing)));
    assert!(!eval(rule, row(Cell::Int(1), s("Paris"), Cell::Missing)));
    assert!(!eval(rule, row(Cell::Int(1), Cell::Missing, Cell::Missing)));
}

#[test]
fn in_empty_set_is_false() {
    assert!(!eval("$NAME$ IN []", row(Cell::Int(1), s(""), Cell::Missing)));
    assert!(!eval("$NAME$ IN []", row(Cell::Int(1), Cell::Missing, Cell::Missing)));
}

#[test]
fn in_numeric_column_uses_text() {
    let rule = r#"$ID$ IN ["1", "2"]"#;
    assert!(eval(rule, row(Cell::Int(2), s("x"), Cell::Missing)));
    assert!(!eval(rule, row(Cell::Int(3), s("x"), Cell::Missing)));
}

// -----------------------------------------------------------------------
// Connectives
// -----------------------------------------------------------------------

#[test]
fn xor_truth_table() {
    let r = |id: i64, name: &str| row(Cell::Int(id), s(name), Cell::Missing);
    let rule = r#"$ID$ > 5 XOR $NAME$ = "x""#;
    assert!(!eval(rule, r(10, "x")));
    assert!(eval(rule, r(10, "y")));
    assert!(eval(rule, r(1, "x")));
    assert!(!eval(rule, r(1, "y")));
}

#[test]
fn evaluation_is_idempotent() {
    let sch = schema();
    let node = parse_rule(
        r#"($ID$ > 1 AND $NAME$ LIKE "A*") OR MISSING $SCORE$"#,
        &sch,
    )
    .unwrap();
    let p = Predicate::compile(&node, &sch).unwrap();
    let r = Row::new("r", row(Cell::Int(2), s("Apple"), Cell::Float(1.0)));
    let first = p.evaluate(&r);
    assert!(first);
    for _ in 0..3 {
        assert_eq!(p.evaluate(&r), first);
    }
}

#[test]
fn compile_rejects_out_of_range_column() {
    let node = rsel_lang::ast::Node::Missing(7);
    assert!(matches!(
        Predicate::compile(&node, &schema()),
        Err(crate::rule::CompileError::ColumnOutOfRange { index: 7 })
    ));
}
