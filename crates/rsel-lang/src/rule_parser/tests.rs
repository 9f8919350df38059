use crate::schema::{ColumnSpec, Schema, ValueKind};

mod errors;

/// `ID:int, NAME:string, SCORE:float, A:int, CITY:string`
fn schema() -> Schema {
    Schema::new(vec![
        ColumnSpec::new("ID", ValueKind::Int),
        ColumnSpec::new("NAME", ValueKind::String),
        ColumnSpec::new("SCORE", ValueKind::Float),
        ColumnSpec::new("A", ValueKind::Int),
        ColumnSpec::new("CITY", ValueKind::String),
    ])
}
