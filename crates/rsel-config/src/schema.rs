use rsel_lang::{ColumnSpec, Schema, ValueKind};
use serde::Deserialize;

/// `[schema]` section: the input columns in row order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

/// One `[[schema.columns]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    /// `int`, `float` or `string`.
    pub kind: String,
}

impl SchemaConfig {
    /// Build the schema rules are bound against.
    pub fn resolve(&self) -> anyhow::Result<Schema> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for (i, col) in self.columns.iter().enumerate() {
            let kind: ValueKind = col
                .kind
                .parse()
                .map_err(|e| anyhow::anyhow!("schema.columns[{i}] ({:?}): {e}", col.name))?;
            columns.push(ColumnSpec::new(col.name.clone(), kind));
        }
        Ok(Schema::new(columns))
    }
}
