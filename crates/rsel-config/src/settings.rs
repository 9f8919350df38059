use toml::{Table, Value};

/// Key under which the rule list is persisted.
pub const RULES_KEY: &str = "rules";

/// The persisted rule list: rule texts in evaluation order.
///
/// Rules are kept as text and compiled by whoever uses them, so a schema
/// change never leaves stale compiled rules behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSettings {
    rules: Vec<String>,
}

impl RuleSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, text: impl Into<String>) {
        self.rules.push(text.into());
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<String> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Strict load for execution: the `rules` key must be present.
    pub fn load(table: &Table) -> anyhow::Result<Self> {
        match table.get(RULES_KEY) {
            Some(value) => Self::from_value(value),
            None => anyhow::bail!("settings: missing required key {RULES_KEY:?}"),
        }
    }

    /// Lenient load for editing: an absent `rules` key reads as no rules.
    pub fn load_for_editing(table: &Table) -> anyhow::Result<Self> {
        match table.get(RULES_KEY) {
            Some(value) => Self::from_value(value),
            None => Ok(Self::default()),
        }
    }

    /// Write the rule list into `table`, replacing any previous list.
    pub fn save(&self, table: &mut Table) {
        let list = self.rules.iter().cloned().map(Value::String).collect();
        table.insert(RULES_KEY.to_string(), Value::Array(list));
    }

    /// Render as a standalone TOML document holding only the rule list.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        let mut table = Table::new();
        self.save(&mut table);
        Ok(toml::to_string(&table)?)
    }

    fn from_value(value: &Value) -> anyhow::Result<Self> {
        let Value::Array(items) = value else {
            anyhow::bail!(
                "settings.{RULES_KEY} must be an array of strings, got {}",
                value.type_str()
            );
        };
        let rules = items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(anyhow::anyhow!(
                    "settings.{RULES_KEY}[{i}] must be a string, got {}",
                    other.type_str()
                )),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { rules })
    }
}
