use std::collections::HashSet;

use crate::select::SelectConfig;

/// Called from `SelectConfig::from_str` / `load`.
pub(crate) fn validate(config: &SelectConfig) -> anyhow::Result<()> {
    // Column names must be addressable as `$name$` and unique.
    let mut seen = HashSet::new();
    for (i, col) in config.schema_config.columns.iter().enumerate() {
        if col.name.is_empty() {
            anyhow::bail!("schema.columns[{i}]: column name must not be empty");
        }
        if let Some(bad) = col.name.chars().find(|c| matches!(c, '$' | '\n' | '\r')) {
            anyhow::bail!(
                "schema.columns[{i}]: column name {:?} contains {bad:?}, which cannot appear inside `$...$`",
                col.name,
            );
        }
        if col.name.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!(
                "schema.columns[{i}]: column name {:?} is all digits and would read as a column position",
                col.name,
            );
        }
        if !seen.insert(col.name.as_str()) {
            anyhow::bail!("schema.columns[{i}]: duplicate column name {:?}", col.name);
        }
    }

    if config.runtime.progress_interval.as_duration().is_zero() {
        anyhow::bail!("runtime.progress_interval must be > 0");
    }

    if config.logging.level.trim().is_empty() {
        anyhow::bail!("logging.level must not be empty");
    }

    if let (Some(input), Some(output)) = (&config.io.input, &config.io.output)
        && input == output
    {
        anyhow::bail!("io.input and io.output must differ, both are {}", input.display());
    }

    Ok(())
}
