use std::path::{Path, PathBuf};
use std::str::FromStr;

use rsel_lang::Schema;
use serde::Deserialize;

use crate::io::{IoConfig, resolve};
use crate::logging::LoggingConfig;
use crate::runtime::RuntimeConfig;
use crate::schema::SchemaConfig;
use crate::settings::RuleSettings;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SelectConfigRaw {
    #[serde(default)]
    schema: SchemaConfig,
    /// Node settings, kept as a table so strict and lenient loads can read
    /// it differently.
    #[serde(default)]
    settings: toml::Table,
    #[serde(default)]
    io: IoConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// SelectConfig (resolved, validated)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SelectConfig {
    pub schema: Schema,
    pub schema_config: SchemaConfig,
    pub settings: toml::Table,
    pub io: IoConfig,
    pub runtime: RuntimeConfig,
    pub logging: LoggingConfig,
    base_dir: PathBuf,
}

impl SelectConfig {
    /// Read and parse a `rule-select.toml` file. Relative paths inside it
    /// are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let mut config: SelectConfig = content
            .parse()
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        if let Some(parent) = path.parent() {
            config.base_dir = parent.to_path_buf();
        }
        Ok(config)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Rule texts for a filter run; fails when no rule list was saved.
    pub fn rules_for_execution(&self) -> anyhow::Result<Vec<String>> {
        Ok(RuleSettings::load(&self.settings)?.into_rules())
    }

    /// Rule texts for inspection and editing; an absent list is empty.
    pub fn rules_for_editing(&self) -> anyhow::Result<Vec<String>> {
        Ok(RuleSettings::load_for_editing(&self.settings)?.into_rules())
    }

    /// Replace the stored rule list.
    pub fn set_rules(&mut self, settings: &RuleSettings) {
        settings.save(&mut self.settings);
    }

    pub fn input_path(&self) -> Option<PathBuf> {
        self.io.input_in(&self.base_dir)
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.io.output_in(&self.base_dir)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_deref()
            .map(|p| resolve(&self.base_dir, p))
    }
}

impl FromStr for SelectConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a resolved, validated [`SelectConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: SelectConfigRaw = toml::from_str(toml_str)?;
        let schema = raw.schema.resolve()?;

        let config = SelectConfig {
            schema,
            schema_config: raw.schema,
            settings: raw.settings,
            io: raw.io,
            runtime: raw.runtime,
            logging: raw.logging,
            base_dir: PathBuf::from("."),
        };

        validate::validate(&config)?;

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
