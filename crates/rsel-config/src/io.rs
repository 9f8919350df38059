use std::path::{Path, PathBuf};

use serde::Deserialize;

/// `[io]` section: JSON Lines row files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    /// Absent means standard output.
    pub output: Option<PathBuf>,
}

impl IoConfig {
    pub fn input_in(&self, base_dir: &Path) -> Option<PathBuf> {
        self.input.as_deref().map(|p| resolve(base_dir, p))
    }

    pub fn output_in(&self, base_dir: &Path) -> Option<PathBuf> {
        self.output.as_deref().map(|p| resolve(base_dir, p))
    }
}

pub(crate) fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}
