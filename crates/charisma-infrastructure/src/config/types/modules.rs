//! Module discovery configuration types

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MODULE_ROOTS;

/// Module discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Directory roots, relative to a crate's `src/`, that hold module sources
    pub roots: Vec<String>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            roots: DEFAULT_MODULE_ROOTS
                .iter()
                .map(|r| (*r).to_string())
                .collect(),
        }
    }
}
