//! Pipeline configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid config:
//!
//! ```toml
//! max_cells = 16777216
//! validate_dimensions = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Limits and checks applied by [`cubical_homology_with`](crate::cubical_homology_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomologyConfig {
    /// Upper bound on the number of cells in the ambient complex.
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
    /// Reject cube sets whose cubes differ in length before calling the
    /// engine. When off, the engine reports the mismatch instead.
    #[serde(default = "default_true")]
    pub validate_dimensions: bool,
}

impl Default for HomologyConfig {
    fn default() -> Self {
        Self {
            max_cells: default_max_cells(),
            validate_dimensions: default_true(),
        }
    }
}

impl HomologyConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML or a field has the
    /// wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse homology config")
    }
}

const fn default_max_cells() -> usize {
    1 << 24
}

const fn default_true() -> bool {
    true
}
