//! Correlation vector configuration
//!
//! Validation on creation is an explicit value threaded through the
//! derivation operators via [`CorrelationContext`], never process state.
//!
//! Configuration file (JSON), all fields optional:
//!
//! ```json
//! {
//!   "validate_on_creation": true,
//!   "default_version": "v2",
//!   "spin": { "interval": "fine", "periodicity": "medium", "entropy": "two" }
//! }
//! ```

mod context;
mod errors;

pub use context::CorrelationContext;
pub use errors::{ConfigError, ConfigResult};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::vector::{CorrelationVectorVersion, SpinParameters};

/// Behavioural switches for vector creation and derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Validate inbound vectors in `extend` and `spin`, reporting format
    /// errors to the diagnostic sink. Disabled by default.
    pub validate_on_creation: bool,

    /// Version of root vectors created without an explicit version.
    pub default_version: CorrelationVectorVersion,

    /// Parameters used by `spin` when none are given.
    pub spin: SpinParameters,
}

impl CorrelationConfig {
    /// Configuration with validation enabled.
    pub fn validating() -> Self {
        Self {
            validate_on_creation: true,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: CorrelationConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.spin.total_bits() == 0 {
            return Err(ConfigError::Invalid(
                "spin parameters must keep at least one tick or entropy bit".to_string(),
            ));
        }
        Ok(())
    }
}
