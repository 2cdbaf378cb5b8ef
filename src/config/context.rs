//! Derivation context: configuration plus diagnostic sink

use std::fmt;
use std::sync::Arc;

use super::CorrelationConfig;
use crate::observability::{DiagnosticSink, LoggerSink};
use crate::vector::{CorrelationVector, SpinParameters};

/// Everything a derivation operator consults besides its input.
///
/// Cheap to clone; clones share the sink.
#[derive(Clone)]
pub struct CorrelationContext {
    config: CorrelationConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl CorrelationContext {
    /// Context reporting to the structured logger.
    pub fn new(config: CorrelationConfig) -> Self {
        Self::with_sink(config, Arc::new(LoggerSink))
    }

    /// Context reporting to a caller-supplied sink.
    pub fn with_sink(config: CorrelationConfig, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    pub fn validate_on_creation(&self) -> bool {
        self.config.validate_on_creation
    }

    /// Copy of this context with validation switched on or off.
    pub fn with_validation(&self, enabled: bool) -> Self {
        Self {
            config: CorrelationConfig {
                validate_on_creation: enabled,
                ..self.config
            },
            sink: Arc::clone(&self.sink),
        }
    }

    /// Fresh root vector of the configured default version.
    pub fn create_root(&self) -> CorrelationVector {
        CorrelationVector::with_version(self.config.default_version)
    }

    /// See [`CorrelationVector::extend`].
    pub fn extend(&self, serialized: &str) -> CorrelationVector {
        CorrelationVector::extend(serialized, self)
    }

    /// Spin with the configured parameters. See [`CorrelationVector::spin`].
    pub fn spin(&self, serialized: &str) -> CorrelationVector {
        CorrelationVector::spin(serialized, self)
    }

    /// See [`CorrelationVector::spin_with`].
    pub fn spin_with(&self, serialized: &str, parameters: &SpinParameters) -> CorrelationVector {
        CorrelationVector::spin_with(serialized, parameters, self)
    }

    /// See [`CorrelationVector::parse`]. With validation on, a fallback to a
    /// fresh root is reported to this context's sink.
    pub fn parse(&self, serialized: &str) -> CorrelationVector {
        CorrelationVector::parse_reported(serialized, self)
    }
}

impl Default for CorrelationContext {
    fn default() -> Self {
        Self::new(CorrelationConfig::default())
    }
}

impl fmt::Debug for CorrelationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorrelationContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
