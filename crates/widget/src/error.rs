//! Unified error handling for the conversion engine.
//!
//! Every component has its own error enum; `WidgetError` aggregates them at
//! the engine boundary. Per the workflow's error policy, component failures
//! are caught, logged, and converted into safe defaults - nothing here is
//! allowed to propagate far enough to crash a hosting page.

use thiserror::Error;

use crate::config::ConfigError;
use crate::gateway::GatewayError;
use crate::geo::GeoError;
use crate::storage::StoreError;

/// Engine-level error type.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Country resolution failed.
    #[error("geolocation error: {0}")]
    Geo(#[from] GeoError),

    /// Exchange-rate gateway call failed in a way that must abort the run
    /// (a missing auth token; recoverable gateway failures degrade to the
    /// neutral rate inside the engine instead).
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_error_display() {
        let err = WidgetError::Gateway(GatewayError::MissingToken);
        assert_eq!(
            err.to_string(),
            "gateway error: authentication token is missing"
        );
    }
}
