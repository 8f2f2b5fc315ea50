//! Ports and Adapters Infrastructure
//!
//! Shared error and health types for the port traits the domain depends on.
//! The ledger store port lives in [`crate::ledger`]; adapters implementing it
//! live in `infra_ledger`.
//!
//! ```text
//!        insurance_contract
//!                │
//!                ▼
//!   LedgerStore port (core_kernel)
//!          ▲             ▲
//!          │             │
//!   InMemoryLedger   PgLedgerStore
//!     Store            (PostgreSQL)
//! ```

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
///
/// Every adapter reports failures through this type so callers handle
/// in-memory and database-backed stores the same way. Absence of a key is
/// not an error; lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum PortError {
    /// A conditional write found a different version than expected
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// A request to the port was malformed
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A query could not be executed or its results could not be read
    #[error("Query failed: {message}")]
    Query {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Conflict error for a key whose version moved
    pub fn version_conflict(key: impl fmt::Display, expected: u64, actual: Option<u64>) -> Self {
        let actual = match actual {
            Some(version) => version.to_string(),
            None => "absent".to_string(),
        };
        PortError::Conflict {
            message: format!("key '{}' expected version {}, found {}", key, expected, actual),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Query error
    pub fn query(message: impl Into<String>) -> Self {
        PortError::Query {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    /// Returns true if a conditional write lost a race
    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits should extend this marker to ensure they are
/// thread-safe and can be used in async contexts.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Creates a healthy result with no message
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Creates an unhealthy result carrying the failure reason
    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }

    /// Returns true unless the adapter reported itself unhealthy
    pub fn is_operational(&self) -> bool {
        self.status != AdapterHealth::Unhealthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_conflict_message() {
        let error = PortError::version_conflict("C1", 2, Some(3));
        assert!(error.is_conflict());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("C1"));
        assert!(error.to_string().contains("expected version 2, found 3"));

        let missing = PortError::version_conflict("C9", 1, None);
        assert!(missing.to_string().contains("found absent"));
    }

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::connection("refused").is_transient());
        assert!(!PortError::query("bad cursor").is_transient());
        assert!(!PortError::validation("not utf-8").is_transient());
    }

    #[test]
    fn test_health_result_constructors() {
        let ok = HealthCheckResult::healthy("memory", 0);
        assert!(ok.is_operational());
        assert!(ok.message.is_none());

        let down = HealthCheckResult::unhealthy("postgres", 12, "connection refused");
        assert!(!down.is_operational());
        assert_eq!(down.message.as_deref(), Some("connection refused"));
    }
}
