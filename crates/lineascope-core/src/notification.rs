//! Notification codes and user-facing messages
//!
//! IMPORTANT: Notification codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetId;

/// Notification code registry (v1)
///
/// These codes are STABLE and VERSIONED.
/// Do NOT rename or remove codes - only add new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationCode {
    // Fetch failures (1xxx)
    /// A request to a lineage backend failed
    FetchFailed,

    /// The backend answered with a non-success HTTP status
    BackendStatus,

    /// The response body could not be decoded
    MalformedResponse,

    // Data conditions (2xxx)
    /// The backend returned no lineage data
    EmptyLineage,

    /// A referenced transformation rule was not found
    RuleNotFound,

    // Configuration (3xxx)
    /// The named backend has no configuration entry
    BackendUnconfigured,

    // General (9xxx)
    /// General informational message
    Info,
}

impl NotificationCode {
    /// Get the notification code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchFailed => "FETCH_FAILED",
            Self::BackendStatus => "BACKEND_STATUS",
            Self::MalformedResponse => "MALFORMED_RESPONSE",
            Self::EmptyLineage => "EMPTY_LINEAGE",
            Self::RuleNotFound => "RULE_NOT_FOUND",
            Self::BackendUnconfigured => "BACKEND_UNCONFIGURED",
            Self::Info => "INFO",
        }
    }
}

impl std::fmt::Display for NotificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Transient condition - the view stays usable
    Warn,

    /// The requested operation could not complete
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A user-facing notification with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable notification code
    pub code: NotificationCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Backend the notification originated from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    /// Dataset the notification concerns, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetId>,
}

impl Notification {
    /// Create a new notification with minimal fields
    pub fn new(code: NotificationCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            backend: None,
            dataset: None,
        }
    }

    /// Set the originating backend
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Set the concerned dataset
    pub fn with_dataset(mut self, dataset: impl Into<DatasetId>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }
}
