//! LineaScope Core
//!
//! Core domain model with stable, versioned types.
//! Never rename notification codes - they are part of the public API.

pub mod config;
pub mod dataset;
pub mod notification;
pub mod report;
pub mod view;

pub use config::{BackendConfig, Config, ConfigError, HighlightConfig, LayoutConfig};
pub use dataset::{
    Connection, DatasetId, DatasetRole, FlowDirection, LineageLayer, RuleId, TransformationRule,
};
pub use notification::{Notification, NotificationCode, Severity};
pub use report::{LineageReport, ReportSummary, ReportVersion};
pub use view::{EdgeStyle, LaidOutNode, Position, StyledConnection};
