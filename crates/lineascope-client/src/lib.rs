//! Lineage backend clients
//!
//! This crate fetches lineage data from REST backend services. Clients
//! are explicitly constructed values passed to callers - there are no
//! module-level singletons, and the target backend is always named
//! rather than inferred from ambient state.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lineascope_client::{LineageBackend, RestLineageClient};
//! use lineascope_core::FlowDirection;
//!
//! let client = RestLineageClient::new("reporting", "https://reporting.internal");
//! let connections = client.fetch_path(FlowDirection::Forward, "raw.trades").await?;
//! ```

pub mod backend;
pub mod mock;
pub mod rest;

pub use backend::{FetchError, LineageBackend};
pub use mock::MockLineageBackend;
pub use rest::RestLineageClient;
