//! LineaScope engine - view assembly
//!
//! This crate turns a fetched connection list into a renderable view:
//! - Role classification and node derivation
//! - Layout via an injected engine
//! - Selection-driven edge styling

pub mod explorer;
pub mod selection;

pub use explorer::{ExplorerView, ViewBuilder};
pub use selection::{style_connections, SelectionState};
