//! Layered graph layout
//!
//! The layout engine sits behind a trait so alternate engines can be
//! substituted without touching classification or rendering. The default
//! `LayeredLayout` implements a Sugiyama-style pipeline:
//! 1. Rank assignment (longest-path layering)
//! 2. Ordering within ranks (barycenter crossing minimization)
//! 3. Coordinate assignment

pub mod engine;
pub mod layered;

pub use engine::{LayoutEdge, LayoutEngine, LayoutNode, LayoutOptions};
pub use layered::LayeredLayout;
