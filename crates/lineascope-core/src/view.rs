//! Presentation types for an assembled lineage view
//!
//! Positions and styles are derived per render pass and carry no meaning
//! beyond it.

use serde::{Deserialize, Serialize};

use crate::dataset::{Connection, DatasetId, DatasetRole, RuleId};

/// Top-left position of a node in layout space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A dataset node annotated with its role and layout position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutNode {
    /// Dataset id
    pub id: DatasetId,

    /// Derived role
    pub role: DatasetRole,

    /// Display label (defaults to the id)
    pub label: String,

    /// Nominal box width used by the layout
    pub width: f64,

    /// Nominal box height used by the layout
    pub height: f64,

    /// Computed position, absent until a layout pass ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl LaidOutNode {
    /// Create a node with the id as its label and no position yet
    pub fn new(id: impl Into<DatasetId>, role: DatasetRole, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            role,
            width,
            height,
            position: None,
        }
    }

    /// Set a display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Stroke style of a rendered edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// Stroke color (CSS hex)
    pub color: String,

    /// Stroke width
    pub stroke_width: f64,

    /// Whether this edge carries the selected transformation rule
    pub selected: bool,
}

impl EdgeStyle {
    /// Default (unselected) style
    pub fn normal(color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            selected: false,
        }
    }

    /// Highlight style for the selected rule
    pub fn highlighted(color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            selected: true,
        }
    }
}

/// A connection annotated with its derived presentation style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledConnection {
    /// The underlying connection record, unchanged
    #[serde(flatten)]
    pub connection: Connection,

    /// Derived stroke style
    pub style: EdgeStyle,
}

impl StyledConnection {
    /// The transformation rule this edge carries
    pub fn rule_id(&self) -> &RuleId {
        &self.connection.rule_id
    }
}
