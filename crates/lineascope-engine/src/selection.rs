//! Transformation-rule selection and edge styling

use lineascope_core::{Connection, EdgeStyle, HighlightConfig, RuleId, StyledConnection};

/// The currently selected transformation rule, if any
///
/// Selecting an edge stores its rule id; clearing is the only other
/// transition. The selection itself is never persisted - styling is
/// re-derived from it on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<RuleId>,
}

impl SelectionState {
    /// No rule selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the given transformation rule
    pub fn select(&mut self, rule_id: impl Into<RuleId>) {
        self.selected = Some(rule_id.into());
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected rule id, if any
    pub fn selected(&self) -> Option<&RuleId> {
        self.selected.as_ref()
    }

    /// Whether the given rule is the selected one
    pub fn is_selected(&self, rule_id: &str) -> bool {
        self.selected.as_deref() == Some(rule_id)
    }
}

/// Derive a style for every connection
///
/// Connections carrying the selected rule get the highlight color and
/// stroke weight; all others get the default style. The underlying
/// records are not modified.
pub fn style_connections(
    connections: &[Connection],
    selection: &SelectionState,
    highlight: &HighlightConfig,
) -> Vec<StyledConnection> {
    connections
        .iter()
        .map(|conn| {
            let style = if selection.is_selected(&conn.rule_id) {
                EdgeStyle::highlighted(
                    highlight.selected_color.clone(),
                    highlight.selected_stroke_width,
                )
            } else {
                EdgeStyle::normal(
                    highlight.default_color.clone(),
                    highlight.default_stroke_width,
                )
            };

            StyledConnection {
                connection: conn.clone(),
                style,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connections() -> Vec<Connection> {
        vec![
            Connection::new("A", "B", "r1"),
            Connection::new("B", "C", "r2"),
            Connection::new("C", "D", "r3"),
        ]
    }

    #[test]
    fn selection_transitions() {
        let mut selection = SelectionState::new();
        assert_eq!(selection.selected(), None);

        selection.select("r1");
        assert!(selection.is_selected("r1"));
        assert!(!selection.is_selected("r2"));

        selection.select("r2");
        assert!(selection.is_selected("r2"));

        selection.clear();
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn exactly_selected_edges_are_highlighted() {
        let mut selection = SelectionState::new();
        selection.select("r1");

        let styled = style_connections(&connections(), &selection, &HighlightConfig::default());

        let selected: Vec<_> = styled.iter().filter(|e| e.style.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].rule_id(), "r1");

        for edge in styled.iter().filter(|e| !e.style.selected) {
            assert_eq!(edge.style.color, "#b1b1b7");
            assert_eq!(edge.style.stroke_width, 1.0);
        }
    }

    #[test]
    fn no_selection_styles_everything_default() {
        let styled = style_connections(
            &connections(),
            &SelectionState::new(),
            &HighlightConfig::default(),
        );

        assert!(styled.iter().all(|e| !e.style.selected));
    }

    #[test]
    fn styling_leaves_records_unchanged() {
        let input = connections();
        let mut selection = SelectionState::new();
        selection.select("r2");

        let styled = style_connections(&input, &selection, &HighlightConfig::default());

        let restyled: Vec<Connection> = styled.into_iter().map(|e| e.connection).collect();
        assert_eq!(restyled, input);
    }
}
