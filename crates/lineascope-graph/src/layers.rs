//! Reporting-layer grouping

use std::collections::HashMap;

use lineascope_core::{DatasetId, LineageLayer};

/// Ordered layer listing with a dataset -> layer lookup
///
/// Layer order follows the service response.
#[derive(Debug, Clone, Default)]
pub struct LayerGrouping {
    layers: Vec<LineageLayer>,
    index: HashMap<DatasetId, usize>,
}

impl LayerGrouping {
    /// Build a grouping from the service's layer listing
    ///
    /// A dataset listed in more than one layer keeps its first assignment.
    pub fn from_layers(layers: Vec<LineageLayer>) -> Self {
        let mut index = HashMap::new();
        for (i, layer) in layers.iter().enumerate() {
            for dataset in &layer.datasets {
                index.entry(dataset.clone()).or_insert(i);
            }
        }

        Self { layers, index }
    }

    /// Layers in service order
    pub fn layers(&self) -> &[LineageLayer] {
        &self.layers
    }

    /// The layer a dataset is assigned to, if any
    pub fn layer_of(&self, dataset: &str) -> Option<&str> {
        self.index
            .get(dataset)
            .map(|&i| self.layers[i].layer.as_str())
    }

    /// Total datasets across all layers (first assignments only)
    pub fn dataset_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<LineageLayer> {
        vec![
            LineageLayer {
                layer: "staging".to_string(),
                datasets: vec!["raw.trades".to_string(), "raw.positions".to_string()],
            },
            LineageLayer {
                layer: "reporting".to_string(),
                datasets: vec!["rpt.exposure".to_string()],
            },
        ]
    }

    #[test]
    fn lookup_and_order() {
        let grouping = LayerGrouping::from_layers(listing());

        assert_eq!(grouping.layers().len(), 2);
        assert_eq!(grouping.layers()[0].layer, "staging");
        assert_eq!(grouping.layer_of("rpt.exposure"), Some("reporting"));
        assert_eq!(grouping.layer_of("unknown"), None);
        assert_eq!(grouping.dataset_count(), 3);
    }

    #[test]
    fn duplicate_dataset_keeps_first_layer() {
        let mut layers = listing();
        layers[1].datasets.push("raw.trades".to_string());

        let grouping = LayerGrouping::from_layers(layers);
        assert_eq!(grouping.layer_of("raw.trades"), Some("staging"));
    }

    #[test]
    fn empty_listing() {
        let grouping = LayerGrouping::from_layers(vec![]);
        assert!(grouping.is_empty());
        assert_eq!(grouping.dataset_count(), 0);
    }
}
