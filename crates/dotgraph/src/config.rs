//! Configuration for DOT imports.
//!
//! [`ImportConfig`] implements [`serde::Deserialize`] so it can be loaded
//! from the same configuration file as the rest of an application.
//!
//! # Example
//!
//! ```
//! # use dotgraph::config::ImportConfig;
//! let config = ImportConfig::default();
//! assert_eq!(config.edge_label_attribute(), "label");
//! assert_eq!(config.graph_id_attribute(), "ID");
//! ```

use serde::Deserialize;

/// Attribute keys the importer gives special meaning to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Edge attribute whose value is passed to the edge provider as the label.
    edge_label_attribute: String,

    /// Graph attribute under which the header ID is reported to the
    /// component updater.
    graph_id_attribute: String,
}

impl ImportConfig {
    /// Creates a new [`ImportConfig`] with the given attribute keys.
    ///
    /// # Arguments
    ///
    /// * `edge_label_attribute` - Edge attribute used as the edge label.
    /// * `graph_id_attribute` - Graph attribute key for the header ID.
    pub fn new(
        edge_label_attribute: impl Into<String>,
        graph_id_attribute: impl Into<String>,
    ) -> Self {
        Self {
            edge_label_attribute: edge_label_attribute.into(),
            graph_id_attribute: graph_id_attribute.into(),
        }
    }

    /// Returns the edge attribute used as the edge label.
    pub fn edge_label_attribute(&self) -> &str {
        &self.edge_label_attribute
    }

    /// Returns the graph attribute key for the header ID.
    pub fn graph_id_attribute(&self) -> &str {
        &self.graph_id_attribute
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new("label", "ID")
    }
}
