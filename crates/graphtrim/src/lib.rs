//! graphtrim - Reachability trimming and deterministic styling for Graphviz
//! DOT dependency graphs.
//!
//! Reads a DOT component graph (for example a dependency-injection graph),
//! optionally trims it to the subgraph reachable from nodes whose label
//! contains a filter substring, applies deterministic styling to nodes and
//! edges, and serializes it back to DOT.

pub mod config;

mod color;
mod error;
mod graph;
mod style;
mod trim;

pub use error::GraphtrimError;
pub use graph::{DepGraph, GraphEdge, GraphNode};
pub use trim::TrimReport;

use std::fs;
use std::path::Path;

use log::{debug, info};

use config::AppConfig;

/// Pipeline for loading, trimming, styling, and saving DOT graphs.
///
/// The graph value is passed by exclusive reference through each stage;
/// trimming only removes nodes and edges, styling only mutates attributes.
///
/// # Examples
///
/// ```rust,no_run
/// use graphtrim::{GraphPipeline, config::AppConfig};
///
/// let pipeline = GraphPipeline::new(AppConfig::default());
///
/// let mut graph = pipeline.load("deps.dot")
///     .expect("Failed to load");
///
/// let report = pipeline.trim(&mut graph, "com.android.systemui.car")
///     .expect("Filter matched nothing");
/// println!("removed {} nodes", report.removed_nodes());
///
/// pipeline.style(&mut graph);
/// pipeline.save(&graph, "out.dot").expect("Failed to save");
/// ```
#[derive(Default)]
pub struct GraphPipeline {
    config: AppConfig,
}

impl GraphPipeline {
    /// Create a new pipeline with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the pipeline configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read and parse a DOT file into a [`DepGraph`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphtrimError::Load`] with the offending path when the file
    /// is unreadable or not valid DOT.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DepGraph, GraphtrimError> {
        let path = path.as_ref();

        let source = fs::read_to_string(path).map_err(|err| GraphtrimError::Load {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let graph =
            DepGraph::from_dot_source(&source).map_err(|reason| GraphtrimError::Load {
                path: path.to_path_buf(),
                reason,
            })?;

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count();
            "Parsed dot file"
        );

        Ok(graph)
    }

    /// Trim `graph` to what is reachable from nodes whose label contains
    /// `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphtrimError::NoMatch`] when no node label contains
    /// `filter`; the graph is left unmodified.
    pub fn trim(&self, graph: &mut DepGraph, filter: &str) -> Result<TrimReport, GraphtrimError> {
        info!(filter; "Trimming graph to reachable subgraph");
        trim::trim_reachable(graph, filter, self.config.trim())
    }

    /// Apply the configured node and edge styling to `graph`.
    pub fn style(&self, graph: &mut DepGraph) {
        info!("Applying styles");
        style::apply(self.config.style(), graph);
    }

    /// Serialize `graph` to DOT text.
    pub fn to_dot(&self, graph: &DepGraph) -> String {
        graph.to_dot_string()
    }

    /// Serialize `graph` and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphtrimError::Io`] when the file cannot be written.
    pub fn save(&self, graph: &DepGraph, path: impl AsRef<Path>) -> Result<(), GraphtrimError> {
        fs::write(path.as_ref(), self.to_dot(graph))?;
        Ok(())
    }
}
