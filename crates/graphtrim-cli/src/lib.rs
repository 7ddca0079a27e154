//! CLI logic for the graphtrim DOT graph tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use graphtrim::{GraphPipeline, GraphtrimError};

/// Run the graphtrim CLI application
///
/// Loads the input DOT file, optionally trims it to the subgraph reachable
/// from the filter's beginning nodes, applies styling, and writes the result
/// to the output path.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GraphtrimError` for:
/// - Configuration loading errors
/// - Unreadable or unparseable input files
/// - A filter substring matching no node label
/// - Output write failures
pub fn run(args: &Args) -> Result<(), GraphtrimError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    let pipeline = GraphPipeline::new(app_config);

    let mut graph = pipeline.load(&args.input)?;
    info!(input_path = args.input; "Loaded dot file");

    // Trim graph
    if let Some(filter) = &args.filter {
        let report = pipeline.trim(&mut graph, filter)?;
        info!(
            removed_nodes = report.removed_nodes(),
            removed_edges = report.removed_edges();
            "Trimmed graph"
        );
    }

    // Add styles
    pipeline.style(&mut graph);

    pipeline.save(&graph, &args.output)?;
    info!(output_path = args.output; "Saved output dot file");

    Ok(())
}
