//! Output formatting module
//!
//! This module writes a finished graph in the requested format.

use crate::cli::OutputFormat;
use crate::{Result, state_machine::Graph};
use std::path::Path;

/// Render `graph` as text in `format`
pub fn render(graph: &Graph, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Dot => Ok(graph.to_dot()),
        OutputFormat::Json => {
            let mut json = graph.to_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write `graph` to any writer
pub fn output_graph(
    w: &mut impl std::io::Write,
    graph: &Graph,
    format: OutputFormat,
) -> Result<()> {
    w.write_all(render(graph, format)?.as_bytes())?;
    w.flush()?;
    Ok(())
}

/// Write `graph` to `path`, or to stdout when `path` is `-`.
///
/// The whole document is rendered before the file is touched.
pub fn write_graph(graph: &Graph, path: &Path, format: OutputFormat) -> Result<()> {
    if path == Path::new("-") {
        return output_graph(&mut std::io::stdout().lock(), graph, format);
    }
    match format {
        OutputFormat::Dot => graph.save(path),
        OutputFormat::Json => {
            std::fs::write(path, render(graph, format)?)?;
            Ok(())
        }
    }
}
