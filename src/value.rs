//! # JSON boundary
//!
//! Closes graphs that arrive as untyped [`serde_json::Value`]s. The shape is
//! inspected exactly once, up front:
//!
//! - an array is a dense matrix, and every element must be a row array;
//! - an object is a labeled adjacency, and every value must be an object;
//! - anything else is an unsupported representation, rejected or passed
//!   through according to [`Strictness`].
//!
//! Parsing fully validates the value before it is touched. Once closed, only
//! cells that became reachable are rewritten: an absent numeric cell becomes
//! `1`, any other absent cell or missing inner entry becomes `true`. Existing
//! cells, including their original spelling, are left alone.

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::{
    closure::{ClosureConfig, Graph, Strictness, TransitiveClosure},
    dense::DenseMatrix,
    error::{ClosureError, MalformedGraph},
    labeled::LabeledAdjacency,
    presence::Presence,
};

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses `value` into a typed [`Graph`].
///
/// # Errors
///
/// [`ClosureError::UnsupportedRepresentation`] if `value` is neither an array
/// nor an object, and [`ClosureError::Malformed`] if it is one of those but
/// does not describe a valid graph.
pub fn graph_from_value(value: &Value) -> Result<Graph, ClosureError> {
    match value {
        Value::Array(rows) => Ok(Graph::Dense(dense_from_rows(rows)?)),
        Value::Object(rows) => Ok(Graph::Labeled(labeled_from_object(rows)?)),
        other => Err(ClosureError::UnsupportedRepresentation {
            found: describe(other),
        }),
    }
}

fn dense_from_rows(rows: &[Value]) -> Result<DenseMatrix, MalformedGraph> {
    let mut cells = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let Value::Array(row_cells) = value else {
            return Err(MalformedGraph::NonSequenceRow { row });
        };
        if let Some(column) = row_cells
            .iter()
            .position(|cell| !matches!(cell, Value::Null | Value::Bool(_) | Value::Number(_)))
        {
            return Err(MalformedGraph::NonBooleanCell { row, column });
        }
        cells.push(row_cells.as_slice());
    }
    DenseMatrix::try_from_rows::<_, Value>(&cells)
}

fn labeled_from_object(rows: &Map<String, Value>) -> Result<LabeledAdjacency, MalformedGraph> {
    let mut nested = Vec::with_capacity(rows.len());
    for (label, value) in rows {
        let Value::Object(targets) = value else {
            return Err(MalformedGraph::NonMappingRow {
                label: label.clone(),
            });
        };
        nested.push((label.clone(), targets));
    }
    LabeledAdjacency::try_from_nested(nested.into_iter().map(|(label, targets)| {
        (
            label,
            targets.iter().map(|(target, marker)| (target.clone(), marker)),
        )
    }))
}

fn present_marker(absent: &Value) -> Value {
    match absent {
        Value::Number(_) => Value::from(1),
        _ => Value::Bool(true),
    }
}

fn write_back(value: &mut Value, graph: &Graph) {
    match (value, graph) {
        (Value::Array(rows), Graph::Dense(matrix)) => {
            for (i, row) in rows.iter_mut().enumerate() {
                let Value::Array(cells) = row else {
                    continue;
                };
                for (j, cell) in cells.iter_mut().enumerate() {
                    if matrix.reaches(i, j) && !cell.is_present() {
                        *cell = present_marker(cell);
                    }
                }
            }
        }
        (Value::Object(rows), Graph::Labeled(adjacency)) => {
            for (label, row) in rows.iter_mut() {
                let (Value::Object(targets), Some(reached)) = (row, adjacency.successors(label))
                else {
                    continue;
                };
                for target in reached {
                    let cell = targets.entry(target.clone()).or_insert(Value::Null);
                    if !cell.is_present() {
                        *cell = Value::Bool(true);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Closes a JSON-encoded graph in place and returns it.
///
/// Under [`Strictness::Permissive`] a value of unsupported shape is returned
/// unchanged; malformed matrices and mappings are always rejected. On error
/// `value` has not been modified.
///
/// # Errors
///
/// See [`graph_from_value`].
#[instrument(level = "debug", skip_all, fields(strictness = ?config.strictness))]
pub fn compute_closure_value<'a>(
    value: &'a mut Value,
    config: &ClosureConfig,
) -> Result<&'a mut Value, ClosureError> {
    let mut graph = match graph_from_value(value) {
        Ok(graph) => graph,
        Err(ClosureError::UnsupportedRepresentation { found })
            if config.strictness == Strictness::Permissive =>
        {
            warn!(found, "passing unsupported graph representation through unchanged");
            return Ok(value);
        }
        Err(err) => return Err(err),
    };

    let stats = graph.close_with(config);
    debug!(
        vertices = stats.vertices,
        added = stats.added,
        "writing closure back"
    );
    write_back(value, &graph);
    Ok(value)
}
