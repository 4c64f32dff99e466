//! Conversion from raw query results to the generic graph representation.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::driver::QueryResult;

/// A display-ready node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphNode {
    pub id: i64,
    pub label: String,
    pub color: String,
    pub properties: BTreeMap<String, Value>,
    pub tooltip: String,
}

/// A display-ready directed edge. Parallel edges between the same node pair
/// are all preserved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphEdge {
    pub source: i64,
    pub target: i64,
    pub weight: f64,
    pub label: String,
    pub tooltip: String,
}

/// Intermediate node/edge representation, independent of the source
/// database's types. Built fresh per query result.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GenericGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GenericGraph {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the generic graph from a raw result.
///
/// The display label of a node is its category labels joined with `:` (and
/// prefixed by one). A color mapping for that composed label attaches a
/// color. A caption mapping that names an existing property replaces the
/// display label with that property's value; the composed label is then
/// retained under a `labels` property. Edges with no `weight` property get
/// weight `1`; the relationship type becomes the edge label.
#[must_use]
pub fn convert(
    result: &QueryResult,
    colors: &BTreeMap<String, String>,
    captions: &BTreeMap<String, String>,
) -> GenericGraph {
    let mut graph = GenericGraph::default();

    for node in &result.nodes {
        let composed = format!(":{}", node.labels.join(":"));
        let mut properties = node.properties.clone();
        let color = colors.get(&composed).cloned().unwrap_or_default();

        let mut label = composed.clone();
        if let Some(caption) = captions.get(&composed) {
            if let Some(value) = properties.get(caption) {
                label = display_value(value);
                properties.insert("labels".to_string(), Value::String(composed));
            }
        }

        let tooltip = tooltip_for(&properties);
        graph.nodes.push(GraphNode { id: node.id, label, color, properties, tooltip });
    }

    for rel in &result.relationships {
        let weight = rel.properties.get("weight").and_then(Value::as_f64).unwrap_or(1.0);
        graph.edges.push(GraphEdge {
            source: rel.start,
            target: rel.end,
            weight,
            label: rel.typ.clone(),
            tooltip: tooltip_for(&rel.properties),
        });
    }

    graph
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn tooltip_for(properties: &BTreeMap<String, Value>) -> String {
    serde_json::to_string(properties).unwrap_or_default()
}
