//! Widget and table rendering.
//!
//! Graph results become a self-contained cytoscape.js HTML page (the
//! interactive widget); anything else falls back to an ASCII table of the
//! raw rows.

use serde_json::{Map, Value};
use std::fmt::Write as _;

use crate::convert::GenericGraph;
use crate::driver::QueryResult;
use crate::utils::table;

/// Layout options with the documented fixed defaults. Any key missing from
/// a cached layout map falls back to the value here.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub layout: String,
    pub padding: i64,
    pub node_spacing: i64,
    pub edge_length_val: i64,
    pub animate: bool,
    pub randomize: bool,
    pub max_simulations: i64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            layout: "dagre".to_string(),
            padding: 0,
            node_spacing: 10,
            edge_length_val: 10,
            animate: true,
            randomize: true,
            max_simulations: 1500,
        }
    }
}

impl LayoutOptions {
    /// Resolve a cached layout map key by key, falling back to defaults.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            layout: map
                .get("layout")
                .and_then(Value::as_str)
                .map_or(defaults.layout, str::to_string),
            padding: map.get("padding").and_then(Value::as_i64).unwrap_or(defaults.padding),
            node_spacing: map
                .get("nodeSpacing")
                .and_then(Value::as_i64)
                .unwrap_or(defaults.node_spacing),
            edge_length_val: map
                .get("edgeLengthVal")
                .and_then(Value::as_i64)
                .unwrap_or(defaults.edge_length_val),
            animate: map.get("animate").and_then(Value::as_bool).unwrap_or(defaults.animate),
            randomize: map
                .get("randomize")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.randomize),
            max_simulations: map
                .get("maxSimulations")
                .and_then(Value::as_i64)
                .unwrap_or(defaults.max_simulations),
        }
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from(self.layout.clone()));
        map.insert("padding".to_string(), Value::from(self.padding));
        map.insert("nodeSpacing".to_string(), Value::from(self.node_spacing));
        map.insert("edgeLengthVal".to_string(), Value::from(self.edge_length_val));
        map.insert("animate".to_string(), Value::from(self.animate));
        map.insert("randomize".to_string(), Value::from(self.randomize));
        map.insert("maxSimulations".to_string(), Value::from(self.max_simulations));
        Value::Object(map)
    }
}

/// The layout map cached for a freshly created alias. Render-time fallbacks
/// cover keys absent here.
#[must_use]
pub fn default_layout() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("layout".to_string(), Value::from("dagre"));
    map.insert("padding".to_string(), Value::from(0));
    map.insert("nodeSpacing".to_string(), Value::from(10));
    map.insert("edgeLengthVal".to_string(), Value::from(10));
    map.insert("animate".to_string(), Value::from(true));
    map.insert("randomize".to_string(), Value::from(true));
    map
}

const FALLBACK_COLOR: &str = "#D3D3D3";

/// Cytoscape-shaped `{nodes: [...], edges: [...]}` element data.
#[must_use]
pub fn elements_json(graph: &GenericGraph) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|node| {
            let mut data = Map::new();
            data.insert("id".to_string(), Value::from(node.id.to_string()));
            data.insert("label".to_string(), Value::from(node.label.clone()));
            let color = if node.color.is_empty() { FALLBACK_COLOR } else { node.color.as_str() };
            data.insert("color".to_string(), Value::from(color));
            data.insert("tooltip".to_string(), Value::from(node.tooltip.clone()));
            let mut element = Map::new();
            element.insert("data".to_string(), Value::Object(data));
            Value::Object(element)
        })
        .collect();

    let edges: Vec<Value> = graph
        .edges
        .iter()
        .map(|edge| {
            let mut data = Map::new();
            data.insert("source".to_string(), Value::from(edge.source.to_string()));
            data.insert("target".to_string(), Value::from(edge.target.to_string()));
            data.insert("label".to_string(), Value::from(edge.label.clone()));
            data.insert("weight".to_string(), Value::from(edge.weight));
            data.insert("tooltip".to_string(), Value::from(edge.tooltip.clone()));
            let mut element = Map::new();
            element.insert("data".to_string(), Value::Object(data));
            Value::Object(element)
        })
        .collect();

    let mut elements = Map::new();
    elements.insert("nodes".to_string(), Value::Array(nodes));
    elements.insert("edges".to_string(), Value::Array(edges));
    Value::Object(elements)
}

/// Render the generic graph as a self-contained interactive HTML page.
#[must_use]
pub fn widget_html(graph: &GenericGraph, layout: &Map<String, Value>) -> String {
    let elements = elements_json(graph);
    let layout = LayoutOptions::from_map(layout).to_json();

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>cypher-repl graph</title>\n");
    page.push_str(
        "<script src=\"https://unpkg.com/cytoscape@3/dist/cytoscape.min.js\"></script>\n",
    );
    page.push_str("<script src=\"https://unpkg.com/dagre@0.8/dist/dagre.min.js\"></script>\n");
    page.push_str(
        "<script src=\"https://unpkg.com/cytoscape-dagre@2/cytoscape-dagre.js\"></script>\n",
    );
    page.push_str(
        "<style>html, body, #graph { margin: 0; width: 100%; height: 100%; }</style>\n",
    );
    page.push_str("</head>\n<body>\n<div id=\"graph\"></div>\n<script>\n");
    let _ = writeln!(page, "const elements = {elements};");
    let _ = writeln!(page, "const layout = {layout};");
    page.push_str(
        r#"const style = [
  { selector: 'node', style: {
      'font-size': '10', 'label': 'data(label)',
      'height': '60', 'width': '60', 'text-max-width': '60',
      'text-wrap': 'wrap', 'text-valign': 'center',
      'background-color': 'data(color)', 'background-opacity': 0.6,
      'border-width': 3, 'border-color': '#D3D3D3' } },
  { selector: 'edge', style: {
      'font-size': '8', 'label': 'data(label)', 'line-color': '#D3D3D3',
      'text-rotation': 'autorotate', 'target-arrow-shape': 'triangle',
      'target-arrow-color': '#D3D3D3', 'curve-style': 'bezier',
      'text-background-color': '#FCFCFC', 'text-background-opacity': 0.8,
      'text-background-shape': 'rectangle', 'width': 'data(weight)' } }
];
const cy = cytoscape({ container: document.getElementById('graph'), elements, style, layout });
cy.nodes().forEach(n => { n.data('title', n.data('tooltip')); });
"#,
    );
    page.push_str("</script>\n</body>\n</html>\n");
    page
}

/// Tabular fallback for results that carry no graph nodes.
#[must_use]
pub fn render_table(result: &QueryResult) -> String {
    let headers: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(cell).collect())
        .collect();
    table::render(&headers, &rows)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
