//! The seam between the console and the Bolt client.
//!
//! Everything above this module talks to a [`GraphDriver`]; the one real
//! implementation wraps `neo4rs`. Tests substitute a mock connector, so the
//! cache, runner and converter are exercised without a server.

use async_trait::async_trait;
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Graph, Node, Path, Relation,
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

use crate::errors::DriverError;

/// A node as returned by the database, independent of the wire types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRecord {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, Value>,
}

/// A relationship as returned by the database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipRecord {
    pub id: i64,
    pub start: i64,
    pub end: i64,
    pub typ: String,
    pub properties: BTreeMap<String, Value>,
}

/// The collected result of one statement: tabular rows plus any graph
/// entities found in the row values. Columns are reported in sorted order;
/// nodes and relationships are deduplicated by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub nodes: Vec<NodeRecord>,
    pub relationships: Vec<RelationshipRecord>,
}

impl QueryResult {
    /// True when the result carries at least one graph node.
    #[must_use]
    pub fn has_graph(&self) -> bool {
        !self.nodes.is_empty()
    }
}

/// An open connection to a graph database.
#[async_trait]
pub trait GraphDriver: Send + Sync {
    /// Execute one Cypher statement against `database` (or the server
    /// default) and collect its full result.
    async fn run(
        &self,
        database: Option<&str>,
        statement: &str,
        params: Option<&Map<String, Value>>,
    ) -> Result<QueryResult, DriverError>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> Result<(), DriverError>;
}

/// Factory for [`GraphDriver`] handles, one per canonical URI.
#[async_trait]
pub trait Connect: Send + Sync {
    async fn connect(
        &self,
        uri: &str,
        auth: Option<(&str, &str)>,
    ) -> Result<Box<dyn GraphDriver>, DriverError>;
}

/// The production driver: a pooled `neo4rs` Bolt connection.
pub struct Neo4jDriver {
    graph: Graph,
}

impl Neo4jDriver {
    /// Open a connection pool for `uri`. The pool is lazy; the first
    /// statement performs the actual handshake.
    pub async fn connect(uri: &str, auth: Option<(&str, &str)>) -> Result<Self, DriverError> {
        let (user, password) = auth.unwrap_or(("", ""));
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .max_connections(4)
            .build()
            .map_err(|e| DriverError::Connect { uri: uri.to_string(), message: e.to_string() })?;
        let graph = Graph::connect(config)
            .await
            .map_err(|e| DriverError::Connect { uri: uri.to_string(), message: e.to_string() })?;
        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphDriver for Neo4jDriver {
    async fn run(
        &self,
        database: Option<&str>,
        statement: &str,
        params: Option<&Map<String, Value>>,
    ) -> Result<QueryResult, DriverError> {
        let mut query = neo4rs::query(statement);
        if let Some(params) = params {
            for (key, value) in params {
                query = query.param(key.as_str(), json_to_bolt(value));
            }
        }

        let mut stream = match database {
            Some(db) => self.graph.execute_on(db, query).await?,
            None => self.graph.execute(query).await?,
        };

        let mut result = QueryResult::default();
        let mut seen_nodes: HashSet<i64> = HashSet::new();
        let mut seen_rels: HashSet<i64> = HashSet::new();
        while let Some(row) = stream.next().await? {
            let values: BTreeMap<String, Value> = row.to().unwrap_or_default();
            if result.columns.is_empty() && !values.is_empty() {
                result.columns = values.keys().cloned().collect();
            }
            // Columns whose values did not deserialize to JSON may still be
            // graph entities; probe the known columns either way.
            let probe: Vec<String> = if values.is_empty() {
                result.columns.clone()
            } else {
                values.keys().cloned().collect()
            };
            for column in &probe {
                collect_graph_values(&row, column, &mut result, &mut seen_nodes, &mut seen_rels);
            }
            if !values.is_empty() {
                result.rows.push(
                    result
                        .columns
                        .iter()
                        .map(|c| values.get(c).cloned().unwrap_or(Value::Null))
                        .collect(),
                );
            }
        }
        tracing::debug!(
            rows = result.rows.len(),
            nodes = result.nodes.len(),
            relationships = result.relationships.len(),
            "statement complete"
        );
        Ok(result)
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        // neo4rs tears the pool down on drop; nothing to flush.
        Ok(())
    }
}

/// The production connector.
#[derive(Debug, Default, Clone, Copy)]
pub struct Neo4jConnector;

#[async_trait]
impl Connect for Neo4jConnector {
    async fn connect(
        &self,
        uri: &str,
        auth: Option<(&str, &str)>,
    ) -> Result<Box<dyn GraphDriver>, DriverError> {
        Ok(Box::new(Neo4jDriver::connect(uri, auth).await?))
    }
}

fn collect_graph_values(
    row: &neo4rs::Row,
    column: &str,
    result: &mut QueryResult,
    seen_nodes: &mut HashSet<i64>,
    seen_rels: &mut HashSet<i64>,
) {
    if let Ok(node) = row.get::<Node>(column) {
        push_node(result, seen_nodes, &node);
        return;
    }
    if let Ok(rel) = row.get::<Relation>(column) {
        push_relationship(result, seen_rels, &rel);
        return;
    }
    if let Ok(path) = row.get::<Path>(column) {
        for node in path.nodes() {
            push_node(result, seen_nodes, &node);
        }
        for rel in path.rels() {
            push_relationship(result, seen_rels, &rel);
        }
    }
}

fn push_node(result: &mut QueryResult, seen: &mut HashSet<i64>, node: &Node) {
    if !seen.insert(node.id()) {
        return;
    }
    let mut properties = BTreeMap::new();
    for key in node.keys() {
        let value = node.get::<Value>(key).unwrap_or(Value::Null);
        properties.insert(key.to_string(), value);
    }
    result.nodes.push(NodeRecord {
        id: node.id(),
        labels: node.labels().iter().map(|l| (*l).to_string()).collect(),
        properties,
    });
}

fn push_relationship(result: &mut QueryResult, seen: &mut HashSet<i64>, rel: &Relation) {
    if !seen.insert(rel.id()) {
        return;
    }
    let mut properties = BTreeMap::new();
    for key in rel.keys() {
        let value = rel.get::<Value>(key).unwrap_or(Value::Null);
        properties.insert(key.to_string(), value);
    }
    result.relationships.push(RelationshipRecord {
        id: rel.id(),
        start: rel.start_node_id(),
        end: rel.end_node_id(),
        typ: rel.typ().to_string(),
        properties,
    });
}

/// Convert a JSON parameter value into its Bolt representation.
fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                BoltType::Integer(BoltInteger::new(i))
            } else {
                BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or_default()))
            }
        }
        Value::String(s) => BoltType::String(BoltString::from(s.as_str())),
        Value::Array(items) => {
            let list: Vec<BoltType> = items.iter().map(json_to_bolt).collect();
            BoltType::List(BoltList::from(list))
        }
        Value::Object(map) => {
            let mut bolt = BoltMap::default();
            for (key, item) in map {
                bolt.put(BoltString::from(key.as_str()), json_to_bolt(item));
            }
            BoltType::Map(bolt)
        }
    }
}
