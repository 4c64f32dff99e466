#![allow(dead_code)]

use async_trait::async_trait;
use cypher_repl::driver::{Connect, GraphDriver, NodeRecord, QueryResult, RelationshipRecord};
use cypher_repl::errors::DriverError;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

/// One recorded statement execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub database: Option<String>,
    pub statement: String,
    pub params: Option<Map<String, Value>>,
}

/// Shared state between a mock connector and every driver it hands out.
#[derive(Default, Clone)]
pub struct Recorder {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub results: Arc<Mutex<VecDeque<QueryResult>>>,
    pub connects: Arc<Mutex<Vec<String>>>,
    pub closes: Arc<Mutex<usize>>,
}

impl Recorder {
    pub fn queue(&self, result: QueryResult) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn connects(&self) -> Vec<String> {
        self.connects.lock().unwrap().clone()
    }

    pub fn closes(&self) -> usize {
        *self.closes.lock().unwrap()
    }
}

pub struct MockDriver {
    recorder: Recorder,
}

#[async_trait]
impl GraphDriver for MockDriver {
    async fn run(
        &self,
        database: Option<&str>,
        statement: &str,
        params: Option<&Map<String, Value>>,
    ) -> Result<QueryResult, DriverError> {
        self.recorder.calls.lock().unwrap().push(Call {
            database: database.map(str::to_string),
            statement: statement.to_string(),
            params: params.cloned(),
        });
        Ok(self.recorder.results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        *self.recorder.closes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Connector that records connection URIs and hands out mock drivers
/// sharing the same recorder.
pub struct MockConnector {
    pub recorder: Recorder,
}

impl MockConnector {
    pub fn new() -> (Self, Recorder) {
        let recorder = Recorder::default();
        (Self { recorder: recorder.clone() }, recorder)
    }
}

#[async_trait]
impl Connect for MockConnector {
    async fn connect(
        &self,
        uri: &str,
        _auth: Option<(&str, &str)>,
    ) -> Result<Box<dyn GraphDriver>, DriverError> {
        self.recorder.connects.lock().unwrap().push(uri.to_string());
        Ok(Box::new(MockDriver { recorder: self.recorder.clone() }))
    }
}

pub fn person(id: i64, name: &str) -> NodeRecord {
    let mut properties = BTreeMap::new();
    properties.insert("name".to_string(), json!(name));
    NodeRecord { id, labels: vec!["Person".to_string()], properties }
}

pub fn knows(id: i64, start: i64, end: i64) -> RelationshipRecord {
    RelationshipRecord {
        id,
        start,
        end,
        typ: "KNOWS".to_string(),
        properties: BTreeMap::new(),
    }
}

/// A small two-node, one-edge graph result.
pub fn graph_result() -> QueryResult {
    QueryResult {
        columns: vec!["n".to_string(), "m".to_string()],
        rows: vec![vec![json!({"name": "ann"}), json!({"name": "bob"})]],
        nodes: vec![person(1, "ann"), person(2, "bob")],
        relationships: vec![knows(10, 1, 2)],
    }
}

/// A plain tabular result with no graph entities.
pub fn table_result() -> QueryResult {
    QueryResult {
        columns: vec!["count".to_string()],
        rows: vec![vec![json!(42)]],
        nodes: Vec::new(),
        relationships: Vec::new(),
    }
}
