//! The stateful evaluator behind both the CLI and the interactive console.
//!
//! A [`Session`] owns the connection cache, the driver connector and the
//! variable namespace, and evaluates command lines. Inline and block
//! invocations are two distinct operations: inline returns the generic
//! graph to the caller, block produces the rendered widget.

use serde_json::Value;

use crate::command::{self, Namespace};
use crate::connect::{self, CloseOutcome, ConnectionCache, DEFAULT_ALIAS, DEFAULT_URI};
use crate::convert::{self, GenericGraph};
use crate::driver::{Connect, Neo4jConnector, QueryResult};
use crate::errors::ConsoleError;
use crate::render;
use crate::runner;
use crate::utils::config::Config;

/// Message returned when a command names no connection at all.
pub const USAGE: &str = "Pass --uri, --list or --close";

/// What a command evaluated to.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// A user-facing status line (usage errors, close reports).
    Message(String),
    /// The open canonical URIs, from `--list`.
    Connections(Vec<String>),
    /// A tabular result (no graph nodes in it).
    Table(QueryResult),
    /// A graph result, returned for programmatic use (inline invocation).
    Graph(GenericGraph),
    /// A graph result rendered as an interactive widget (block invocation).
    Widget { html: String, nodes: usize, edges: usize },
    /// The command ran no statement.
    Nothing,
}

enum Invocation {
    Inline,
    Block,
}

pub struct Session {
    cache: ConnectionCache,
    connector: Box<dyn Connect>,
    vars: Namespace,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session backed by the real Bolt connector.
    #[must_use]
    pub fn new() -> Self {
        Self::with_connector(Box::new(Neo4jConnector))
    }

    /// A session backed by an arbitrary connector (tests use a mock).
    #[must_use]
    pub fn with_connector(connector: Box<dyn Connect>) -> Self {
        Self { cache: ConnectionCache::new(), connector, vars: Namespace::new() }
    }

    /// Seed the `default` alias from the startup configuration file.
    pub fn apply_startup_config(&mut self, config: &Config) -> Result<(), ConsoleError> {
        let Some(conn) = &config.connection else {
            return Ok(());
        };
        let uri = conn.uri.clone().unwrap_or_else(|| DEFAULT_URI.to_string());
        let parts = connect::split_uri(
            Some(uri.as_str()),
            conn.username.as_deref(),
            conn.password.as_deref(),
        );
        let cmd = command::CypherCommand {
            database: conn.database.clone(),
            ..command::CypherCommand::default()
        };
        self.cache.resolve(DEFAULT_ALIAS, &parts, &cmd)?;
        Ok(())
    }

    pub fn set_var(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn vars(&self) -> &Namespace {
        &self.vars
    }

    #[must_use]
    pub fn cache(&self) -> &ConnectionCache {
        &self.cache
    }

    /// Evaluate a single-line command; graph results are returned as
    /// [`Outcome::Graph`] for programmatic use.
    ///
    /// # Errors
    /// Driver failures and malformed mapping arguments propagate; usage
    /// problems come back as [`Outcome::Message`].
    pub async fn eval_inline(&mut self, line: &str) -> Result<Outcome, ConsoleError> {
        self.eval(line, None, Invocation::Inline).await
    }

    /// Evaluate a command line plus a query body; graph results are
    /// rendered as an interactive widget ([`Outcome::Widget`]).
    ///
    /// # Errors
    /// As for [`Session::eval_inline`].
    pub async fn eval_block(&mut self, line: &str, body: &str) -> Result<Outcome, ConsoleError> {
        self.eval(line, Some(body), Invocation::Block).await
    }

    /// Evaluate a bare query against the cached default (or prior) alias,
    /// inline style.
    ///
    /// # Errors
    /// As for [`Session::eval_inline`].
    pub async fn eval_query(&mut self, query: &str) -> Result<Outcome, ConsoleError> {
        self.eval("", Some(query), Invocation::Inline).await
    }

    async fn eval(
        &mut self,
        line: &str,
        body: Option<&str>,
        invocation: Invocation,
    ) -> Result<Outcome, ConsoleError> {
        let cmd = command::resolve(line, &self.vars);
        let alias = cmd.alias.clone().unwrap_or_else(|| DEFAULT_ALIAS.to_string());

        if cmd.list {
            return Ok(Outcome::Connections(self.cache.list()));
        }

        if let Some(target) = &cmd.close {
            return Ok(match self.cache.close(target).await? {
                CloseOutcome::Closed => Outcome::Message("Driver closed successfully".to_string()),
                CloseOutcome::NotDefined => {
                    Outcome::Message(format!("Connection not defined for {target}"))
                }
            });
        }

        if cmd.uri.is_none() && !self.cache.has_alias(&alias) {
            return Ok(Outcome::Message(USAGE.to_string()));
        }

        let parts =
            connect::split_uri(cmd.uri.as_deref(), cmd.username.as_deref(), cmd.password.as_deref());
        let config = self.cache.resolve(&alias, &parts, &cmd)?;
        let Some(uri) = config.uri.clone() else {
            return Ok(Outcome::Message(USAGE.to_string()));
        };

        let body_text = match body {
            Some(b) if !b.trim().is_empty() => b.to_string(),
            _ => cmd.query.clone().unwrap_or_default(),
        };
        if body_text.trim().is_empty() {
            return Ok(Outcome::Nothing);
        }

        let params = match &cmd.params {
            Some(value) => Some(connect::parse_json_map("params", value)?),
            None => None,
        };

        let auth = config.auth.as_ref().map(|(user, pass)| (user.as_str(), pass.as_str()));
        let driver = self.cache.driver_for(&uri, auth, self.connector.as_ref()).await?;
        let result =
            runner::run(driver, config.database.as_deref(), &body_text, params.as_ref()).await?;
        let Some(result) = result else {
            return Ok(Outcome::Nothing);
        };

        if result.has_graph() {
            let graph = convert::convert(&result, &config.colors, &config.captions);
            Ok(match invocation {
                Invocation::Inline => Outcome::Graph(graph),
                Invocation::Block => {
                    let html = render::widget_html(&graph, &config.layout);
                    Outcome::Widget { nodes: graph.nodes.len(), edges: graph.edges.len(), html }
                }
            })
        } else {
            Ok(Outcome::Table(result))
        }
    }
}
