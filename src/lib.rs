//! cypher-repl — Interactive Cypher console with graph visualization
//!
//! Run Cypher against a graph database from the command line or an
//! interactive console, and render graph-shaped results as an interactive
//! HTML widget.
//!
//! # Features
//! - Shell-like command lines (`-u/--uri`, `-db/--database`, `-q/--query`, ...)
//!   with `$name` / `{name}` session-variable substitution
//! - Connection aliases with cached display configuration (colors, captions,
//!   layout) and lazily opened driver handles, one per canonical URI
//! - Semicolon-separated multi-statement batches (last result wins)
//! - Graph results converted to a generic node/edge form, rendered with
//!   cytoscape.js; anything else printed as a table
//!
//! # Quickstart (Library)
//! ```no_run
//! use cypher_repl::session::{Outcome, Session};
//!
//! # async fn demo() -> Result<(), cypher_repl::errors::ConsoleError> {
//! let mut session = Session::new();
//! let outcome = session
//!     .eval_inline("-u bolt://localhost:7687 MATCH (n) RETURN n LIMIT 5")
//!     .await?;
//! if let Outcome::Graph(graph) = outcome {
//!     println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! cypher-repl exec -- -u bolt://localhost:7687 -q "MATCH (n) RETURN n LIMIT 5"
//! cypher-repl render --out graph.html --body "MATCH (n)-[r]->(m) RETURN n, r, m" -- -u bolt://localhost:7687
//! cypher-repl repl
//! ```
pub mod app;
pub mod cli;
pub mod command;
pub mod connect;
pub mod console;
pub mod convert;
pub mod driver;
pub mod errors;
pub mod render;
pub mod runner;
pub mod session;
pub mod utils;
