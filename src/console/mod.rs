//! The interactive console.
//!
//! Lines starting with `-` are command lines; a command line that carries
//! flags but no query switches into body-collection mode, where following
//! lines are gathered into a query block until an empty line. Everything
//! else is sent as a bare query against the current default alias.
//!
//! Console directives start with `:` and never reach the evaluator.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::errors::ConsoleError;
use crate::render;
use crate::session::{Outcome, Session};

const PROMPT: &str = "cypher> ";
const BODY_PROMPT: &str = "  ....> ";
const HISTORY_FILE: &str = ".cypher_repl_history";

const HELP: &str = "\
Command lines start with a flag, e.g. `-u bolt://host -q \"MATCH (n) RETURN n\"`.
A flag line without a query collects the query body on following lines
(finish with an empty line). Bare lines run as queries on the default alias.

Directives:
  :set NAME VALUE   define a session variable (VALUE parsed as JSON if possible)
  :vars             list session variables
  :out PATH         set the output file for rendered graph widgets
  :help             show this message
  :quit / :exit     leave the console";

pub struct Console {
    session: Session,
    out: PathBuf,
}

impl Console {
    #[must_use]
    pub fn new(session: Session, out: PathBuf) -> Self {
        Self { session, out }
    }

    /// Run the read-eval-print loop until EOF or `:quit`.
    ///
    /// # Errors
    /// Propagates readline failures other than interrupt/EOF; evaluation
    /// errors are printed and the loop continues.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        let mut editor = DefaultEditor::new().map_err(readline_io)?;
        let history = history_path();
        if let Some(path) = &history {
            // Best effort: a missing or unreadable history file is not an error.
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(&line);

                    if let Some(directive) = line.strip_prefix(':') {
                        if self.directive(directive) {
                            break;
                        }
                        continue;
                    }

                    if let Err(err) = self.dispatch(&mut editor, &line).await {
                        eprintln!("Error: {err}");
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(readline_io(err)),
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
        Ok(())
    }

    async fn dispatch(&mut self, editor: &mut DefaultEditor, line: &str) -> Result<(), ConsoleError> {
        let outcome = if line.starts_with('-') {
            let cmd = crate::command::resolve(line, self.session.vars());
            let needs_body = cmd.query.is_none() && !cmd.list && cmd.close.is_none();
            if needs_body {
                let body = collect_body(editor)?;
                if body.trim().is_empty() {
                    self.session.eval_inline(line).await?
                } else {
                    self.session.eval_block(line, &body).await?
                }
            } else {
                self.session.eval_inline(line).await?
            }
        } else {
            self.session.eval_query(line).await?
        };
        self.print(&outcome)?;
        Ok(())
    }

    /// Returns true when the console should exit.
    fn directive(&mut self, directive: &str) -> bool {
        let mut parts = directive.splitn(3, char::is_whitespace);
        match parts.next().unwrap_or_default() {
            "quit" | "exit" => return true,
            "help" => println!("{HELP}"),
            "set" => match (parts.next(), parts.next()) {
                (Some(name), Some(raw)) => {
                    let value = serde_json::from_str::<Value>(raw)
                        .unwrap_or_else(|_| Value::String(raw.to_string()));
                    self.session.set_var(name, value);
                }
                _ => println!("Usage: :set NAME VALUE"),
            },
            "vars" => {
                let mut names: Vec<&String> = self.session.vars().keys().collect();
                names.sort();
                for name in names {
                    println!("{name} = {}", self.session.vars()[name]);
                }
            }
            "out" => match parts.next() {
                Some(path) => {
                    self.out = PathBuf::from(path);
                    println!("Widget output set to {}", self.out.display());
                }
                None => println!("Usage: :out PATH"),
            },
            other => println!("Unknown directive :{other} (try :help)"),
        }
        false
    }

    fn print(&self, outcome: &Outcome) -> Result<(), ConsoleError> {
        match outcome {
            Outcome::Message(message) => println!("{message}"),
            Outcome::Connections(uris) => {
                if uris.is_empty() {
                    println!("No open connections");
                } else {
                    for uri in uris {
                        println!("{uri}");
                    }
                }
            }
            Outcome::Table(result) => println!("{}", render::render_table(result)),
            Outcome::Graph(graph) => {
                println!(
                    "Graph result: {} nodes, {} edges",
                    graph.nodes.len(),
                    graph.edges.len()
                );
            }
            Outcome::Widget { html, nodes, edges } => {
                fs::write(&self.out, html)?;
                println!("Wrote {} ({nodes} nodes, {edges} edges)", self.out.display());
            }
            Outcome::Nothing => {}
        }
        Ok(())
    }
}

fn collect_body(editor: &mut DefaultEditor) -> Result<String, ConsoleError> {
    let mut body = String::new();
    loop {
        match editor.readline(BODY_PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    break;
                }
                body.push_str(&line);
                body.push('\n');
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(readline_io(err)),
        }
    }
    Ok(body)
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE))
}

fn readline_io(err: ReadlineError) -> ConsoleError {
    ConsoleError::Io(std::io::Error::other(err))
}
