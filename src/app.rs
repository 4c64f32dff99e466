use crate::cli::{Cli, Commands};
use crate::console::Console;
use crate::session::{Outcome, Session};
use crate::utils::config::Config;
use clap::CommandFactory;
use clap_complete::generate;
use serde_json::Value;
use std::fs;
use std::io::{self, Read as _};
use std::path::{Path, PathBuf};

const DEFAULT_WIDGET_OUT: &str = "cypher-graph.html";

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = evaluation error, 2 = usage error).
#[must_use]
pub async fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = crate::cli::Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            0
        }
        Commands::Exec { config, vars, format, line } => {
            let mut session = Session::new();
            if let Err(code) = apply_config(&mut session, config.as_deref()) {
                return code;
            }
            if let Some(code) = apply_vars(&mut session, &vars) {
                return code;
            }
            let line = join_line(&line);
            match session.eval_inline(&line).await {
                Ok(outcome) => print_outcome(&outcome, &format, cli.quiet),
                Err(e) => {
                    eprintln!("Error: {e}");
                    1
                }
            }
        }
        Commands::Render { config, vars, body, out, line } => {
            let mut session = Session::new();
            let cfg = match apply_config(&mut session, config.as_deref()) {
                Ok(cfg) => cfg,
                Err(code) => return code,
            };
            let out = widget_out(out, cfg.as_ref());
            if let Some(code) = apply_vars(&mut session, &vars) {
                return code;
            }
            let body = match body {
                Some(b) => b,
                None => {
                    let mut buf = String::new();
                    if let Err(e) = io::stdin().read_to_string(&mut buf) {
                        eprintln!("Failed to read query body from stdin: {e}");
                        return 1;
                    }
                    buf
                }
            };
            let line = join_line(&line);
            match session.eval_block(&line, &body).await {
                Ok(Outcome::Widget { html, nodes, edges }) => {
                    if let Err(e) = fs::write(&out, html) {
                        eprintln!("Failed to write widget output {out}: {e}");
                        return 1;
                    }
                    if !cli.quiet {
                        println!("Wrote {out} ({nodes} nodes, {edges} edges)");
                    }
                    0
                }
                Ok(outcome) => print_outcome(&outcome, "text", cli.quiet),
                Err(e) => {
                    eprintln!("Error: {e}");
                    1
                }
            }
        }
        Commands::Repl { config, out } => {
            let mut session = Session::new();
            let cfg = match apply_config(&mut session, config.as_deref()) {
                Ok(cfg) => cfg,
                Err(code) => return code,
            };
            let out = widget_out(out, cfg.as_ref());
            let mut console = Console::new(session, PathBuf::from(out));
            match console.run().await {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Console error: {e}");
                    1
                }
            }
        }
    }
}

/// Load the startup configuration and seed the session with it: an explicit
/// path must exist and parse, while the implicit file in the working
/// directory is best effort.
fn apply_config(session: &mut Session, path: Option<&str>) -> Result<Option<Config>, i32> {
    let config = match path {
        Some(p) => match crate::utils::config::load_config_at(Path::new(p)) {
            Some(cfg) => Some(cfg),
            None => {
                eprintln!("Failed to load configuration file {p}");
                return Err(2);
            }
        },
        None => crate::utils::config::load_config_near(Path::new(".")),
    };
    if let Some(cfg) = &config {
        if let Err(e) = session.apply_startup_config(cfg) {
            eprintln!("Invalid configuration: {e}");
            return Err(2);
        }
    }
    Ok(config)
}

/// The widget output path: the `--out` flag wins, then the configured path,
/// then the conventional filename.
fn widget_out(flag: Option<String>, config: Option<&Config>) -> String {
    flag.or_else(|| config.and_then(|c| c.widget.as_ref()).and_then(|w| w.out.clone()))
        .unwrap_or_else(|| DEFAULT_WIDGET_OUT.to_string())
}

/// Rebuild the command line from argv words. Shell quoting is gone by the
/// time we see the words, so anything with whitespace is re-quoted to stay
/// one token for the resolver.
fn join_line(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            if w.contains(char::is_whitespace) && !w.starts_with('"') {
                format!("\"{w}\"")
            } else {
                w.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_vars(session: &mut Session, vars: &[String]) -> Option<i32> {
    for pair in vars {
        let Some((name, raw)) = pair.split_once('=') else {
            eprintln!("Invalid --var {pair}: expected NAME=VALUE");
            return Some(2);
        };
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        session.set_var(name, value);
    }
    None
}

fn print_outcome(outcome: &Outcome, format: &str, quiet: bool) -> i32 {
    match outcome {
        Outcome::Message(message) => {
            println!("{message}");
            0
        }
        Outcome::Connections(uris) => {
            if format == "json" {
                match serde_json::to_string_pretty(uris) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("JSON encode error: {e}");
                        return 1;
                    }
                }
            } else if uris.is_empty() {
                println!("No open connections");
            } else {
                for uri in uris {
                    println!("{uri}");
                }
            }
            0
        }
        Outcome::Table(result) => {
            if format == "json" {
                let out = serde_json::json!({
                    "columns": result.columns,
                    "rows": result.rows,
                });
                match serde_json::to_string_pretty(&out) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("JSON encode error: {e}");
                        return 1;
                    }
                }
            } else {
                println!("{}", crate::render::render_table(result));
            }
            0
        }
        Outcome::Graph(graph) => {
            match serde_json::to_string_pretty(graph) {
                Ok(s) => println!("{s}"),
                Err(e) => {
                    eprintln!("JSON encode error: {e}");
                    return 1;
                }
            }
            0
        }
        Outcome::Widget { nodes, edges, .. } => {
            // Render widgets are written by the caller; reaching here means
            // the invocation style and outcome disagree.
            if !quiet {
                println!("Graph result: {nodes} nodes, {edges} edges");
            }
            0
        }
        Outcome::Nothing => 0,
    }
}
