use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "cypher-repl",
    version,
    about = "Interactive Cypher console with graph visualization",
    long_about = "Run Cypher against a graph database from the command line or an interactive console. Command lines use a shell-like flag language (-u/--uri, -db/--database, -q/--query, ...); graph-shaped results render as an interactive HTML widget, everything else as a table."
)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a single command line and print the result
    Exec {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Session variable as NAME=VALUE (VALUE parsed as JSON if possible); repeatable
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
        /// Output format for tabular results: text or json
        #[arg(long, value_parser = ["text", "json"], default_value = "text")]
        format: String,
        /// The command line, e.g. -u bolt://host -q "MATCH (n) RETURN n"
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Evaluate a command line plus a query body and write the graph widget
    Render {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Session variable as NAME=VALUE (VALUE parsed as JSON if possible); repeatable
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
        /// Query body; read from stdin when omitted
        #[arg(long)]
        body: Option<String>,
        /// Output HTML file for the widget (defaults to the configured path,
        /// else cypher-graph.html)
        #[arg(long)]
        out: Option<String>,
        /// The command line (connection and display flags)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Start the interactive console
    Repl {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,
        /// Output HTML file for graph widgets (defaults to the configured
        /// path, else cypher-graph.html)
        #[arg(long)]
        out: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
