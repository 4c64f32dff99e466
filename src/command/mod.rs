//! The shell-like command mini-language.
//!
//! A command line such as
//! `-u $neo4j_url -co "$colors" MATCH (n) RETURN n`
//! is resolved into a [`CypherCommand`]: recognized flags are consumed
//! (together with their value token, unless the flag is a boolean switch),
//! `$name` / `{name}` values are substituted from the session variable
//! namespace, and whatever remains becomes the inline query.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Session variables available for `$name` / `{name}` substitution.
pub type Namespace = HashMap<String, Value>;

/// Where a recognized flag stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dest {
    Alias,
    Uri,
    Username,
    Password,
    Database,
    Query,
    Params,
    Close,
    Colors,
    Captions,
    Layout,
    List,
}

/// One recognized flag: short form, long form, and whether it consumes the
/// following token as its value.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub short: &'static str,
    pub long: &'static str,
    pub dest: Dest,
    pub takes_value: bool,
}

/// The full, statically declared flag table. Flags are recognized by exact
/// short- or long-form match only; anything else is left in place.
pub const OPTION_TABLE: &[OptionSpec] = &[
    OptionSpec { short: "-a", long: "--alias", dest: Dest::Alias, takes_value: true },
    OptionSpec { short: "-u", long: "--uri", dest: Dest::Uri, takes_value: true },
    OptionSpec { short: "-us", long: "--username", dest: Dest::Username, takes_value: true },
    OptionSpec { short: "-pw", long: "--password", dest: Dest::Password, takes_value: true },
    OptionSpec { short: "-db", long: "--database", dest: Dest::Database, takes_value: true },
    OptionSpec { short: "-q", long: "--query", dest: Dest::Query, takes_value: true },
    OptionSpec { short: "-p", long: "--params", dest: Dest::Params, takes_value: true },
    OptionSpec { short: "-c", long: "--close", dest: Dest::Close, takes_value: true },
    OptionSpec { short: "-co", long: "--colors", dest: Dest::Colors, takes_value: true },
    OptionSpec { short: "-ca", long: "--captions", dest: Dest::Captions, takes_value: true },
    OptionSpec { short: "-la", long: "--layout", dest: Dest::Layout, takes_value: true },
    OptionSpec { short: "-l", long: "--list", dest: Dest::List, takes_value: false },
];

/// A resolved command: every recognized field, each defaulting to absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CypherCommand {
    pub alias: Option<String>,
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub query: Option<String>,
    pub params: Option<Value>,
    pub close: Option<String>,
    pub colors: Option<Value>,
    pub captions: Option<Value>,
    pub layout: Option<Value>,
    pub list: bool,
}

/// Split a command line into tokens, keeping double-quoted substrings whole.
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    let token = Regex::new(r#"[^"\s]\S*|".+?""#).unwrap();
    token.find_iter(line).map(|m| m.as_str().to_string()).collect()
}

fn lookup(token: &str) -> Option<&'static OptionSpec> {
    OPTION_TABLE.iter().find(|spec| spec.short == token || spec.long == token)
}

/// Strip surrounding quotes, then resolve `$name` / `{name}` references
/// against the namespace. An undefined reference resolves to the literal
/// variable name.
fn resolve_value(raw: &str, vars: &Namespace) -> Value {
    let mut name = raw.trim().to_string();
    if name.starts_with('"') {
        if let Some(end) = name.rfind('"') {
            if end > 0 {
                name = name[1..end].to_string();
            }
        }
    } else if name.starts_with('\'') {
        if let Some(end) = name.rfind('\'') {
            if end > 0 {
                name = name[1..end].to_string();
            }
        }
    }

    if let Some(stripped) = name.strip_prefix('$') {
        name = stripped.to_string();
    } else if name.starts_with('{') {
        if let Some(end) = name.rfind('}') {
            if end > 0 {
                name = name[1..end].to_string();
            }
        }
    }

    match vars.get(&name) {
        Some(value) => value.clone(),
        None => Value::String(name),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn assign(cmd: &mut CypherCommand, dest: Dest, value: Value) {
    match dest {
        Dest::Alias => cmd.alias = Some(value_to_string(&value)),
        Dest::Uri => cmd.uri = Some(value_to_string(&value)),
        Dest::Username => cmd.username = Some(value_to_string(&value)),
        Dest::Password => cmd.password = Some(value_to_string(&value)),
        Dest::Database => cmd.database = Some(value_to_string(&value)),
        Dest::Query => cmd.query = Some(value_to_string(&value)),
        Dest::Close => cmd.close = Some(value_to_string(&value)),
        Dest::Params => cmd.params = Some(value),
        Dest::Colors => cmd.colors = Some(value),
        Dest::Captions => cmd.captions = Some(value),
        Dest::Layout => cmd.layout = Some(value),
        Dest::List => cmd.list = true,
    }
}

/// Resolve a raw command line against the variable namespace.
///
/// Unrecognized tokens are skipped. If no `--query` flag was supplied but at
/// least one flag was consumed, the remaining command string (consumed
/// tokens removed, first occurrence each, the rest preserved verbatim)
/// becomes the inline query.
#[must_use]
pub fn resolve(line: &str, vars: &Namespace) -> CypherCommand {
    let tokens = tokenize(line);
    let mut cmd = CypherCommand::default();
    let mut consumed: Vec<String> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let Some(spec) = lookup(&tokens[i]) else {
            i += 1;
            continue;
        };

        if !spec.takes_value {
            assign(&mut cmd, spec.dest, Value::Bool(true));
            consumed.push(tokens[i].clone());
            i += 1;
            continue;
        }

        consumed.push(tokens[i].clone());
        let Some(raw) = tokens.get(i + 1) else {
            // Dangling flag at end of line: nothing to consume.
            break;
        };
        consumed.push(raw.clone());
        let value = resolve_value(raw, vars);
        assign(&mut cmd, spec.dest, value);
        i += 2;
    }

    if cmd.query.is_none() && !consumed.is_empty() {
        let mut rest = line.to_string();
        for token in &consumed {
            rest = rest.replacen(token.as_str(), "", 1);
        }
        let rest = rest.trim();
        if !rest.is_empty() {
            cmd.query = Some(rest.to_string());
        }
    }

    cmd
}
