use cypher_repl::command::{resolve, tokenize, Namespace};
use serde_json::json;

#[test]
fn tokenize_keeps_quoted_substrings_whole() {
    let tokens = tokenize(r#"-q "MATCH (n) RETURN n" -db movies"#);
    assert_eq!(tokens, vec![r#"-q"#, r#""MATCH (n) RETURN n""#, "-db", "movies"]);
}

#[test]
fn resolve_recognizes_short_and_long_forms() {
    let vars = Namespace::new();
    let cmd = resolve("-u bolt://host:7687 --database movies -us neo -pw secret", &vars);
    assert_eq!(cmd.uri.as_deref(), Some("bolt://host:7687"));
    assert_eq!(cmd.database.as_deref(), Some("movies"));
    assert_eq!(cmd.username.as_deref(), Some("neo"));
    assert_eq!(cmd.password.as_deref(), Some("secret"));
}

#[test]
fn quoted_query_value_loses_its_quotes() {
    let vars = Namespace::new();
    let cmd = resolve(r#"-q "MATCH (n) RETURN n""#, &vars);
    assert_eq!(cmd.query.as_deref(), Some("MATCH (n) RETURN n"));
}

#[test]
fn dollar_reference_substitutes_from_namespace() {
    let mut vars = Namespace::new();
    vars.insert("neo4j_url".to_string(), json!("bolt://remote:7687"));
    let cmd = resolve("-u $neo4j_url", &vars);
    assert_eq!(cmd.uri.as_deref(), Some("bolt://remote:7687"));
}

#[test]
fn brace_reference_substitutes_structured_values() {
    let mut vars = Namespace::new();
    vars.insert("my_colors".to_string(), json!({":Person": "#FF0000"}));
    let cmd = resolve("-co {my_colors} -u bolt://h", &vars);
    assert_eq!(cmd.colors, Some(json!({":Person": "#FF0000"})));
}

#[test]
fn undefined_reference_falls_back_to_literal_name() {
    let vars = Namespace::new();
    let cmd = resolve("-u $missing_url", &vars);
    assert_eq!(cmd.uri.as_deref(), Some("missing_url"));
}

#[test]
fn remainder_becomes_inline_query() {
    let vars = Namespace::new();
    let cmd = resolve("-u bolt://host MATCH (n) RETURN n", &vars);
    assert_eq!(cmd.query.as_deref(), Some("MATCH (n) RETURN n"));
}

#[test]
fn explicit_query_flag_wins_over_remainder() {
    let vars = Namespace::new();
    let cmd = resolve(r#"-q "RETURN 1" -u bolt://host leftover tokens"#, &vars);
    assert_eq!(cmd.query.as_deref(), Some("RETURN 1"));
}

#[test]
fn line_with_no_flags_yields_empty_command() {
    let vars = Namespace::new();
    let cmd = resolve("MATCH (n) RETURN n", &vars);
    assert_eq!(cmd.query, None);
    assert_eq!(cmd.uri, None);
    assert!(!cmd.list);
}

#[test]
fn list_flag_is_boolean() {
    let vars = Namespace::new();
    let cmd = resolve("-l", &vars);
    assert!(cmd.list);
    assert_eq!(cmd.query, None);
}

#[test]
fn dangling_value_flag_at_end_is_ignored() {
    let vars = Namespace::new();
    let cmd = resolve("-u bolt://host --close", &vars);
    assert_eq!(cmd.uri.as_deref(), Some("bolt://host"));
    assert_eq!(cmd.close, None);
}

#[test]
fn unknown_flag_stays_in_the_inline_query() {
    let vars = Namespace::new();
    let cmd = resolve("-u bolt://host -x MATCH (n) RETURN n", &vars);
    assert_eq!(cmd.query.as_deref(), Some("-x MATCH (n) RETURN n"));
}
