use cypher_repl::utils::{config, table};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn table_renders_headers_and_rows() {
    let rows = vec![
        vec!["ann".to_string(), "34".to_string()],
        vec!["bob".to_string(), "27".to_string()],
    ];
    let out = table::render(&["name", "age"], &rows);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[1].contains("name"));
    assert!(lines[3].contains("ann"));
    assert!(lines[4].contains("bob"));
}

#[test]
fn table_handles_ragged_rows() {
    let rows = vec![vec!["only-one-cell".to_string()]];
    let out = table::render(&["a", "b"], &rows);
    assert!(out.contains("only-one-cell"));
    let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
    assert!(widths.iter().all(|w| *w == widths[0]));
}

#[test]
fn config_loads_connection_and_widget_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cypher-repl.toml");
    fs::write(
        &path,
        r#"
        [connection]
        uri = "bolt://localhost:7687"
        username = "neo"
        password = "secret"
        database = "movies"

        [widget]
        out = "graph.html"
        "#,
    )
    .unwrap();

    let cfg = config::load_config_at(&path).unwrap();
    let conn = cfg.connection.unwrap();
    assert_eq!(conn.uri.as_deref(), Some("bolt://localhost:7687"));
    assert_eq!(conn.username.as_deref(), Some("neo"));
    assert_eq!(conn.database.as_deref(), Some("movies"));
    assert_eq!(cfg.widget.unwrap().out.as_deref(), Some("graph.html"));
}

#[test]
fn config_sections_are_optional() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cypher-repl.toml");
    fs::write(&path, "[connection]\n").unwrap();

    let cfg = config::load_config_at(&path).unwrap();
    let conn = cfg.connection.unwrap();
    assert_eq!(conn.uri, None);
    assert!(cfg.widget.is_none());
}

#[test]
fn load_config_near_finds_the_conventional_filename() {
    let dir = tempdir().unwrap();
    assert!(config::load_config_near(dir.path()).is_none());

    fs::write(dir.path().join("cypher-repl.toml"), "[connection]\n").unwrap();
    assert!(config::load_config_near(dir.path()).is_some());

    assert!(config::load_config_near(Path::new("/definitely/not/here")).is_none());
}

#[test]
fn malformed_config_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cypher-repl.toml");
    fs::write(&path, "not toml at all [").unwrap();
    assert!(config::load_config_at(&path).is_none());
}
