use cypher_repl::command::{resolve, tokenize, Namespace};
use proptest::prelude::*;

// Property-based tests: the mini-language resolver must be robust on
// arbitrary input lines.
proptest! {
    // Tokenizing and resolving must never panic, whatever the line looks like
    #[test]
    fn resolve_never_panics_on_arbitrary_input(line in ".*") {
        let vars = Namespace::new();
        let _ = resolve(&line, &vars);
    }

    // Tokens never contain unquoted whitespace
    #[test]
    fn tokens_are_whitespace_free_or_quoted(line in ".*") {
        for token in tokenize(&line) {
            prop_assert!(
                token.starts_with('"') || !token.contains(char::is_whitespace),
                "token {token:?} carries unquoted whitespace"
            );
        }
    }

    // A line with no recognized flags never produces a query or a URI
    #[test]
    fn flagless_lines_resolve_to_empty_commands(line in "[a-zA-Z() ]*") {
        let vars = Namespace::new();
        let cmd = resolve(&line, &vars);
        prop_assert_eq!(cmd.query, None);
        prop_assert_eq!(cmd.uri, None);
        prop_assert!(!cmd.list);
    }
}
