pub mod table {
    // Helper to render a separator line
    fn sep(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    // Helper to render a row line
    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut s = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            let w = widths[i];
            let len = cell.chars().count();
            s.push(' ');
            s.push_str(cell);
            if len < w {
                s.push_str(&" ".repeat(w - len));
            }
            s.push(' ');
            s.push('|');
        }
        s
    }

    /// Render a simple ASCII table given headers and rows.
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let cols = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (c, w) in widths.iter_mut().enumerate().take(cols) {
                *w = (*w).max(row.get(c).map_or(0, |cell| cell.chars().count()));
            }
        }

        let mut out = String::new();
        out.push_str(&sep(&widths));
        out.push('\n');
        let header_cells: Vec<String> = headers.iter().map(|s| (*s).to_string()).collect();
        out.push_str(&line(&header_cells, &widths));
        out.push('\n');
        out.push_str(&sep(&widths));
        out.push('\n');
        for row in rows {
            let mut cells = Vec::with_capacity(cols);
            for i in 0..cols {
                cells.push(row.get(i).cloned().unwrap_or_default());
            }
            out.push_str(&line(&cells, &widths));
            out.push('\n');
        }
        out.push_str(&sep(&widths));
        out
    }
}

pub mod config {
    use serde::Deserialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Startup defaults for the `default` alias.
    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct ConnectionConfig {
        pub uri: Option<String>,
        pub username: Option<String>,
        pub password: Option<String>,
        pub database: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct WidgetConfig {
        /// Output file for rendered graph widgets.
        pub out: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub connection: Option<ConnectionConfig>,
        pub widget: Option<WidgetConfig>,
    }

    fn default_config_path(root: &Path) -> PathBuf {
        root.join("cypher-repl.toml")
    }

    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = fs::read_to_string(path).ok()?;
        toml::from_str::<Config>(&data).ok()
    }

    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Config> {
        let path = default_config_path(root);
        if path.exists() {
            load_config_at(&path)
        } else {
            None
        }
    }
}
