//! Connection aliases, canonical URIs, and the process-wide cache.
//!
//! An alias names a cached configuration (colors, captions, layout,
//! database, canonical URI); a canonical URI (scheme + host + optional
//! port) keys at most one open driver handle. Handles are opened lazily on
//! first query and released only on explicit close or process end.

use serde::de::Error as _;
use serde_json::{Map, Value};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use url::Url;

use crate::command::CypherCommand;
use crate::driver::{Connect, GraphDriver};
use crate::errors::{ConsoleError, DriverError};
use crate::render;

/// Connection URI assumed when none has ever been supplied.
pub const DEFAULT_URI: &str = "bolt://localhost:7687";

/// Alias used when a command carries no `--alias`.
pub const DEFAULT_ALIAS: &str = "default";

/// The cache-relevant pieces of a connection URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriParts {
    /// scheme://host[:port], the driver-handle key. Absent when no URI was
    /// supplied or the string had no parseable scheme/host.
    pub canonical: Option<String>,
    /// Credentials embedded in the URI win over flag-supplied ones.
    pub auth: Option<(String, String)>,
    /// Database name taken from the URI path segment, if any.
    pub database: Option<String>,
}

/// Split a raw connection URI into its cache-relevant pieces, falling back
/// to flag-supplied credentials when the URI embeds none.
#[must_use]
pub fn split_uri(raw: Option<&str>, username: Option<&str>, password: Option<&str>) -> UriParts {
    let flag_auth = match (username, password) {
        (Some(u), Some(p)) => Some((u.to_string(), p.to_string())),
        _ => None,
    };

    let parsed = raw.and_then(|s| Url::parse(s).ok());
    let Some(url) = parsed else {
        return UriParts { canonical: None, auth: flag_auth, database: None };
    };

    let canonical = url.host_str().map(|host| match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    });

    let auth = match (url.username(), url.password()) {
        (user, Some(password)) if !user.is_empty() => {
            Some((user.to_string(), password.to_string()))
        }
        _ => flag_auth,
    };

    let database = match url.path().trim_start_matches('/') {
        "" => None,
        db => Some(db.to_string()),
    };

    UriParts { canonical, auth, database }
}

/// Per-alias display and connection configuration. Created with empty
/// mappings and the default layout on first use; fields are overlaid, never
/// replaced wholesale, on subsequent invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasConfig {
    pub colors: BTreeMap<String, String>,
    pub captions: BTreeMap<String, String>,
    pub layout: Map<String, Value>,
    pub database: Option<String>,
    pub uri: Option<String>,
    pub auth: Option<(String, String)>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            colors: BTreeMap::new(),
            captions: BTreeMap::new(),
            layout: render::default_layout(),
            database: None,
            uri: None,
            auth: None,
        }
    }
}

/// Parse a colors/captions/layout/params argument into a JSON object.
/// Structured values pass through; strings are parsed as JSON with single
/// quotes tolerated. Anything else is a malformed mapping.
pub fn parse_json_map(field: &'static str, value: &Value) -> Result<Map<String, Value>, ConsoleError> {
    let parsed = match value {
        Value::Object(map) => return Ok(map.clone()),
        Value::String(s) => {
            let normalized = s.replace('\'', "\"");
            serde_json::from_str::<Value>(&normalized)
                .map_err(|source| ConsoleError::Mapping { field, source })?
        }
        other => other.clone(),
    };
    match parsed {
        Value::Object(map) => Ok(map),
        _ => Err(ConsoleError::Mapping {
            field,
            source: serde_json::Error::custom("expected a JSON object"),
        }),
    }
}

fn string_map(map: &Map<String, Value>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, value)| {
            let s = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), s)
        })
        .collect()
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    NotDefined,
}

/// Process-wide state: one configuration per alias, at most one open driver
/// handle per canonical URI. Accessed without locks; the interactive
/// execution model guarantees mutual exclusion.
#[derive(Default)]
pub struct ConnectionCache {
    drivers: HashMap<String, Box<dyn GraphDriver>>,
    configs: HashMap<String, AliasConfig>,
}

impl ConnectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the alias has been configured with a connection URI before.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.configs.get(alias).is_some_and(|c| c.uri.is_some())
    }

    #[must_use]
    pub fn config(&self, alias: &str) -> Option<&AliasConfig> {
        self.configs.get(alias)
    }

    /// Overlay the fields present in `cmd` onto the alias configuration,
    /// creating the default configuration on first use, and return the
    /// effective configuration.
    ///
    /// An explicit `--database` always wins; a database named by the URI
    /// path fills the field only while nothing is cached yet. The canonical
    /// URI, when supplied, is stored under the alias for reuse.
    ///
    /// # Errors
    /// Propagates malformed colors/captions/layout mappings.
    pub fn resolve(
        &mut self,
        alias: &str,
        parts: &UriParts,
        cmd: &CypherCommand,
    ) -> Result<AliasConfig, ConsoleError> {
        let config = self.configs.entry(alias.to_string()).or_default();

        if let Some(colors) = &cmd.colors {
            config.colors = string_map(&parse_json_map("colors", colors)?);
        }
        if let Some(captions) = &cmd.captions {
            config.captions = string_map(&parse_json_map("captions", captions)?);
        }
        if let Some(layout) = &cmd.layout {
            config.layout = parse_json_map("layout", layout)?;
        }

        if let Some(database) = &cmd.database {
            config.database = Some(database.clone());
        } else if config.database.is_none() {
            config.database.clone_from(&parts.database);
        }

        if let Some(canonical) = &parts.canonical {
            config.uri = Some(canonical.clone());
        }
        if parts.auth.is_some() {
            config.auth.clone_from(&parts.auth);
        }

        Ok(config.clone())
    }

    /// Return the open driver for `uri`, connecting lazily on first use.
    ///
    /// # Errors
    /// Propagates connection failures from the connector.
    pub async fn driver_for(
        &mut self,
        uri: &str,
        auth: Option<(&str, &str)>,
        connector: &dyn Connect,
    ) -> Result<&dyn GraphDriver, DriverError> {
        let driver = match self.drivers.entry(uri.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let driver = connector.connect(uri, auth).await?;
                tracing::info!(uri, "opened driver connection");
                entry.insert(driver)
            }
        };
        Ok(&**driver)
    }

    /// Close the driver named by `identifier`, which may be a live URI key
    /// or a known alias. Unknown identifiers are reported, not fatal, and
    /// leave the cache untouched.
    ///
    /// # Errors
    /// Propagates failures from the driver's own close.
    pub async fn close(&mut self, identifier: &str) -> Result<CloseOutcome, DriverError> {
        let key = if self.drivers.contains_key(identifier) {
            Some(identifier.to_string())
        } else {
            self.configs.get(identifier).and_then(|c| c.uri.clone())
        };
        let Some(key) = key else {
            return Ok(CloseOutcome::NotDefined);
        };
        match self.drivers.remove(&key) {
            Some(driver) => {
                driver.close().await?;
                tracing::info!(uri = %key, "closed driver connection");
                Ok(CloseOutcome::Closed)
            }
            None => Ok(CloseOutcome::NotDefined),
        }
    }

    /// The set of open canonical URIs, sorted. Read-only.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.drivers.keys().cloned().collect();
        keys.sort();
        keys
    }
}
