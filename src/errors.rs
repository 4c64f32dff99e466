use thiserror::Error;

/// Failures raised by the underlying Bolt driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Connection failed for {uri}: {message}")]
    Connect { uri: String, message: String },

    #[error("Query failed: {0}")]
    Query(#[from] neo4rs::Error),
}

/// Failures raised while evaluating a console command.
///
/// Usage problems and unknown close targets are not errors: they are
/// reported back to the user as ordinary outcomes. Everything here is a
/// condition this layer cannot describe better than its source can.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Invalid {field} mapping: {source}")]
    Mapping {
        field: &'static str,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
