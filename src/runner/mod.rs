//! Multi-statement execution.

use serde_json::{Map, Value};

use crate::driver::{GraphDriver, QueryResult};
use crate::errors::DriverError;

/// Split `query_text` on `;` and execute each non-empty statement in
/// sequence against `database`, returning only the result of the last one.
/// Earlier results are discarded (their server-side effects stand).
///
/// Parameters, when supplied, are applied identically to every statement in
/// the batch.
///
/// # Errors
/// Driver failures propagate from whichever statement raised them; earlier
/// statements in the batch have already run at that point.
pub async fn run(
    driver: &dyn GraphDriver,
    database: Option<&str>,
    query_text: &str,
    params: Option<&Map<String, Value>>,
) -> Result<Option<QueryResult>, DriverError> {
    let mut last = None;
    for statement in query_text.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        tracing::debug!(statement, "executing");
        last = Some(driver.run(database, statement, params).await?);
    }
    Ok(last)
}
