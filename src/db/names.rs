//! Name queries.

use serde::Serialize;
use sqlx::PgConnection;

/// A known person who may be assigned chores. NULL names are passed
/// through as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRecord {
    pub name: Option<String>,
}

/// Every row of the names table. No ordering is applied.
pub(super) async fn fetch_all(conn: &mut PgConnection) -> Result<Vec<NameRecord>, sqlx::Error> {
    let names: Vec<Option<String>> = sqlx::query_scalar("SELECT name FROM names")
        .fetch_all(conn)
        .await?;

    Ok(names.into_iter().map(|name| NameRecord { name }).collect())
}
