//! Chore queries.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgConnection;

/// A chore as stored: who does what, and when.
///
/// The table declares no `NOT NULL` constraints, so every column may come
/// back empty; a NULL serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chore {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub description: Option<String>,
}

type ChoreRow = (Option<NaiveDate>, Option<String>, Option<String>);

fn rows_to_chores(rows: Vec<ChoreRow>) -> Vec<Chore> {
    rows.into_iter()
        .map(|(date, name, description)| Chore {
            date,
            name,
            description,
        })
        .collect()
}

/// Every chore, ascending by date.
pub(super) async fn fetch_all(conn: &mut PgConnection) -> Result<Vec<Chore>, sqlx::Error> {
    let rows: Vec<ChoreRow> = sqlx::query_as(
        r#"
        SELECT date, name, description
        FROM chores
        ORDER BY date ASC
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(rows_to_chores(rows))
}

/// Chores for one assignee, ascending by date. Exact match under the
/// column's collation.
pub(super) async fn fetch_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Vec<Chore>, sqlx::Error> {
    let rows: Vec<ChoreRow> = sqlx::query_as(
        r#"
        SELECT date, name, description
        FROM chores
        WHERE name = $1
        ORDER BY date ASC
        "#,
    )
    .bind(name)
    .fetch_all(conn)
    .await?;

    Ok(rows_to_chores(rows))
}

/// Description of the first chore matching `name` on `date`.
///
/// The outer `Option` is "row matched", the inner one a NULL description.
/// `date` is bound as text and cast by the server, so the accepted formats
/// are whatever PostgreSQL's `date` input accepts under its `DateStyle`.
pub(super) async fn fetch_description(
    conn: &mut PgConnection,
    name: &str,
    date: &str,
) -> Result<Option<Option<String>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<String>>(
        r#"
        SELECT description
        FROM chores
        WHERE name = $1 AND "date" = $2::date
        "#,
    )
    .bind(name)
    .bind(date)
    .fetch_optional(conn)
    .await
}
