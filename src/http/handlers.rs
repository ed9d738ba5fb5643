//! Route handlers.
//!
//! Each handler makes exactly one store call and maps the rows straight
//! into the response. Ordering comes from the store and is never changed
//! here.

use super::AppState;
use super::extract::ApiPath;
use crate::db::{Chore, NameRecord};
use crate::error::{ApiError, ApiResult};
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Plain-text body of `GET /`.
pub const INDEX_TEXT: &str = r#"Add "/apidocs" to the URL to access the API documentation."#;

const NO_CHORES_FOUND: &str = "No chores found";
const NO_CHORE_FOUND: &str = "No chore found";

/// Response item for the name+date lookup. A matched row with a NULL
/// description renders as `null`, not as a 404.
#[derive(Debug, Serialize)]
pub struct ChoreDescription {
    pub description: Option<String>,
}

/// `GET /` - liveness check, no authentication.
pub async fn index() -> &'static str {
    INDEX_TEXT
}

/// `GET /chores`
pub async fn list_chores(State(state): State<AppState>) -> ApiResult<Json<Vec<Chore>>> {
    let chores = state.store.all_chores().await?;
    Ok(Json(chores))
}

/// `GET /chores/:name` - 404 when the assignee has no chores.
pub async fn list_chores_by_name(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<Json<Vec<Chore>>> {
    let chores = state.store.chores_for(&name).await?;
    if chores.is_empty() {
        return Err(ApiError::NotFound(NO_CHORES_FOUND));
    }
    Ok(Json(chores))
}

/// `GET /chores/:name/date/*date` - the date segment may contain slashes
/// and is passed to the store verbatim.
pub async fn get_chore_on_date(
    State(state): State<AppState>,
    ApiPath((name, date)): ApiPath<(String, String)>,
) -> ApiResult<Json<Vec<ChoreDescription>>> {
    match state.store.chore_on(&name, &date).await? {
        Some(description) => Ok(Json(vec![ChoreDescription { description }])),
        None => Err(ApiError::NotFound(NO_CHORE_FOUND)),
    }
}

/// `GET /names`
pub async fn list_names(State(state): State<AppState>) -> ApiResult<Json<Vec<NameRecord>>> {
    let names = state.store.names().await?;
    Ok(Json(names))
}
