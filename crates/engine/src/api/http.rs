//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use catalog_domain::{Content, ContentFilter, ContentId, ContentPatch};

use crate::app::App;
use crate::use_cases::ContentError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/v1/content",
            get(list_contents).post(create_content),
        )
        .route(
            "/api/v1/content/{id}",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .route(
            "/api/v1/content/{id}/genre",
            post(add_genres).delete(remove_genres),
        )
        .route("/api/v2/content", get(search_contents))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Content (v1)
// =============================================================================

async fn list_contents(State(app): State<Arc<App>>) -> Result<Json<Vec<Content>>, ApiError> {
    let contents = app
        .use_cases
        .content
        .crud
        .list(&ContentFilter::default())
        .await?;
    non_empty(contents)
}

async fn get_content(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Content>, ApiError> {
    let content = app
        .use_cases
        .content
        .crud
        .get(ContentId::from_uuid(id))
        .await?;
    Ok(Json(content))
}

async fn create_content(
    State(app): State<Arc<App>>,
    Json(input): Json<ContentPatch>,
) -> Result<Json<Content>, ApiError> {
    let created = app.use_cases.content.crud.create(&input).await?;
    Ok(Json(created))
}

async fn update_content(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ContentPatch>,
) -> Result<Json<Content>, ApiError> {
    let updated = app
        .use_cases
        .content
        .crud
        .update(ContentId::from_uuid(id), &patch)
        .await?;
    Ok(Json(updated))
}

async fn delete_content(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContentId>, ApiError> {
    let deleted = app
        .use_cases
        .content
        .crud
        .delete(ContentId::from_uuid(id))
        .await?;
    Ok(Json(deleted))
}

async fn add_genres(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(genres): Json<Option<Vec<String>>>,
) -> Result<Json<Content>, ApiError> {
    let updated = app
        .use_cases
        .content
        .add_genres
        .execute(ContentId::from_uuid(id), genres)
        .await?;
    Ok(Json(updated))
}

async fn remove_genres(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(genres): Json<Option<Vec<String>>>,
) -> Result<Json<Content>, ApiError> {
    let updated = app
        .use_cases
        .content
        .remove_genres
        .execute(ContentId::from_uuid(id), genres)
        .await?;
    Ok(Json(updated))
}

// =============================================================================
// Content (v2)
// =============================================================================

async fn search_contents(
    State(app): State<Arc<App>>,
    Query(filter): Query<ContentFilter>,
) -> Result<Json<Vec<Content>>, ApiError> {
    let contents = app.use_cases.content.crud.list(&filter).await?;
    non_empty(contents)
}

fn non_empty(contents: Vec<Content>) -> Result<Json<Vec<Content>>, ApiError> {
    if contents.is_empty() {
        tracing::info!("No contents found");
        return Err(ApiError::NotFound);
    }
    Ok(Json(contents))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Unavailable,
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Not found").into_response()
            }
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Unavailable => (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "Shutting down",
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound(id) => {
                tracing::info!(content_id = %id, "Content not found");
                ApiError::NotFound
            }
            ContentError::Validation(e) => ApiError::BadRequest(e.to_string()),
            ContentError::GenreEdit(e) => ApiError::BadRequest(e.to_string()),
            ContentError::Cancelled => ApiError::Unavailable,
            ContentError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}
