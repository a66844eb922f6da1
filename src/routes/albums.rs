//! `/api/v1/albums` handlers.
//!
//! Routes with an `{album_id}` segment first pass through [`resolve_album`], which loads
//! the album into the request extensions. The verb handlers then work on that value and
//! never look the album up again.

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::StatusCode,
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use serde_json::{Map, Value};

use crate::{
    error::AppResult,
    schema::{Album, AlbumFields},
    state::AppState,
};

pub const PREFIX: &str = "/api/v1/albums";

type Body = Result<Json<Map<String, Value>>, JsonRejection>;

pub fn mount(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    // collection is reachable with and without a trailing slash
    router
        .route(PREFIX, get(list_albums).post(create_album))
        .route(&format!("{}/", PREFIX), get(list_albums).post(create_album))
        .route(
            &format!("{}/{{album_id}}", PREFIX),
            get(read_album)
                .put(update_album)
                .delete(remove_album)
                .route_layer(from_fn_with_state(state.clone(), resolve_album)),
        )
}

/// Param resolver for `{album_id}`. An unknown id short-circuits with `UnknownEntityError`.
pub async fn resolve_album(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let album = state.store.find_by_id(&album_id).await?;
    req.extensions_mut().insert(album);
    Ok(next.run(req).await)
}

pub async fn list_albums(State(state): State<AppState>) -> AppResult<Json<Vec<Album>>> {
    Ok(Json(state.store.list().await?))
}

pub async fn create_album(State(state): State<AppState>, body: Body) -> AppResult<Json<Album>> {
    let Json(body) = body?;
    let album = state.store.create(AlbumFields::from(body)).await?;
    state.metrics.inc_albums_created();
    tracing::info!(id = %album.id(), "album created");
    Ok(Json(album))
}

pub async fn read_album(Extension(album): Extension<Album>) -> Json<Album> {
    Json(album)
}

pub async fn update_album(
    State(state): State<AppState>,
    Extension(album): Extension<Album>,
    body: Body,
) -> AppResult<Json<Album>> {
    let Json(body) = body?;
    let updated = state.store.update(&album, AlbumFields::from(body)).await?;
    state.metrics.inc_albums_updated();
    tracing::info!(id = %updated.id(), revision = updated.revision, "album updated");
    Ok(Json(updated))
}

pub async fn remove_album(
    State(state): State<AppState>,
    Extension(album): Extension<Album>,
) -> AppResult<StatusCode> {
    state.store.remove(&album).await?;
    state.metrics.inc_albums_removed();
    tracing::info!(id = %album.id(), "album removed");
    Ok(StatusCode::NO_CONTENT)
}
