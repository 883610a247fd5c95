pub mod assets;
pub mod contacts;
pub mod home;
pub mod posts;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full site router
pub fn app(state: AppState) -> Router {
    let media = ServeDir::new(state.config.media_path());

    Router::new()
        .route("/", get(home::index))
        .route("/post/{slug}", get(posts::post_detail))
        .route("/tag/{tag_title}", get(posts::tag_filter))
        .route("/contacts", get(contacts::contacts))
        .route("/assets/{*path}", get(assets::serve))
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
