use askama::Template;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::blog::views::{PostDetailPage, TagPage};
use crate::error::AppResult;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/post_details.html")]
pub struct PostDetailTemplate {
    pub page: PostDetailPage,
}

#[derive(Template)]
#[template(path = "pages/posts_list.html")]
pub struct PostsListTemplate {
    pub page: TagPage,
}

/// Single post with comments, likes and tags
pub async fn post_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let page = state.content.post_detail(&slug).await?;
    Ok(Html(PostDetailTemplate { page }))
}

/// Newest posts carrying a tag
pub async fn tag_filter(
    State(state): State<AppState>,
    Path(tag_title): Path<String>,
) -> AppResult<impl IntoResponse> {
    let page = state.content.tag_page(&tag_title).await?;
    Ok(Html(PostsListTemplate { page }))
}
