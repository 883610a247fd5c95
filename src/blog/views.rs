//! Page contexts handed to the templates.
//!
//! Field names serialize in camelCase; templates and any JSON consumer rely
//! on them staying stable.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models::{Comment, Post, TagWithCount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub title: String,
    pub posts_with_tag: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: i64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagSummary>,
    /// `None` when the post carries no tags.
    pub first_tag_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<CommentView>,
    pub likes_amount: i64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub popular_posts: Vec<PostSummary>,
    pub fresh_posts: Vec<PostSummary>,
    pub popular_tags: Vec<TagSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailPage {
    pub post: PostDetail,
    pub popular_tags: Vec<TagSummary>,
    pub popular_posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPage {
    pub tag: String,
    pub popular_tags: Vec<TagSummary>,
    pub posts: Vec<PostSummary>,
    pub popular_posts: Vec<PostSummary>,
}

/// The contacts page has no data yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactsPage {}

/// Builds public URLs for stored image names.
#[derive(Debug, Clone)]
pub struct MediaUrls {
    prefix: String,
}

impl MediaUrls {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Empty image names count as no image.
    pub fn url(&self, image: Option<&str>) -> Option<String> {
        let name = image.filter(|name| !name.is_empty())?;
        Some(format!(
            "{}/{}",
            self.prefix.trim_end_matches('/'),
            name.trim_start_matches('/')
        ))
    }
}

/// First `length` characters of `text`. Counts chars, not bytes, and does
/// not look for word boundaries.
pub fn teaser(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

pub fn serialize_tag(tag: &TagWithCount) -> TagSummary {
    TagSummary {
        title: tag.title.clone(),
        posts_with_tag: tag.posts_count,
    }
}

pub fn serialize_post(
    post: &Post,
    tags: &[TagWithCount],
    teaser_length: usize,
    media: &MediaUrls,
) -> PostSummary {
    PostSummary {
        title: post.title.clone(),
        teaser_text: teaser(&post.text, teaser_length),
        author: post.author.clone(),
        comments_amount: post.comments_count,
        image_url: media.url(post.image.as_deref()),
        published_at: post.published_at,
        slug: post.slug.clone(),
        tags: tags.iter().map(serialize_tag).collect(),
        first_tag_title: tags.first().map(|tag| tag.title.clone()),
    }
}

pub fn serialize_comment(comment: &Comment) -> CommentView {
    CommentView {
        text: comment.text.clone(),
        published_at: comment.published_at,
        author: comment.author.clone(),
    }
}

pub fn serialize_post_detail(
    post: &Post,
    tags: &[TagWithCount],
    comments: &[Comment],
    media: &MediaUrls,
) -> PostDetail {
    PostDetail {
        title: post.title.clone(),
        text: post.text.clone(),
        author: post.author.clone(),
        comments: comments.iter().map(serialize_comment).collect(),
        likes_amount: post.likes_count,
        image_url: media.url(post.image.as_deref()),
        published_at: post.published_at,
        slug: post.slug.clone(),
        tags: tags.iter().map(serialize_tag).collect(),
    }
}
