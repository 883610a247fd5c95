use chrono::{DateTime, Utc};

/// A post joined with its author and annotated with aggregate counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author: String,
    pub comments_count: i64,
    pub likes_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub title: String,
}

/// A tag annotated with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWithCount {
    pub id: i64,
    pub title: String,
    pub posts_count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}
