use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::db::models::{Post, TagWithCount};

/// Order used for "fresh" listings: newest first.
pub const FRESH_ORDER: &str = "p.published_at DESC, p.id DESC";

/// Order used for popular tags: most posts first, then alphabetical.
pub const TAG_POPULARITY_ORDER: &str = "posts_count DESC, t.title ASC";

/// How "popular" posts are ranked.
///
/// Every variant exists twice: as an SQL `ORDER BY` rule for the database
/// and as a comparator over already loaded posts. Both must agree, including
/// tie-breaks (newer post first, then higher id), so listings are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostRanking {
    /// Most liked first
    #[default]
    Likes,
    /// Most commented first
    Comments,
}

impl PostRanking {
    pub fn order_by(self) -> &'static str {
        match self {
            PostRanking::Likes => "likes_count DESC, p.published_at DESC, p.id DESC",
            PostRanking::Comments => "comments_count DESC, p.published_at DESC, p.id DESC",
        }
    }

    pub fn compare(self, a: &Post, b: &Post) -> Ordering {
        let score = |post: &Post| match self {
            PostRanking::Likes => post.likes_count,
            PostRanking::Comments => post.comments_count,
        };
        score(b).cmp(&score(a)).then_with(|| compare_fresh(a, b))
    }
}

pub fn compare_fresh(a: &Post, b: &Post) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| b.id.cmp(&a.id))
}

pub fn compare_tag_popularity(a: &TagWithCount, b: &TagWithCount) -> Ordering {
    b.posts_count
        .cmp(&a.posts_count)
        .then_with(|| a.title.cmp(&b.title))
}
