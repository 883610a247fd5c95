// Repository pattern - every query the content pages need lives here
use std::collections::HashMap;

use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Row};
use thiserror::Error;

use crate::blog::ranking::{PostRanking, FRESH_ORDER, TAG_POPULARITY_ORDER};
use crate::db::models::{Comment, Post, Tag, TagWithCount};
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Read-only access to posts, tags and comments.
///
/// Post listings come back with author, comment count and like count already
/// annotated. Tags are never loaded per post: callers collect the ids of a
/// listing and fetch all of their tags with [`BlogRepository::tags_for_posts`].
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Posts ordered by the given popularity rule
    async fn ranked_posts(
        &self,
        ranking: PostRanking,
        limit: usize,
    ) -> Result<Vec<Post>, RepositoryError>;

    /// Newest posts first
    async fn fresh_posts(&self, limit: usize) -> Result<Vec<Post>, RepositoryError>;

    /// Newest posts carrying the tag
    async fn posts_with_tag(
        &self,
        tag_id: i64,
        limit: usize,
    ) -> Result<Vec<Post>, RepositoryError>;

    /// Tags of every listed post, each annotated with its post count.
    /// Posts without tags are absent from the map.
    async fn tags_for_posts(
        &self,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<TagWithCount>>, RepositoryError>;

    /// Tags carried by the most posts
    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagWithCount>, RepositoryError>;

    /// Exact, case-sensitive title lookup
    async fn find_tag(&self, title: &str) -> Result<Option<Tag>, RepositoryError>;

    /// At most `limit` posts with this slug
    async fn find_posts_by_slug(
        &self,
        slug: &str,
        limit: usize,
    ) -> Result<Vec<Post>, RepositoryError>;

    /// Comments on a post, oldest first
    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepositoryError>;
}

const POST_SELECT: &str = "SELECT p.id, p.title, p.text, p.slug, p.image, p.published_at, u.username,
        (SELECT COUNT(DISTINCT c.id) FROM comments c WHERE c.post_id = p.id) AS comments_count,
        (SELECT COUNT(DISTINCT l.user_id) FROM post_likes l WHERE l.post_id = p.id) AS likes_count
     FROM posts p
     JOIN users u ON u.id = p.author_id";

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        slug: row.get(3)?,
        image: row.get(4)?,
        published_at: row.get(5)?,
        author: row.get(6)?,
        comments_count: row.get(7)?,
        likes_count: row.get(8)?,
    })
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// SQLite implementation
pub struct SqliteBlogRepository {
    pool: DbPool,
}

impl SqliteBlogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn query_posts(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Post>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let posts = stmt
            .query_map(params, post_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn ranked_posts(
        &self,
        ranking: PostRanking,
        limit: usize,
    ) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!("{POST_SELECT} ORDER BY {} LIMIT ?1", ranking.order_by());
        self.query_posts(&sql, params![sql_limit(limit)])
    }

    async fn fresh_posts(&self, limit: usize) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!("{POST_SELECT} ORDER BY {FRESH_ORDER} LIMIT ?1");
        self.query_posts(&sql, params![sql_limit(limit)])
    }

    async fn posts_with_tag(
        &self,
        tag_id: i64,
        limit: usize,
    ) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!(
            "{POST_SELECT}
             JOIN post_tags pt ON pt.post_id = p.id
             WHERE pt.tag_id = ?1
             ORDER BY {FRESH_ORDER} LIMIT ?2"
        );
        self.query_posts(&sql, params![tag_id, sql_limit(limit)])
    }

    async fn tags_for_posts(
        &self,
        post_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<TagWithCount>>, RepositoryError> {
        let mut tags: HashMap<i64, Vec<TagWithCount>> = HashMap::new();
        if post_ids.is_empty() {
            return Ok(tags);
        }

        let placeholders = vec!["?"; post_ids.len()].join(", ");
        let sql = format!(
            "SELECT pt.post_id, t.id, t.title, counts.posts_count
             FROM post_tags pt
             JOIN tags t ON t.id = pt.tag_id
             JOIN (SELECT tag_id, COUNT(*) AS posts_count FROM post_tags GROUP BY tag_id) counts
               ON counts.tag_id = t.id
             WHERE pt.post_id IN ({placeholders})
             ORDER BY pt.post_id, t.title"
        );

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(post_ids.iter()), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                TagWithCount {
                    id: row.get(1)?,
                    title: row.get(2)?,
                    posts_count: row.get(3)?,
                },
            ))
        })?;

        for row in rows {
            let (post_id, tag) = row?;
            tags.entry(post_id).or_default().push(tag);
        }

        Ok(tags)
    }

    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagWithCount>, RepositoryError> {
        let conn = self.pool.get()?;
        let sql = format!(
            "SELECT t.id, t.title, COUNT(pt.post_id) AS posts_count
             FROM tags t
             LEFT JOIN post_tags pt ON pt.tag_id = t.id
             GROUP BY t.id, t.title
             ORDER BY {TAG_POPULARITY_ORDER}
             LIMIT ?1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let tags = stmt
            .query_map(params![sql_limit(limit)], |row| {
                Ok(TagWithCount {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    posts_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    async fn find_tag(&self, title: &str) -> Result<Option<Tag>, RepositoryError> {
        let conn = self.pool.get()?;

        let result = conn.query_row(
            "SELECT id, title FROM tags WHERE title = ?1",
            params![title],
            |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    title: row.get(1)?,
                })
            },
        );

        match result {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_posts_by_slug(
        &self,
        slug: &str,
        limit: usize,
    ) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!("{POST_SELECT} WHERE p.slug = ?1 ORDER BY p.id LIMIT ?2");
        self.query_posts(&sql, params![slug, sql_limit(limit)])
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT c.id, c.post_id, c.text, c.published_at, u.username
             FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.post_id = ?1
             ORDER BY c.published_at, c.id",
        )?;
        let comments = stmt
            .query_map(params![post_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    post_id: row.get(1)?,
                    text: row.get(2)?,
                    published_at: row.get(3)?,
                    author: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }
}
