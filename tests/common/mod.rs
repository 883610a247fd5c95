#![allow(dead_code)]

use blog_site::config::Config;
use blog_site::db;
use blog_site::state::{AppState, DbPool};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::params;
use tempfile::TempDir;

/// Migrated database in a temporary directory plus seeding helpers.
pub struct TestSite {
    pub dir: TempDir,
    pub pool: DbPool,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let pool = db::create_pool(&dir.path().join("blog.db")).expect("create test database");
        db::run_migrations(&pool).expect("run migrations");
        Self { dir, pool }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.database.path = Some(self.dir.path().join("blog.db"));
        config.media.path = Some(self.dir.path().join("media"));
        config
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.pool.clone(), self.config())
    }

    pub fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::hours(hours)
    }

    pub fn user(&self, name: &str) -> i64 {
        let conn = self.pool.get().unwrap();
        conn.execute("INSERT INTO users (username) VALUES (?1)", params![name])
            .unwrap();
        conn.last_insert_rowid()
    }

    pub fn post(&self, slug: &str, text: &str, author: i64, hours: i64) -> i64 {
        let conn = self.pool.get().unwrap();
        conn.execute(
            "INSERT INTO posts (title, text, slug, author_id, published_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![format!("Title {slug}"), text, slug, author, Self::at(hours)],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    pub fn set_image(&self, post: i64, image: &str) {
        let conn = self.pool.get().unwrap();
        conn.execute(
            "UPDATE posts SET image = ?1 WHERE id = ?2",
            params![image, post],
        )
        .unwrap();
    }

    pub fn tag(&self, title: &str, posts: &[i64]) -> i64 {
        let conn = self.pool.get().unwrap();
        conn.execute("INSERT INTO tags (title) VALUES (?1)", params![title])
            .unwrap();
        let tag = conn.last_insert_rowid();
        for post in posts {
            conn.execute(
                "INSERT INTO post_tags (post_id, tag_id) VALUES (?1, ?2)",
                params![post, tag],
            )
            .unwrap();
        }
        tag
    }

    pub fn comment(&self, post: i64, author: i64, text: &str, hours: i64) {
        let conn = self.pool.get().unwrap();
        conn.execute(
            "INSERT INTO comments (post_id, author_id, text, published_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![post, author, text, Self::at(hours)],
        )
        .unwrap();
    }

    pub fn like(&self, post: i64, user: i64) {
        let conn = self.pool.get().unwrap();
        conn.execute(
            "INSERT INTO post_likes (post_id, user_id) VALUES (?1, ?2)",
            params![post, user],
        )
        .unwrap();
    }

    /// "hello-world" with two comments, one like and tags news + python,
    /// where python is also on two other posts.
    pub fn hello_world(&self) -> i64 {
        let alice = self.user("alice");
        let bob = self.user("bob");
        let hello = self.post("hello-world", "Hello, world!", alice, 10);
        let second = self.post("second", "Second post", bob, 5);
        let third = self.post("third", "Third post", bob, 1);
        self.tag("news", &[hello]);
        self.tag("python", &[hello, second, third]);
        self.comment(hello, bob, "Great post", 11);
        self.comment(hello, alice, "Thanks!", 12);
        self.like(hello, bob);
        hello
    }
}
