use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::blog::{ContentQueryService, MediaUrls, SqliteBlogRepository};
use crate::config::Config;

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub content: Arc<ContentQueryService>,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let repo = Arc::new(SqliteBlogRepository::new(db));
        let content = ContentQueryService::new(
            repo,
            config.blog.clone(),
            MediaUrls::new(config.media.url_prefix.clone()),
        );

        Self {
            config,
            content: Arc::new(content),
        }
    }
}
