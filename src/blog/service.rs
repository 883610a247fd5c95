use std::collections::HashMap;
use std::sync::Arc;

use crate::blog::repository::BlogRepository;
use crate::blog::views::{
    serialize_post, serialize_post_detail, serialize_tag, ContactsPage, HomePage, MediaUrls,
    PostDetailPage, PostSummary, TagPage, TagSummary,
};
use crate::config::BlogConfig;
use crate::db::models::{Comment, Post, TagWithCount};
use crate::error::{AppError, AppResult};

/// Builds the data for each content page.
///
/// Every page issues a fixed number of reads: the primary listing, one
/// batched tag load for all listed posts, and the sidebar queries. Nothing
/// is cached between requests.
pub struct ContentQueryService {
    repo: Arc<dyn BlogRepository>,
    settings: BlogConfig,
    media: MediaUrls,
}

impl ContentQueryService {
    pub fn new(repo: Arc<dyn BlogRepository>, settings: BlogConfig, media: MediaUrls) -> Self {
        Self {
            repo,
            settings,
            media,
        }
    }

    pub async fn home_page(&self) -> AppResult<HomePage> {
        let (popular_posts, fresh_posts, popular_tags) = tokio::try_join!(
            self.popular_posts(),
            self.fresh_posts(),
            self.popular_tags()
        )?;

        Ok(HomePage {
            popular_posts,
            fresh_posts,
            popular_tags,
        })
    }

    pub async fn post_detail(&self, slug: &str) -> AppResult<PostDetailPage> {
        let mut found = self.repo.find_posts_by_slug(slug, 2).await?;
        let post = match found.len() {
            0 => return Err(AppError::NotFound(format!("post with slug {slug:?}"))),
            1 => found.remove(0),
            _ => {
                return Err(AppError::MultipleResults(format!(
                    "post slug {slug:?} is not unique"
                )))
            }
        };

        let ids = [post.id];
        let (mut tags, comments, popular_tags, popular_posts) = tokio::try_join!(
            self.load_tags(&ids),
            self.comments(post.id),
            self.popular_tags(),
            self.popular_posts()
        )?;
        let tags = tags.remove(&post.id).unwrap_or_default();

        Ok(PostDetailPage {
            post: serialize_post_detail(&post, &tags, &comments, &self.media),
            popular_tags,
            popular_posts,
        })
    }

    pub async fn tag_page(&self, tag_title: &str) -> AppResult<TagPage> {
        let tag = self
            .repo
            .find_tag(tag_title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tag {tag_title:?}")))?;

        let (posts, popular_tags, popular_posts) = tokio::try_join!(
            self.tagged_posts(tag.id),
            self.popular_tags(),
            self.popular_posts()
        )?;

        Ok(TagPage {
            tag: tag.title,
            popular_tags,
            posts,
            popular_posts,
        })
    }

    pub fn contacts_page(&self) -> ContactsPage {
        ContactsPage::default()
    }

    async fn popular_posts(&self) -> AppResult<Vec<PostSummary>> {
        let posts = self
            .repo
            .ranked_posts(self.settings.post_ranking, self.settings.popular_posts)
            .await?;
        self.summarize(posts).await
    }

    async fn fresh_posts(&self) -> AppResult<Vec<PostSummary>> {
        let posts = self.repo.fresh_posts(self.settings.fresh_posts).await?;
        self.summarize(posts).await
    }

    async fn tagged_posts(&self, tag_id: i64) -> AppResult<Vec<PostSummary>> {
        let posts = self
            .repo
            .posts_with_tag(tag_id, self.settings.tag_page_posts)
            .await?;
        self.summarize(posts).await
    }

    async fn comments(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        Ok(self.repo.comments_for_post(post_id).await?)
    }

    async fn popular_tags(&self) -> AppResult<Vec<TagSummary>> {
        let tags = self.repo.popular_tags(self.settings.popular_tags).await?;
        Ok(tags.iter().map(serialize_tag).collect())
    }

    async fn load_tags(&self, post_ids: &[i64]) -> AppResult<HashMap<i64, Vec<TagWithCount>>> {
        Ok(self.repo.tags_for_posts(post_ids).await?)
    }

    /// Attaches tags to a listing with a single batched load.
    async fn summarize(&self, posts: Vec<Post>) -> AppResult<Vec<PostSummary>> {
        let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
        let tags = self.load_tags(&ids).await?;

        Ok(posts
            .iter()
            .map(|post| {
                let post_tags = tags.get(&post.id).map(Vec::as_slice).unwrap_or_default();
                serialize_post(post, post_tags, self.settings.teaser_length, &self.media)
            })
            .collect())
    }
}
