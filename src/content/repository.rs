//! Post repository - aggregate views over the content directory
//!
//! Every view re-reads the filesystem; there is no cache to invalidate.
//! Loads fan out one task per slug and join before sorting, so listing cost
//! is bounded by the slowest single file read.

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::{markdown, ContentError, ContentStore, FrontMatter, MarkdownRenderer, Post, PostMetadata};
use crate::helpers::date::parse_date;

#[derive(Clone)]
pub struct PostRepository {
    store: ContentStore,
    renderer: Arc<MarkdownRenderer>,
    words_per_minute: usize,
}

impl PostRepository {
    pub fn new(store: ContentStore, words_per_minute: usize) -> Self {
        Self {
            store,
            renderer: Arc::new(MarkdownRenderer::new()),
            words_per_minute,
        }
    }

    /// Load and render a single post.
    ///
    /// Any failure is logged and maps to `None`; callers treat the post as
    /// nonexistent.
    pub async fn get_post(&self, slug: &str) -> Option<Post> {
        match self.load_post(slug).await {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("failed to load post `{}`: {}", slug, e);
                None
            }
        }
    }

    async fn load_post(&self, slug: &str) -> Result<Post, ContentError> {
        let raw = self.store.load_raw(slug).await?;
        let (fm, body) = FrontMatter::parse(&raw)?;
        let reading_time = markdown::reading_time(body, self.words_per_minute);
        let content = self.renderer.render(body);

        Ok(Post {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            excerpt: fm.excerpt.unwrap_or_default(),
            content,
            tags: fm.tags,
            featured: fm.featured,
            image: fm.image,
            reading_time,
        })
    }

    /// All posts, newest first.
    ///
    /// Slugs load concurrently; failed loads are dropped. The sort is stable,
    /// so posts with equal dates keep directory enumeration order.
    pub async fn get_all(&self) -> Vec<Post> {
        let mut set = JoinSet::new();
        for (index, slug) in self.store.list_slugs().into_iter().enumerate() {
            let repo = self.clone();
            set.spawn(async move { (index, repo.get_post(&slug).await) });
        }

        let mut loaded: Vec<(usize, Post)> = Vec::new();
        while let Some(joined) = set.join_next().await {
            if let Ok((index, Some(post))) = joined {
                loaded.push((index, post));
            }
        }

        loaded.sort_by_key(|(index, _)| *index);
        let mut posts: Vec<Post> = loaded.into_iter().map(|(_, post)| post).collect();
        posts.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)));
        posts
    }

    /// All posts as metadata, newest first. Default representation for
    /// listings and search.
    pub async fn get_all_metadata(&self) -> Vec<PostMetadata> {
        self.get_all()
            .await
            .into_iter()
            .map(Post::into_metadata)
            .collect()
    }

    /// Posts flagged as featured.
    pub async fn get_featured(&self) -> Vec<PostMetadata> {
        self.get_all_metadata()
            .await
            .into_iter()
            .filter(|post| post.featured)
            .collect()
    }

    /// Posts carrying the given tag (case-insensitive, exact membership).
    pub async fn get_by_tag(&self, tag: &str) -> Vec<PostMetadata> {
        self.get_all_metadata()
            .await
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect()
    }

    /// Distinct tags across all posts.
    ///
    /// Deduplicated case-insensitively; the first-seen casing wins and
    /// first-seen order is kept.
    pub async fn get_all_tags(&self) -> Vec<String> {
        let mut tags: IndexMap<String, String> = IndexMap::new();
        for post in self.get_all_metadata().await {
            for tag in post.tags {
                tags.entry(tag.to_lowercase()).or_insert(tag);
            }
        }
        tags.into_values().collect()
    }
}
