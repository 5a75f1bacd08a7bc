//! Search over the post corpus
//!
//! A full linear scan per query: simple search is an OR of case-insensitive
//! substring tests, advanced search ANDs independent structured filters on
//! top of it. No ranking, no index.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::content::{PostMetadata, PostRepository};
use crate::helpers::date::parse_date;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Remove `<...>` spans for plain-text matching. Not an HTML parser; entities
/// are left as-is.
fn strip_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").into_owned()
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid date bound `{0}`")]
    InvalidDateBound(String),
}

/// Structured criteria for advanced search. All fields optional and
/// independently combinable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchOptions {
    pub query: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Clone)]
pub struct SearchEngine {
    repo: PostRepository,
}

impl SearchEngine {
    pub fn new(repo: PostRepository) -> Self {
        Self { repo }
    }

    /// Free-text search across title, excerpt, tags and tag-stripped content.
    ///
    /// A blank query returns the whole corpus unchanged. A post matches when
    /// the term appears as a case-insensitive substring in any field.
    pub async fn search(&self, query: &str) -> Vec<PostMetadata> {
        let all = self.repo.get_all_metadata().await;
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return all;
        }

        let mut results = Vec::new();
        for post in all {
            if post.title.to_lowercase().contains(&term)
                || post.excerpt.to_lowercase().contains(&term)
                || post.tags.iter().any(|t| t.to_lowercase().contains(&term))
            {
                results.push(post);
                continue;
            }

            // The content test needs the rendered body; a post that fails to
            // load here counts as having no content, the metadata fields
            // above were already evaluated.
            let content = match self.repo.get_post(&post.slug).await {
                Some(full) => strip_tags(&full.content),
                None => String::new(),
            };
            if content.to_lowercase().contains(&term) {
                results.push(post);
            }
        }
        results
    }

    /// Filtered search. Provided criteria are ANDed; omitted criteria are
    /// no-ops. An unparseable date bound is rejected up front.
    pub async fn advanced_search(
        &self,
        options: &SearchOptions,
    ) -> Result<Vec<PostMetadata>, SearchError> {
        let date_from = parse_bound(options.date_from.as_deref())?;
        let date_to = parse_bound(options.date_to.as_deref())?;

        let mut results = match options.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => self.search(query).await,
            _ => self.repo.get_all_metadata().await,
        };

        if let Some(tags) = &options.tags {
            if !tags.is_empty() {
                let wanted: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
                results.retain(|post| {
                    post.tags.iter().any(|post_tag| {
                        let post_tag = post_tag.to_lowercase();
                        wanted.iter().any(|w| post_tag.contains(w.as_str()))
                    })
                });
            }
        }

        if let Some(featured) = options.featured {
            results.retain(|post| post.featured == featured);
        }

        if let Some(from) = date_from {
            results.retain(|post| parse_date(&post.date).is_some_and(|d| d >= from));
        }
        if let Some(to) = date_to {
            results.retain(|post| parse_date(&post.date).is_some_and(|d| d <= to));
        }

        Ok(results)
    }
}

fn parse_bound(bound: Option<&str>) -> Result<Option<NaiveDateTime>, SearchError> {
    match bound {
        None => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| SearchError::InvalidDateBound(s.to_string())),
    }
}
