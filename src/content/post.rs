//! Post models

use serde::{Deserialize, Serialize};

/// A fully rendered blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, derived from the source filename
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as written in front-matter
    pub date: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Rendered HTML content
    pub content: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post is highlighted on the home page
    #[serde(default)]
    pub featured: bool,

    /// Cover image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Estimated reading time, e.g. "3 min read"
    #[serde(rename = "readingTime")]
    pub reading_time: String,
}

impl Post {
    /// Strip the rendered content, keeping everything listings need.
    pub fn into_metadata(self) -> PostMetadata {
        PostMetadata {
            slug: self.slug,
            title: self.title,
            date: self.date,
            excerpt: self.excerpt,
            tags: self.tags,
            featured: self.featured,
            image: self.image,
            reading_time: self.reading_time,
        }
    }
}

/// A post without its rendered content, used for listings and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "readingTime")]
    pub reading_time: String,
}

impl PostMetadata {
    /// Case-insensitive exact tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: "2024-01-15".to_string(),
            excerpt: "A greeting".to_string(),
            content: "<p>Hello</p>".to_string(),
            tags: vec!["Rust".to_string(), "Web".to_string()],
            featured: true,
            image: None,
            reading_time: "1 min read".to_string(),
        }
    }

    #[test]
    fn test_into_metadata_drops_content() {
        let meta = sample().into_metadata();
        assert_eq!(meta.slug, "hello");
        assert_eq!(meta.title, "Hello");
        assert!(meta.featured);
        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("content"));
        assert!(json.contains("readingTime"));
    }

    #[test]
    fn test_has_tag_is_case_insensitive() {
        let meta = sample().into_metadata();
        assert!(meta.has_tag("rust"));
        assert!(meta.has_tag("RUST"));
        assert!(!meta.has_tag("rus"));
    }
}
