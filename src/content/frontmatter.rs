//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::ContentError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata block at the top of a post file.
///
/// Every field is optional; missing fields take the documented defaults when
/// the post is assembled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: Option<String>,

    /// Additional custom fields, tolerated and ignored
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a raw post file into front-matter and markdown body.
    ///
    /// The front-matter is a leading YAML block fenced by `---` lines. A file
    /// without one parses as default front-matter with the whole text as
    /// body; a fenced block that is not valid YAML is a parse failure and the
    /// post is dropped by the caller.
    pub fn parse(text: &str) -> Result<(Self, &str), ContentError> {
        let text = text.trim_start();
        let Some(rest) = text.strip_prefix("---") else {
            return Ok((FrontMatter::default(), text));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end) = rest.find("\n---") else {
            // No closing fence; the whole file is body.
            return Ok((FrontMatter::default(), text));
        };

        let block = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        if block.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(block)
            .map_err(|e| ContentError::Frontmatter(e.to_string()))?;
        Ok((fm, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_frontmatter() {
        let raw = r#"---
title: Getting Started with React
date: 2024-01-15
excerpt: A gentle introduction
tags:
  - React
  - JavaScript
featured: true
image: /images/react.png
---

Body starts here.
"#;

        let (fm, body) = FrontMatter::parse(raw).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Getting Started with React"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.excerpt.as_deref(), Some("A gentle introduction"));
        assert_eq!(fm.tags, vec!["React", "JavaScript"]);
        assert!(fm.featured);
        assert_eq!(fm.image.as_deref(), Some("/images/react.png"));
        assert_eq!(body, "Body starts here.\n");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let raw = "---\ntitle: One Tag\ntags: Notes\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(raw).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let raw = "---\ntitle: Sparse\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(raw).unwrap();
        assert_eq!(fm.date, None);
        assert_eq!(fm.excerpt, None);
        assert!(fm.tags.is_empty());
        assert!(!fm.featured);
        assert_eq!(fm.image, None);
    }

    #[test]
    fn test_no_frontmatter_block() {
        let raw = "Just a markdown body with no metadata.\n";
        let (fm, body) = FrontMatter::parse(raw).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, raw.trim_start());
    }

    #[test]
    fn test_unclosed_fence_is_all_body() {
        let raw = "---\ntitle: Oops\nno closing fence";
        let (fm, body) = FrontMatter::parse(raw).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let raw = "---\ntitle: [unterminated\n---\nBody.\n";
        let err = FrontMatter::parse(raw).unwrap_err();
        assert!(matches!(err, ContentError::Frontmatter(_)));
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let raw = "---\ntitle: Extra\nauthor: somebody\ndraft: true\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(raw).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Extra"));
        assert!(fm.extra.contains_key("author"));
    }
}
