//! Content store - slug enumeration and raw file access

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Failures in the content layer.
///
/// These never escape to the presentation layer: the repository logs them
/// and drops the affected post.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no post file for slug `{0}`")]
    NotFound(String),

    #[error("invalid front-matter: {0}")]
    Frontmatter(String),
}

/// Reads post files from a single content directory.
///
/// The filename minus its `.md` extension is the post's slug. The store owns
/// no state beyond the directory path; every call goes to the filesystem.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Slugs for every markdown file in the content directory, in directory
    /// enumeration order. A missing or unreadable directory degrades to an
    /// empty list.
    pub fn list_slugs(&self) -> Vec<String> {
        if !self.dir.is_dir() {
            tracing::warn!("content directory {:?} is not readable", self.dir);
            return Vec::new();
        }

        let mut slugs = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    slugs.push(stem.to_string());
                }
            }
        }
        slugs
    }

    /// Raw file text for a slug. An absent or unreadable file is `NotFound`.
    pub async fn load_raw(&self, slug: &str) -> Result<String, ContentError> {
        let path = self.path_for(slug);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| ContentError::NotFound(slug.to_string()))
    }

    /// Backing file path for a slug.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_yields_no_slugs() {
        let store = ContentStore::new("/nonexistent/content/blog");
        assert!(store.list_slugs().is_empty());
    }

    #[test]
    fn test_list_slugs_ignores_non_markdown() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first-post.md"), "hello").unwrap();
        fs::write(dir.path().join("second-post.md"), "world").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let store = ContentStore::new(dir.path());
        let mut slugs = store.list_slugs();
        slugs.sort();
        assert_eq!(slugs, vec!["first-post", "second-post"]);
    }

    #[tokio::test]
    async fn test_load_raw_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path());
        let err = store.load_raw("nope").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_raw_returns_file_text() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("post.md"), "raw text").unwrap();
        let store = ContentStore::new(dir.path());
        assert_eq!(store.load_raw("post").await.unwrap(), "raw text");
    }
}
