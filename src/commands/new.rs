//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Scaffold a post file in the content directory.
///
/// The filename (and therefore the slug) is the slugified title. Refuses to
/// overwrite an existing post.
pub fn create_post(folio: &Folio, title: &str, tags: &[String], featured: bool) -> Result<()> {
    let now = chrono::Local::now();
    fs::create_dir_all(&folio.content_dir)?;

    let file_path = folio
        .content_dir
        .join(format!("{}.md", slug::slugify(title)));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let tags_yaml = if tags.is_empty() {
        "[]".to_string()
    } else {
        format!("[{}]", tags.join(", "))
    };

    let content = format!(
        "---\ntitle: {}\ndate: {}\nexcerpt: \"\"\ntags: {}\nfeatured: {}\n---\n\n",
        title,
        now.format("%Y-%m-%d"),
        tags_yaml,
        featured,
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
