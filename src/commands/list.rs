//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let repo = folio.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repo.get_all_metadata().await;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let marker = if post.featured { " [featured]" } else { "" };
                println!(
                    "  {} - {} ({}){}",
                    post.date, post.title, post.reading_time, marker
                );
            }
        }
        "tag" | "tags" => {
            let posts = repo.get_all_metadata().await;
            let mut counts: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
                }
            }

            let tags = repo.get_all_tags().await;
            println!("Tags ({}):", tags.len());
            for tag in tags {
                let count = counts.get(&tag.to_lowercase()).copied().unwrap_or(0);
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: posts, tags", content_type);
        }
    }

    Ok(())
}
