use std::path::Path;

use anyhow::Result;

use mars_core::{AppConfig, ContentLookup};

pub async fn run(config: &AppConfig, content: &Path) -> Result<()> {
    let store = super::load_store(content)?;

    if store.post_count() == 0 {
        println!("No posts in {}", content.display());
        return Ok(());
    }

    let deck = store.deck(&config.site.deck);
    println!("Posts ({}):\n", store.post_count());

    for post in store.posts() {
        let marker = if deck.contains(&post.link) { "*" } else { " " };
        println!(" {} {} - {}", marker, post.link, post.title);

        let mut meta = Vec::new();
        if let Some(author) = &post.author {
            meta.push(format!("by {}", author));
        }
        if let Some(date) = post.date {
            meta.push(date.format("%Y-%m-%d").to_string());
        }
        if !meta.is_empty() {
            println!("     {}", meta.join(", "));
        }
    }

    for item in &config.site.menu {
        let data = store.get(&item.link);
        if data.is_404() {
            println!("\nWarning: menu entry '{}' ({}) has no content", item.label, item.link);
        }
    }

    println!("\n* = part of the swipe deck");
    Ok(())
}
