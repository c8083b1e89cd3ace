use std::path::Path;

use anyhow::Result;

use mars_core::router::normalize_link;
use mars_core::AppConfig;

pub async fn run(config: &AppConfig, content: &Path) -> Result<()> {
    let store = super::load_store(content)?;
    let deck = store.deck(&config.site.deck);

    if config.site.deck.is_empty() {
        println!("Deck: every post, in content order");
    } else {
        for link in &config.site.deck {
            let link = normalize_link(link);
            if !deck.contains(&link) {
                println!("Skipping {}: no such post", link);
            }
        }
    }

    if deck.is_empty() {
        println!("The deck is empty.");
        return Ok(());
    }

    for (i, link) in deck.iter().enumerate() {
        println!("{:>3}. {}", i + 1, link);
    }
    Ok(())
}
