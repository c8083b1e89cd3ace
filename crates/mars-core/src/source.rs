//! Content lookup: link identifier to post or archive data.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::router::normalize_link;
use crate::{Error, Result};

/// A single post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub link: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// HTML body
    #[serde(default)]
    pub content: String,
}

impl Post {
    /// Render the HTML body as plain text wrapped to `width` columns
    pub fn body_text(&self, width: usize) -> String {
        html2text::from_read(self.content.as_bytes(), width.max(1))
            .unwrap_or_else(|_| self.content.clone())
    }
}

/// An ordered listing of posts (home page, category, tag)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    pub link: String,
    pub title: String,
    /// Post links in display order
    #[serde(default)]
    pub items: Vec<String>,
}

/// What a link resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    /// Data for this link has not arrived yet
    Fetching,
    /// Nothing lives at this link
    NotFound,
    Post(Post),
    Archive(Archive),
}

impl SourceData {
    pub fn is_post_type(&self) -> bool {
        matches!(self, Self::Post(_))
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive(_))
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching)
    }

    pub fn is_404(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Post payload, if this is a post
    pub fn post(&self) -> Option<&Post> {
        match self {
            Self::Post(post) => Some(post),
            _ => None,
        }
    }

    /// Archive payload, if this is an archive
    pub fn archive(&self) -> Option<&Archive> {
        match self {
            Self::Archive(archive) => Some(archive),
            _ => None,
        }
    }

    /// Human readable title for the document title
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Post(post) => Some(&post.title),
            Self::Archive(archive) => Some(&archive.title),
            Self::Fetching => Some("Loading"),
            Self::NotFound => Some("Page not found"),
        }
    }
}

/// Anything that can answer "what lives at this link"
pub trait ContentLookup {
    fn get(&self, link: &str) -> SourceData;
}

/// On-disk shape of a content file
#[derive(Debug, Default, Serialize, Deserialize)]
struct ContentFile {
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    archives: Vec<Archive>,
}

/// In-memory content lookup
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    posts: HashMap<String, Post>,
    /// Post links in content file order
    post_order: Vec<String>,
    archives: HashMap<String, Archive>,
    /// Answer `Fetching` for every link
    pending: bool,
}

impl ContentStore {
    /// A store whose data has not arrived yet
    pub fn pending() -> Self {
        Self {
            pending: true,
            ..Self::default()
        }
    }

    /// Build a store from posts and archives. Links are normalized.
    pub fn new(posts: Vec<Post>, archives: Vec<Archive>) -> Self {
        let mut store = Self::default();
        for mut post in posts {
            post.link = normalize_link(&post.link);
            if !store.posts.contains_key(&post.link) {
                store.post_order.push(post.link.clone());
            }
            store.posts.insert(post.link.clone(), post);
        }
        for mut archive in archives {
            archive.link = normalize_link(&archive.link);
            archive.items = archive.items.iter().map(|l| normalize_link(l)).collect();
            store.archives.insert(archive.link.clone(), archive);
        }
        store
    }

    /// Parse a JSON content file
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ContentFile = serde_json::from_str(json)?;
        if file.posts.iter().any(|p| p.link.trim().is_empty()) {
            return Err(Error::Content("post with an empty link".to_string()));
        }
        Ok(Self::new(file.posts, file.archives))
    }

    /// Read and parse a JSON content file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Post links in content file order
    pub fn post_links(&self) -> &[String] {
        &self.post_order
    }

    /// Iterate posts in content file order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.post_order.iter().filter_map(|link| self.posts.get(link))
    }

    pub fn post_count(&self) -> usize {
        self.post_order.len()
    }

    /// Resolve the deck: configured links (normalized, unknown posts dropped)
    /// or every post when none are configured
    pub fn deck(&self, configured: &[String]) -> Vec<String> {
        if configured.is_empty() {
            return self.post_links().to_vec();
        }
        configured
            .iter()
            .map(|link| normalize_link(link))
            .filter(|link| self.posts.contains_key(link))
            .collect()
    }

    fn home(&self) -> Archive {
        Archive {
            link: "/".to_string(),
            title: "Latest Posts".to_string(),
            items: self.post_order.clone(),
        }
    }
}

impl ContentLookup for ContentStore {
    fn get(&self, link: &str) -> SourceData {
        if self.pending {
            return SourceData::Fetching;
        }
        let link = normalize_link(link);
        if let Some(post) = self.posts.get(&link) {
            return SourceData::Post(post.clone());
        }
        if let Some(archive) = self.archives.get(&link) {
            return SourceData::Archive(archive.clone());
        }
        if link == "/" {
            return SourceData::Archive(self.home());
        }
        SourceData::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"{
        "posts": [
            { "link": "/p0/", "title": "Post Zero", "author": "Ann", "content": "<p>Hello <b>world</b></p>" },
            { "link": "p1", "title": "Post One", "date": "2020-03-01T10:00:00Z" },
            { "link": "/p2/", "title": "Post Two" }
        ],
        "archives": [
            { "link": "/category/nature/", "title": "Nature", "items": ["/p2", "p0"] }
        ]
    }"#;

    #[test]
    fn test_from_json_normalizes_links() {
        let store = ContentStore::from_json(CONTENT).unwrap();
        assert_eq!(store.post_links(), &["/p0/", "/p1/", "/p2/"]);
        assert!(store.get("/p1/").is_post_type());
        assert!(store.get("p1").is_post_type());
    }

    #[test]
    fn test_lookup_kinds() {
        let store = ContentStore::from_json(CONTENT).unwrap();
        let nature = store.get("/category/nature/");
        assert!(nature.is_archive());
        assert_eq!(nature.archive().unwrap().items, vec!["/p2/", "/p0/"]);
        assert!(store.get("/missing/").is_404());
    }

    #[test]
    fn test_home_archive_lists_all_posts() {
        let store = ContentStore::from_json(CONTENT).unwrap();
        let home = store.get("/");
        assert_eq!(home.archive().unwrap().items.len(), 3);
    }

    #[test]
    fn test_pending_store_is_fetching() {
        let store = ContentStore::pending();
        assert!(store.get("/p0/").is_fetching());
        assert!(store.get("/").is_fetching());
    }

    #[test]
    fn test_deck_resolution() {
        let store = ContentStore::from_json(CONTENT).unwrap();
        assert_eq!(store.deck(&[]), vec!["/p0/", "/p1/", "/p2/"]);
        let configured = vec!["p2".to_string(), "/nope/".to_string(), "/p0/".to_string()];
        assert_eq!(store.deck(&configured), vec!["/p2/", "/p0/"]);
    }

    #[test]
    fn test_body_text_strips_html() {
        let store = ContentStore::from_json(CONTENT).unwrap();
        let post = store.get("/p0/").post().cloned().unwrap();
        let text = post.body_text(40);
        assert!(text.contains("Hello"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_empty_link_rejected() {
        let err = ContentStore::from_json(r#"{ "posts": [{ "link": " ", "title": "x" }] }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Content(_)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(ContentStore::from_json("{"), Err(Error::Json(_))));
    }
}
