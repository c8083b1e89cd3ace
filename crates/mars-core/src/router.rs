//! Current location and navigation.
//!
//! The viewpager only needs [`Router::link`] and [`Router::navigate`]; the
//! history kept by [`MemoryRouter`] serves the back/forward keys of the host.

use tracing::debug;

/// The navigable location of the site
pub trait Router {
    /// Current link identifier
    fn link(&self) -> &str;

    /// Navigate to a link. Fire-and-forget: the new location is observed by
    /// the next [`Router::link`] read.
    fn navigate(&mut self, link: &str);
}

/// Normalize a link to the `/path/` form used as lookup key.
///
/// `"about-us"`, `"/about-us"` and `"/about-us/"` all become `"/about-us/"`;
/// the empty string becomes `"/"`.
pub fn normalize_link(link: &str) -> String {
    let trimmed = link.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// In-memory router with a browser-like history
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    /// Visited links, oldest first
    history: Vec<String>,
    /// Index of the current entry in `history`
    position: usize,
}

impl MemoryRouter {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![normalize_link(initial)],
            position: 0,
        }
    }

    /// Go back one entry. Returns whether the location changed.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.position -= 1;
            debug!("router back to {}", self.history[self.position]);
            true
        } else {
            false
        }
    }

    /// Go forward one entry. Returns whether the location changed.
    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.position += 1;
            debug!("router forward to {}", self.history[self.position]);
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.history.len()
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router for MemoryRouter {
    fn link(&self) -> &str {
        &self.history[self.position]
    }

    fn navigate(&mut self, link: &str) {
        let link = normalize_link(link);

        // Avoid recording consecutive duplicates
        if self.link() == link {
            return;
        }

        // Navigating from the middle of the history drops the forward entries
        self.history.truncate(self.position + 1);
        debug!("router navigate {} -> {}", self.link(), link);
        self.history.push(link);
        self.position = self.history.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_link() {
        assert_eq!(normalize_link(""), "/");
        assert_eq!(normalize_link("/"), "/");
        assert_eq!(normalize_link("about-us"), "/about-us/");
        assert_eq!(normalize_link("/about-us"), "/about-us/");
        assert_eq!(normalize_link("/category/nature/"), "/category/nature/");
    }

    #[test]
    fn test_navigate_and_history() {
        let mut router = MemoryRouter::new("/");
        router.navigate("/p0/");
        router.navigate("/p1");
        assert_eq!(router.link(), "/p1/");

        assert!(router.back());
        assert_eq!(router.link(), "/p0/");
        assert!(router.forward());
        assert_eq!(router.link(), "/p1/");
        assert!(!router.forward());
    }

    #[test]
    fn test_navigate_truncates_forward_history() {
        let mut router = MemoryRouter::new("/");
        router.navigate("/a/");
        router.navigate("/b/");
        router.back();
        router.navigate("/c/");
        assert!(!router.can_go_forward());
        assert!(router.back());
        assert_eq!(router.link(), "/a/");
    }

    #[test]
    fn test_duplicate_navigation_is_not_recorded() {
        let mut router = MemoryRouter::new("/a/");
        router.navigate("/a");
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_back_at_start() {
        let mut router = MemoryRouter::default();
        assert!(!router.back());
        assert_eq!(router.link(), "/");
    }
}
