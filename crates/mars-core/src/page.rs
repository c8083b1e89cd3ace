use crate::source::SourceData;

/// Which view renders the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A post that is part of the deck
    Viewpager,
    /// A post outside the deck
    Post,
    Loading,
    /// Archive listing
    List,
    NotFound,
    Empty,
}

impl PageKind {
    /// Pick the view for `link`, first match wins
    pub fn resolve(data: &SourceData, link: &str, deck: &[String]) -> Self {
        if data.is_post_type() && deck.iter().any(|l| l == link) {
            Self::Viewpager
        } else if data.is_post_type() {
            Self::Post
        } else if data.is_fetching() {
            Self::Loading
        } else if data.is_archive() {
            Self::List
        } else if data.is_404() {
            Self::NotFound
        } else {
            Self::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Archive, Post};

    fn post(link: &str) -> SourceData {
        SourceData::Post(Post {
            link: link.to_string(),
            title: "T".to_string(),
            author: None,
            date: None,
            content: String::new(),
        })
    }

    #[test]
    fn test_resolve() {
        let deck = vec!["/p0/".to_string()];
        assert_eq!(PageKind::resolve(&post("/p0/"), "/p0/", &deck), PageKind::Viewpager);
        assert_eq!(PageKind::resolve(&post("/p9/"), "/p9/", &deck), PageKind::Post);
        assert_eq!(PageKind::resolve(&SourceData::Fetching, "/p0/", &deck), PageKind::Loading);
        assert_eq!(PageKind::resolve(&SourceData::NotFound, "/x/", &deck), PageKind::NotFound);
        let archive = SourceData::Archive(Archive {
            link: "/".to_string(),
            title: "Home".to_string(),
            items: Vec::new(),
        });
        assert_eq!(PageKind::resolve(&archive, "/", &deck), PageKind::List);
    }
}
