pub mod config;
pub mod error;
pub mod gesture;
pub mod motion;
pub mod page;
pub mod router;
pub mod source;
pub mod viewpager;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use page::PageKind;
pub use router::{MemoryRouter, Router};
pub use source::{ContentLookup, ContentStore, SourceData};
pub use viewpager::{Settle, Viewpager};
