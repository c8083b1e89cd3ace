mod header;
mod loading;
mod page_error;
pub mod post;
mod post_list;
mod status_bar;
mod viewpager;

pub use header::HeaderWidget;
pub use loading::LoadingWidget;
pub use page_error::NotFoundWidget;
pub use post::{PostBody, PostWidget};
pub use post_list::PostListWidget;
pub use status_bar::StatusBarWidget;
pub use viewpager::ViewpagerWidget;
