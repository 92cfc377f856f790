pub mod comments;
pub mod page_views;
pub mod photos;
