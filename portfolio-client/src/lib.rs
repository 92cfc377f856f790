//! Client side of the portfolio: a typed client for the portfolio's HTTP endpoints and the state
//! behind its three widgets, the gallery slideshow, the comment panel and the stats dashboard.

use async_trait::async_trait;
use thiserror::Error;

use portfolio_api_structs::{
    Comment, CommentForm, CommentId, CommentQuery, CommentStats, LoginStatus, PageViewStats,
};

#[cfg(feature = "http")]
pub mod client;
pub mod comments;
pub mod slideshow;
pub mod stats;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request to {path} failed: {message}")]
    Transport { path: &'static str, message: String },
    #[error("couldn't decode response from {path}: {message}")]
    Decode { path: &'static str, message: String },
    #[error("{path} responded with status {status}")]
    Status { path: &'static str, status: u16 },
    #[error("couldn't encode query string")]
    Query(#[from] serde_qs::Error),
    #[error("comment {0} is not shown as deletable")]
    NotDeletable(CommentId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The portfolio's HTTP endpoints.
#[async_trait]
pub trait Backend {
    /// `GET /user`
    async fn login_status(&self) -> Result<LoginStatus>;
    /// `GET /comments?limit=&sort=`
    async fn comments(&self, query: &CommentQuery) -> Result<Vec<Comment>>;
    /// `POST /add-comment`
    async fn add_comment(&self, form: &CommentForm) -> Result<()>;
    /// `POST /delete-comment`
    async fn delete_comment(&self, id: CommentId) -> Result<()>;
    /// `POST /add-page-view`
    async fn add_page_view(&self) -> Result<()>;
    /// `GET /comment-stats`
    async fn comment_stats(&self) -> Result<CommentStats>;
    /// `GET /page-view-stats`
    async fn page_view_stats(&self) -> Result<PageViewStats>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::*;
    use portfolio_api_structs::{SortOrder, ANONYMOUS_USERNAME};

    /// In-memory backend recording the requests it receives.
    #[derive(Default)]
    pub struct FakeBackend {
        pub status: Mutex<LoginStatus>,
        pub comments: Mutex<Vec<Comment>>,
        pub stats: CommentStats,
        pub page_views: PageViewStats,
        pub requests: Mutex<Vec<String>>,
        pub fail: Mutex<bool>,
        /// Every request after a successful one to this path fails.
        pub fail_after: Mutex<Option<&'static str>>,
    }

    impl FakeBackend {
        pub fn logged_in(email: &str) -> Self {
            let backend = FakeBackend::default();
            *backend.status.lock().unwrap() = LoginStatus {
                logged_in: true,
                user_email: email.to_string(),
                link: "/logout".to_string(),
            };
            backend
        }

        pub fn with_comment(self, id: CommentId, email: &str, time: i64) -> Self {
            self.comments.lock().unwrap().push(Comment {
                id,
                content: format!("comment {}", id),
                email: email.to_string(),
                username: ANONYMOUS_USERNAME.to_string(),
                time,
                mood: Default::default(),
            });
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        fn record(&self, path: &'static str, request: String) -> Result<()> {
            self.requests.lock().unwrap().push(request);
            if *self.fail.lock().unwrap() {
                return Err(Error::Status { path, status: 500 });
            }
            if *self.fail_after.lock().unwrap() == Some(path) {
                *self.fail.lock().unwrap() = true;
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn login_status(&self) -> Result<LoginStatus> {
            self.record("/user", "GET /user".to_string())?;
            Ok(self.status.lock().unwrap().clone())
        }

        async fn comments(&self, query: &CommentQuery) -> Result<Vec<Comment>> {
            self.record(
                "/comments",
                format!("GET /comments?{}", serde_qs::to_string(query)?),
            )?;
            let mut comments = self.comments.lock().unwrap().clone();
            match query.sort.unwrap_or_default() {
                SortOrder::New => comments.sort_by(|a, b| b.time.cmp(&a.time)),
                SortOrder::Old => comments.sort_by(|a, b| a.time.cmp(&b.time)),
            }
            comments.truncate(query.limit.unwrap_or(4) as usize);
            Ok(comments)
        }

        async fn add_comment(&self, form: &CommentForm) -> Result<()> {
            self.record("/add-comment", format!("POST /add-comment {}", form.content))?;
            let mut comments = self.comments.lock().unwrap();
            let id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            comments.push(Comment {
                id,
                content: form.content.clone(),
                email: form.email.clone(),
                username: form.username.clone(),
                time: id,
                mood: form.mood.parse().unwrap_or_default(),
            });
            Ok(())
        }

        async fn delete_comment(&self, id: CommentId) -> Result<()> {
            self.record("/delete-comment", format!("POST /delete-comment id={}", id))?;
            self.comments.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }

        async fn add_page_view(&self) -> Result<()> {
            self.record("/add-page-view", "POST /add-page-view".to_string())
        }

        async fn comment_stats(&self) -> Result<CommentStats> {
            self.record("/comment-stats", "GET /comment-stats".to_string())?;
            Ok(self.stats.clone())
        }

        async fn page_view_stats(&self) -> Result<PageViewStats> {
            self.record("/page-view-stats", "GET /page-view-stats".to_string())?;
            Ok(self.page_views.clone())
        }
    }
}
