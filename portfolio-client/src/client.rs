use async_trait::async_trait;
use serde::de::DeserializeOwned;
use surf::{Body, RequestBuilder, Response};

use crate::{Backend, Error, Result};
use portfolio_api_structs::{
    Comment, CommentForm, CommentId, CommentQuery, CommentStats, DeleteCommentForm, LoginStatus,
    PageViewStats,
};

/// Talks to a running portfolio server.
#[derive(Clone, Debug)]
pub struct PortfolioClient {
    client: surf::Client,
    endpoint: String,
    session: Option<String>,
}

fn transport(path: &'static str) -> impl FnOnce(surf::Error) -> Error {
    move |err| Error::Transport {
        path,
        message: err.to_string(),
    }
}

impl PortfolioClient {
    pub fn new(endpoint: &str, session: Option<String>) -> Self {
        PortfolioClient {
            client: surf::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(token) => request.header("Cookie", format!("session={}", token)),
            None => request,
        }
    }

    /// Sends the request, treating anything but a client or server error as success.
    async fn send(&self, path: &'static str, request: RequestBuilder) -> Result<Response> {
        let res = self
            .with_session(request)
            .await
            .map_err(transport(path))?;
        log::debug!("{} responded with {}", path, res.status());

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Status {
                path,
                status: status.into(),
            });
        }
        Ok(res)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str, url: String) -> Result<T> {
        let mut res = self.send(path, self.client.get(url)).await?;
        res.body_json().await.map_err(|err| Error::Decode {
            path,
            message: err.to_string(),
        })
    }

    async fn post_form<T: serde::Serialize>(&self, path: &'static str, form: &T) -> Result<()> {
        let body = Body::from_form(form).map_err(transport(path))?;
        self.send(path, self.client.post(self.url(path)).body(body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for PortfolioClient {
    async fn login_status(&self) -> Result<LoginStatus> {
        self.get_json("/user", self.url("/user")).await
    }

    async fn comments(&self, query: &CommentQuery) -> Result<Vec<Comment>> {
        let url = format!("{}?{}", self.url("/comments"), serde_qs::to_string(query)?);
        self.get_json("/comments", url).await
    }

    async fn add_comment(&self, form: &CommentForm) -> Result<()> {
        self.post_form("/add-comment", form).await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        self.post_form("/delete-comment", &DeleteCommentForm { id })
            .await
    }

    async fn add_page_view(&self) -> Result<()> {
        let path = "/add-page-view";
        self.send(path, self.client.post(self.url(path))).await?;
        Ok(())
    }

    async fn comment_stats(&self) -> Result<CommentStats> {
        self.get_json("/comment-stats", self.url("/comment-stats"))
            .await
    }

    async fn page_view_stats(&self) -> Result<PageViewStats> {
        self.get_json("/page-view-stats", self.url("/page-view-stats"))
            .await
    }
}
