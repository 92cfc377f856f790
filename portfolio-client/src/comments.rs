use serde::Serialize;

use crate::{Backend, Error, Result};
use portfolio_api_structs::{
    Comment, CommentForm, CommentId, CommentQuery, LoginStatus, Mood, SortOrder,
};

pub const DEFAULT_LIMIT: u32 = 4;

/// Limit and sort order of the shown comments. Not persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub limit: u32,
    pub sort: SortOrder,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            limit: DEFAULT_LIMIT,
            sort: SortOrder::New,
        }
    }
}

impl Filters {
    pub fn query(&self) -> CommentQuery {
        CommentQuery {
            limit: Some(self.limit),
            sort: Some(self.sort),
        }
    }
}

/// Login or logout prompt: `text` followed by a link reading `link_text`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginMessage {
    pub text: String,
    pub link_text: &'static str,
    pub href: String,
}

impl From<&LoginStatus> for LoginMessage {
    fn from(status: &LoginStatus) -> Self {
        let text = if status.logged_in {
            format!(
                "You are currently logged in as {}, log out ",
                status.user_email
            )
        } else {
            "You need to log in to leave comments, log in ".to_string()
        };

        LoginMessage {
            text,
            link_text: "here.",
            href: status.link.clone(),
        }
    }
}

/// The comment form as shown to the current visitor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    pub message: LoginMessage,
    pub email: String,
    pub visible: bool,
    pub moods: Vec<Mood>,
}

impl From<&LoginStatus> for FormView {
    fn from(status: &LoginStatus) -> Self {
        FormView {
            message: LoginMessage::from(status),
            email: status.user_email.clone(),
            visible: status.logged_in,
            moods: Mood::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommentView {
    pub comment: Comment,
    /// Whether a delete control is shown, only for the viewer's own comments.
    pub deletable: bool,
}

pub fn render_comments(comments: Vec<Comment>, viewer_email: &str) -> Vec<CommentView> {
    comments
        .into_iter()
        .map(|comment| {
            let deletable = !viewer_email.is_empty() && comment.email == viewer_email;
            CommentView { comment, deletable }
        })
        .collect()
}

/// State of the comment section: the form, the shown comments and their filters.
pub struct CommentPanel<B> {
    backend: B,
    filters: Filters,
    form: Option<FormView>,
    comments: Vec<CommentView>,
}

impl<B: Backend> CommentPanel<B> {
    pub fn new(backend: B) -> Self {
        CommentPanel {
            backend,
            filters: Filters::default(),
            form: None,
            comments: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn form(&self) -> Option<&FormView> {
        self.form.as_ref()
    }

    pub fn comments(&self) -> &[CommentView] {
        &self.comments
    }

    /// Shows the form and the comments, then counts a page view.
    pub async fn init(&mut self) -> Result<()> {
        self.show_comment_form().await?;
        self.show_comments().await?;
        self.update_page_views().await
    }

    pub async fn show_comment_form(&mut self) -> Result<()> {
        let status = self.backend.login_status().await?;
        self.form = Some(FormView::from(&status));
        Ok(())
    }

    /// Replaces the shown comments with the ones matching the current filters.
    pub async fn show_comments(&mut self) -> Result<()> {
        let query = self.filters.query();
        let (comments, status) = futures_lite::future::try_zip(
            self.backend.comments(&query),
            self.backend.login_status(),
        )
        .await?;
        log::debug!(
            "Showing {} comments for {:?}",
            comments.len(),
            status.user_email
        );

        self.comments = render_comments(comments, &status.user_email);
        Ok(())
    }

    pub async fn change_limit(&mut self, limit: u32) -> Result<()> {
        self.filters.limit = limit;
        self.show_comments().await
    }

    pub async fn change_sort(&mut self, sort: SortOrder) -> Result<()> {
        self.filters.sort = sort;
        self.show_comments().await
    }

    /// Submits the form, then shows a fresh form and the updated comments.
    pub async fn add_comment(&mut self, mut form: CommentForm) -> Result<()> {
        if form.email.is_empty() {
            if let Some(view) = &self.form {
                form.email = view.email.clone();
            }
        }

        self.backend.add_comment(&form).await?;
        self.show_comment_form().await?;
        self.show_comments().await
    }

    /// Removes one of the viewer's own comments from the list and asks the server to delete it.
    pub async fn delete_comment(&mut self, id: CommentId) -> Result<()> {
        let position = self
            .comments
            .iter()
            .position(|view| view.comment.id == id && view.deletable)
            .ok_or(Error::NotDeletable(id))?;

        self.comments.remove(position);
        self.backend.delete_comment(id).await?;
        self.show_comments().await
    }

    pub async fn update_page_views(&self) -> Result<()> {
        self.backend.add_page_view().await
    }
}
