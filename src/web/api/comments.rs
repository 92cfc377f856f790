use serde::Deserialize;
use tide::{Redirect, Request, Response};

use crate::db::comments::CommentProvider;
use crate::models::comments::NewComment;
use crate::web::api::utils::{bad_request, now_millis};
use portfolio_api_structs::{CommentForm, DeleteCommentForm, SortOrder};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListQueryParams {
    limit: Option<u32>,
    sort: Option<String>,
}

pub(crate) fn page_size(requested: Option<u32>, args: &crate::Args) -> u32 {
    match requested {
        Some(n) => n.min(args.max_comments_per_page),
        None => args.default_comments_per_page,
    }
}

pub(super) async fn list_comments(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let mut conn = state.db.acquire().await?;

    let query: ListQueryParams = req.query()?;
    let limit = page_size(query.limit, &state.args);
    let sort = SortOrder::from_param(query.sort.as_deref());

    let comments = conn.get_comments(limit.into(), sort).await?;

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(tide::Body::from_json(&comments)?)
        .build();
    Ok(res)
}

pub(super) async fn add_comment(mut req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;

    let email = require_session!(req, conn);

    let form: CommentForm = req.body_form().await?;
    tracing::debug!("Received comment form: {:?}", form);

    let comment = match NewComment::from_form(form, &email, now_millis()) {
        Ok(comment) => comment,
        Err(rejection) => {
            tracing::info!("Rejected comment from {}: {}", email, rejection);
            return Ok(bad_request(rejection));
        },
    };

    let id = conn.insert_comment(&comment).await?;
    tracing::info!("Stored comment {} by {}", id, email);

    Ok(Redirect::see_other("/").into())
}

pub(super) async fn delete_comment(mut req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;

    let email = require_session!(req, conn);

    let form: DeleteCommentForm = req.body_form().await?;

    let deleted = conn.delete_comment(form.id, &email).await?;
    if deleted {
        tracing::info!("Deleted comment {} by {}", form.id, email);
    }
    Ok(deletion_response(deleted))
}

/// Missing comments and other users' comments are both not found.
fn deletion_response(deleted: bool) -> Response {
    if deleted {
        Redirect::see_other("/").into()
    } else {
        Response::builder(tide::http::StatusCode::NotFound).build()
    }
}
