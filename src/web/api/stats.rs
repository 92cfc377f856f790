use tide::{Request, Response};

use crate::db::comments::CommentProvider;
use crate::db::page_views::PageViewProvider;
use crate::models;

pub(super) async fn comment_stats(req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;

    let rows = conn.get_comment_usernames_and_moods().await?;
    let stats = models::comments::comment_stats(rows);

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(tide::Body::from_json(&stats)?)
        .build();
    Ok(res)
}

pub(super) async fn page_view_stats(req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;

    let today = time::OffsetDateTime::now_utc().date();
    let (first, last) = models::page_views::week_ending(today);
    let counts = conn.get_page_view_counts(first, last).await?;
    let stats = models::page_views::page_view_stats(today, &counts);

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(tide::Body::from_json(&stats)?)
        .build();
    Ok(res)
}
