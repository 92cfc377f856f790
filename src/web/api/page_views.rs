use tide::{Redirect, Request, Response};

use crate::db::page_views::PageViewProvider;
use crate::web::api::utils::now_millis;

pub(super) async fn add_page_view(req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;

    let today = time::OffsetDateTime::now_utc().date();
    let count = conn.add_page_view(today, now_millis()).await?;
    tracing::debug!("Page views on {}: {}", today, count);

    Ok(Redirect::see_other("/").into())
}
