use serde::{Deserialize, Serialize};
use tide::{Request, Response};

use crate::db::comments::CommentProvider;
use crate::db::page_views::PageViewProvider;
use crate::db::photos::PhotoProvider;
use crate::models;
use crate::web::api::comments::page_size;
use crate::web::api::user::login_status;
use crate::web::api::utils::current_session;
use portfolio_api_structs::SortOrder;
use portfolio_client::comments::{render_comments, Filters, FormView};
use portfolio_client::slideshow::{Display, Slideshow};
use portfolio_client::stats;

pub mod utils;

/// Choices offered by the comment number selector.
const LIMIT_CHOICES: [u32; 5] = [1, 2, 4, 10, 20];

pub(in super::super) fn mount(route: &mut tide::Server<crate::State>) {
    route.at("/").get(index);
    route.at("/index.html").get(index);
    route.at("/stats").get(dashboard);
    route.at("/sitemap.xml").get(sitemap);
}

#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
struct IndexQueryParams {
    slide: Option<i64>,
    limit: Option<u32>,
    sort: Option<String>,
}

#[derive(Serialize)]
struct SlideView<'a> {
    photo: &'a models::photos::Photo,
    display: Display,
    dot_class: &'static str,
    qs: String,
}

fn slide_qs(slide: usize, filters: &Filters) -> Result<String, serde_qs::Error> {
    serde_qs::to_string(&IndexQueryParams {
        slide: Some(slide as i64),
        limit: Some(filters.limit),
        sort: Some(filters.sort.as_str().to_string()),
    })
}

fn slide_views<'a>(
    photos: &'a [models::photos::Photo],
    slideshow: &Slideshow,
    filters: &Filters,
) -> Result<Vec<SlideView<'a>>, serde_qs::Error> {
    photos
        .iter()
        .zip(slideshow.slides())
        .map(|(photo, slide)| {
            Ok(SlideView {
                photo,
                display: slide.display,
                dot_class: slide.dot_class(),
                qs: slide_qs(slide.index, filters)?,
            })
        })
        .collect()
}

/// `path` below the configured base URL, whether or not it ends in a slash.
fn site_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn base_context(state: &crate::State, title: &str, path: &str) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("cache_buster", &state.cache_busting_string);
    context.insert("title", title);
    context.insert("canonical_href", &site_url(&state.args.base_url, path));
    context
}

fn html_response(body: String) -> Response {
    Response::builder(tide::http::StatusCode::Ok)
        .content_type("text/html")
        .body(body)
        .build()
}

async fn index(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let mut conn = state.db.acquire().await?;

    let query: IndexQueryParams = req.query()?;
    let filters = Filters {
        limit: page_size(query.limit, &state.args),
        sort: SortOrder::from_param(query.sort.as_deref()),
    };

    let session = current_session(&req, &mut conn).await?;
    let status = login_status(&state.args, session)?;

    let photos = conn.get_gallery_photos().await?;
    let mut slideshow = Slideshow::new(photos.len());
    slideshow.show_slides(query.slide.unwrap_or(0));

    let comments = conn
        .get_comments(filters.limit.into(), filters.sort)
        .await?;

    let mut context = base_context(state, "portfolio", "/");
    context.insert("slides", &slide_views(&photos, &slideshow, &filters)?);
    context.insert("previous_qs", &slide_qs(slideshow.peek(-1), &filters)?);
    context.insert("next_qs", &slide_qs(slideshow.peek(1), &filters)?);
    context.insert("slide", &slideshow.index());
    context.insert("form", &FormView::from(&status));
    context.insert("comments", &render_comments(comments, &status.user_email));
    context.insert("filters", &filters);
    context.insert("limit_choices", &LIMIT_CHOICES);

    let body = utils::render(state, "index.html", &context)?;
    Ok(html_response(body))
}

async fn dashboard(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let mut conn = state.db.acquire().await?;

    let comment_stats =
        models::comments::comment_stats(conn.get_comment_usernames_and_moods().await?);

    let today = time::OffsetDateTime::now_utc().date();
    let (first, last) = models::page_views::week_ending(today);
    let counts = conn.get_page_view_counts(first, last).await?;
    let page_view_stats = models::page_views::page_view_stats(today, &counts);

    let charts = vec![
        stats::general_comment_chart(&comment_stats),
        stats::mood_comment_chart(&comment_stats),
        stats::page_view_chart(&page_view_stats),
    ];

    let mut context = base_context(state, "stats", "/stats");
    context.insert("charts", &charts);
    context.insert("charts_json", &serde_json::to_string(&charts)?);

    let body = utils::render(state, "stats.html", &context)?;
    Ok(html_response(body))
}

async fn sitemap(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();

    let mut buf = Vec::new();
    let sitemap_writer = sitemap::writer::SiteMapWriter::new(&mut buf);
    let mut urlwriter = sitemap_writer.start_urlset()?;

    urlwriter.url(site_url(&state.args.base_url, "/"))?;
    urlwriter.url(site_url(&state.args.base_url, "/stats"))?;

    urlwriter.end()?;

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(buf)
        .content_type(tide::http::mime::XML)
        .build();
    Ok(res)
}
