use html_minifier::HTMLMinifier;
use tera::Context;
use thiserror::Error;

use crate::State;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("rendering error")]
    Tera(#[from] tera::Error),
}

pub(super) fn render(
    state: &State,
    template: &'static str,
    context: &Context,
) -> Result<String, TemplateError> {
    let rendered = state.tera.render(template, context)?;
    Ok(minify(rendered))
}

/// Minifies rendered HTML, falling back to the unminified page on failure.
fn minify(rendered: String) -> String {
    let mut html_minifier = HTMLMinifier::new();
    if let Err(err) = html_minifier.digest(&rendered) {
        tracing::error!("Failed to minify HTML: {}", err);
        return rendered;
    };

    match std::str::from_utf8(html_minifier.get_html()) {
        Ok(minified) => minified.to_string(),
        Err(err) => {
            tracing::error!("Failed to parse minified HTML as UTF-8: {}", err);
            rendered
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minify_keeps_content() {
        let html = "<div class=\"comment\">\n    <span>😀</span>\n    <p>Hello   there</p>\n</div>\n";
        let minified = minify(html.to_string());
        assert!(minified.len() <= html.len());
        assert!(minified.contains("😀"));
        assert!(minified.contains("comment"));
    }

    #[test]
    fn templates_render() {
        use portfolio_api_structs::{Comment, LoginStatus, Mood};
        use portfolio_client::comments::{render_comments, Filters, FormView};
        use portfolio_client::slideshow::Slideshow;

        let tera = tera::Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html"))
            .expect("templates parse");

        let photos = vec![
            crate::models::photos::Photo {
                id: 1,
                title: "Lake".to_string(),
                url: "https://static.example.com/lake.jpeg".to_string(),
            },
            crate::models::photos::Photo {
                id: 2,
                title: "Hill".to_string(),
                url: "https://static.example.com/hill.jpeg".to_string(),
            },
        ];
        let mut slideshow = Slideshow::new(photos.len());
        slideshow.show_slides(1);
        let filters = Filters::default();

        let status = LoginStatus {
            logged_in: true,
            user_email: "me@example.com".to_string(),
            link: "/logout".to_string(),
        };
        let comments = vec![
            Comment {
                id: 10,
                content: "Mine".to_string(),
                email: "me@example.com".to_string(),
                username: "Ann".to_string(),
                time: 2,
                mood: Mood::Cowboy,
            },
            Comment {
                id: 11,
                content: "Theirs".to_string(),
                email: "you@example.com".to_string(),
                username: "Anonymous".to_string(),
                time: 1,
                mood: Mood::Alien,
            },
        ];

        let mut context = Context::new();
        context.insert("cache_buster", &Some("abc123"));
        context.insert("title", "portfolio");
        context.insert("canonical_href", "https://me.example.com/");
        context.insert("slides", &super::super::slide_views(&photos, &slideshow, &filters).unwrap());
        context.insert("previous_qs", "slide=0");
        context.insert("next_qs", "slide=0");
        context.insert("slide", &slideshow.index());
        context.insert("form", &FormView::from(&status));
        context.insert("comments", &render_comments(comments, &status.user_email));
        context.insert("filters", &filters);
        context.insert("limit_choices", &[1, 2, 4, 10, 20]);

        let index = tera.render("index.html", &context).unwrap();
        assert_eq!(index.matches("class=\"slide\"").count(), 2);
        assert_eq!(index.matches("class=\"dot active\"").count(), 1);
        assert_eq!(index.matches("style=\"display: block\"").count(), 1);
        assert!(index.contains("hill.jpeg"));
        assert!(index.contains("?v=abc123"));
        assert!(index.contains("id=\"comments-form\""));
        assert_eq!(index.matches("class=\"delete-button\"").count(), 1);
        assert!(index.contains("👽"));

        context.insert(
            "charts",
            &vec![portfolio_client::stats::page_view_chart(&vec![])],
        );
        context.insert("charts_json", "[]");
        let stats = tera.render("stats.html", &context).unwrap();
        assert!(stats.contains("id=\"page-view-chart\""));
        assert!(stats.contains("const charts = [];"));
    }
}
