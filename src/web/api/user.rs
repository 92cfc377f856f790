use serde::Serialize;
use tide::http::Cookie;
use tide::{Redirect, Request, Response};

use crate::db::sessions::SessionProvider;
use crate::web::api::utils::{current_session, Session, SESSION_COOKIE};
use portfolio_api_structs::LoginStatus;

#[derive(Serialize)]
struct ContinueParams<'a> {
    #[serde(rename = "continue")]
    continue_url: &'a str,
}

/// Link to `target` that sends the user back to the portfolio afterwards.
fn link_with_continue(target: &str, base_url: &str) -> Result<String, serde_qs::Error> {
    let back = format!("{}/", base_url.trim_end_matches('/'));
    let qs = serde_qs::to_string(&ContinueParams { continue_url: &back })?;
    let separator = if target.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", target, separator, qs))
}

pub(crate) fn login_status(
    args: &crate::Args,
    session: Session,
) -> Result<LoginStatus, serde_qs::Error> {
    let status = match session {
        Session::Valid(email) => LoginStatus {
            logged_in: true,
            user_email: email,
            link: args.logout_url.clone(),
        },
        Session::Missing | Session::Unknown => LoginStatus {
            logged_in: false,
            user_email: String::new(),
            link: link_with_continue(&args.login_url, &args.base_url)?,
        },
    };
    Ok(status)
}

pub(super) async fn get_user(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let mut conn = state.db.acquire().await?;

    let session = current_session(&req, &mut conn).await?;
    let status = login_status(&state.args, session)?;

    let res = Response::builder(tide::http::StatusCode::Ok)
        .body(tide::Body::from_json(&status)?)
        .build();
    Ok(res)
}

pub(super) async fn logout(req: Request<crate::State>) -> tide::Result<Response> {
    let mut conn = req.state().db.acquire().await?;

    if let Some(token) = req.cookie(SESSION_COOKIE) {
        conn.delete_session(token.value()).await?;
    }

    let mut res: Response = Redirect::new("/").into();
    res.remove_cookie(Cookie::named(SESSION_COOKIE));
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_link_returns_to_portfolio() {
        assert_eq!(
            link_with_continue("https://id.example.com/login", "https://me.example.com").unwrap(),
            "https://id.example.com/login?continue=https%3A%2F%2Fme.example.com%2F"
        );
    }

    #[test]
    fn status_links_depend_on_session() {
        let args = crate::test_args();

        let status = login_status(&args, Session::Valid("me@example.com".to_string())).unwrap();
        assert!(status.logged_in);
        assert_eq!(status.user_email, "me@example.com");
        assert_eq!(status.link, "/logout");

        for session in vec![Session::Missing, Session::Unknown] {
            let status = login_status(&args, session).unwrap();
            assert!(!status.logged_in);
            assert_eq!(status.user_email, "");
            assert!(status.link.starts_with("https://id.example.com/login?continue="));
        }
    }

    #[test]
    fn login_link_keeps_existing_query() {
        let link =
            link_with_continue("https://id.example.com/login?app=portfolio", "https://me.example.com/")
                .unwrap();
        assert!(link.starts_with("https://id.example.com/login?app=portfolio&continue="));
        assert!(link.ends_with("me.example.com%2F"));
    }
}
