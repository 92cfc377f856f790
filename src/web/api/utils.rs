use sqlx::PgConnection;
use tide::Request;

use crate::db::sessions::SessionProvider;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, PartialEq)]
pub enum Session {
    Missing,
    Unknown,
    Valid(String),
}

pub async fn current_session(
    req: &Request<crate::State>,
    conn: &mut PgConnection,
) -> Result<Session, sqlx::Error> {
    let token = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => cookie,
        None => return Ok(Session::Missing),
    };

    match conn.session_email(token.value()).await? {
        Some(email) => Ok(Session::Valid(email)),
        None => Ok(Session::Unknown),
    }
}

impl Session {
    /// The session's email, or the status answered to requests that need a session.
    pub fn email(self) -> Result<String, tide::http::StatusCode> {
        match self {
            Session::Missing => Err(tide::http::StatusCode::Unauthorized),
            Session::Unknown => Err(tide::http::StatusCode::Forbidden),
            Session::Valid(email) => Ok(email),
        }
    }
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn bad_request(reason: impl std::fmt::Display) -> tide::Response {
    tide::Response::builder(tide::http::StatusCode::BadRequest)
        .body(tide::convert::json!({
            "reason": reason.to_string(),
        }))
        .build()
}

/// Evaluates to the session's email, or returns 401/403 from the handler.
macro_rules! require_session {
    ($request:ident, $connection:ident) => {
        match $crate::web::api::utils::current_session(&$request, &mut $connection)
            .await?
            .email()
        {
            Ok(email) => email,
            Err(status) => return Ok(tide::Response::builder(status).build()),
        }
    };
}
