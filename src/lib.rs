use std::io::Read;
use std::sync::Arc;

use opentelemetry_tide::TideExt;
use structopt::StructOpt;

pub mod db;
pub mod models;
pub mod telemetry;
pub mod web;

#[derive(Clone, Debug)]
pub struct State {
    pub args: Arc<Args>,
    pub db: sqlx::postgres::PgPool,
    pub tera: Arc<tera::Tera>,
    pub cache_busting_string: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    TemplatePathError(std::io::Error),
    TemplateParseError(tera::Error),
    TelemetryInitError(anyhow::Error),
    DatabaseError(sqlx::Error),
    MigrationError(sqlx::migrate::MigrateError),
    ListenError(std::io::Error),
    StaticPathError(std::io::Error),
}

impl From<Error> for u8 {
    fn from(error: Error) -> u8 {
        match error {
            Error::TemplatePathError(_) => 2,
            Error::TemplateParseError(_) => 3,
            Error::TelemetryInitError(_) => 4,
            Error::DatabaseError(_) => 5,
            Error::MigrationError(_) => 6,
            Error::ListenError(_) => 7,
            Error::StaticPathError(_) => 8,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TemplatePathError(err) => {
                write!(f, "Invalid template path: {}", err)
            },
            Error::TemplateParseError(err) => {
                write!(f, "Template parsing error: {}", err)
            },
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::DatabaseError(err) => {
                write!(f, "Failed to connect to database: {}", err)
            },
            Error::MigrationError(err) => {
                write!(f, "Failed to migrate database: {}", err)
            },
            Error::ListenError(err) => {
                write!(f, "Failed to start server: {}", err)
            },
            Error::StaticPathError(err) => {
                write!(f, "Invalid static files path: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "PORTFOLIO_BIND_ADDRESS")]
    address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8166", env = "PORTFOLIO_BIND_PORT")]
    port: u16,

    /// PostgreSQL database url.
    #[structopt(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Portfolio base URL.
    #[structopt(long, env = "PORTFOLIO_BASE_URL")]
    pub base_url: String,

    /// Identity provider page users are sent to for logging in.
    #[structopt(long, env = "PORTFOLIO_LOGIN_URL")]
    pub login_url: String,

    /// Page users are sent to for logging out.
    #[structopt(long, default_value = "/logout", env = "PORTFOLIO_LOGOUT_URL")]
    pub logout_url: String,

    /// Default number of comments returned by the comment list
    #[structopt(
        long,
        default_value = "4",
        env = "PORTFOLIO_DEFAULT_COMMENTS_PER_PAGE"
    )]
    pub default_comments_per_page: u32,

    /// Max number of comments returned by the comment list
    #[structopt(long, default_value = "100", env = "PORTFOLIO_MAX_COMMENTS_PER_PAGE")]
    pub max_comments_per_page: u32,

    /// Path to Tera templates directory
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./templates",
        env = "PORTFOLIO_TEMPLATE_PATH"
    )]
    template_path: std::path::PathBuf,

    /// Path to the directory served under /static
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./static",
        env = "PORTFOLIO_STATIC_PATH"
    )]
    static_path: std::path::PathBuf,
}

#[cfg(test)]
pub(crate) fn test_args() -> Args {
    Args::from_iter(vec![
        "portfolio",
        "--database-url",
        "postgres://localhost/portfolio",
        "--base-url",
        "https://me.example.com",
        "--login-url",
        "https://id.example.com/login",
        "--logout-url",
        "/logout",
        "--default-comments-per-page",
        "4",
        "--max-comments-per-page",
        "100",
    ])
}

fn read_cache_busting_string(template_path: &std::path::Path) -> Option<String> {
    let mut file = std::fs::File::open(template_path.join("cache-buster")).ok()?;
    let mut data = String::new();
    if let Err(err) = file.read_to_string(&mut data) {
        tracing::warn!("couldn't read cache busting string from file: {}", err);
        return None;
    }
    data.split_whitespace().next().map(|s| s.to_string())
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Arc::new(Args::from_args());

    telemetry::init().map_err(Error::TelemetryInitError)?;

    let pool = db::get_pool(&args.database_url)
        .await
        .map_err(Error::DatabaseError)?;
    db::migrate(&pool).await.map_err(Error::MigrationError)?;

    let template_path = args
        .template_path
        .canonicalize()
        .map_err(Error::TemplatePathError)?;
    let tera = tera::Tera::new(&template_path.join("**/*.html").to_string_lossy())
        .map_err(Error::TemplateParseError)?;

    let cache_busting_string = read_cache_busting_string(&template_path);

    let state = State {
        args: args.clone(),
        db: pool,
        tera: Arc::new(tera),
        cache_busting_string,
    };
    let mut app = tide::with_state(state);

    app.with_default_tracing_middleware();

    web::mount(&mut app, &args.static_path).map_err(Error::StaticPathError)?;

    let address: &str = args.address.as_ref();
    tracing::info!("listening on {}:{}", address, args.port);
    app.listen((address, args.port))
        .await
        .map_err(Error::ListenError)?;

    Ok(())
}
