use structopt::StructOpt;

use portfolio_api_structs::{CommentForm, CommentId, SortOrder};
use portfolio_client::client::PortfolioClient;
use portfolio_client::comments::CommentPanel;
use portfolio_client::stats::Dashboard;
use portfolio_client::Backend;

#[derive(StructOpt)]
pub struct SharedApiArgs {
    /// Portfolio host
    #[structopt(long, env = "PORTFOLIO_API_ENDPOINT")]
    endpoint: String,
    /// Session token of a logged in user
    #[structopt(long, env = "PORTFOLIO_SESSION", hide_env_values = true)]
    session: Option<String>,
}

impl SharedApiArgs {
    fn client(&self) -> PortfolioClient {
        PortfolioClient::new(&self.endpoint, self.session.clone())
    }
}

#[derive(StructOpt)]
pub struct ListArgs {
    #[structopt(flatten)]
    api_arguments: SharedApiArgs,

    /// Number of comments to show.
    #[structopt(long, default_value = "4")]
    limit: u32,

    /// Show the oldest comments first.
    #[structopt(long)]
    oldest_first: bool,
}

#[derive(StructOpt)]
pub struct AddArgs {
    #[structopt(flatten)]
    api_arguments: SharedApiArgs,

    /// Name shown next to the comment, anonymous when left out.
    #[structopt(long, default_value = "")]
    username: String,

    /// Mood emoji of the comment.
    #[structopt(long, default_value = "😀")]
    mood: String,

    /// Comment text.
    #[structopt(name = "CONTENT")]
    content: String,
}

#[derive(StructOpt)]
pub struct DeleteArgs {
    #[structopt(flatten)]
    api_arguments: SharedApiArgs,

    /// ID of the comment to delete.
    #[structopt(name = "COMMENT_ID")]
    id: CommentId,
}

#[derive(StructOpt)]
pub enum Command {
    User(SharedApiArgs),
    Comments(ListArgs),
    AddComment(AddArgs),
    DeleteComment(DeleteArgs),
    AddPageView(SharedApiArgs),
    Stats(SharedApiArgs),
}

fn print_comments(panel: &CommentPanel<PortfolioClient>) {
    for view in panel.comments() {
        let comment = &view.comment;
        println!(
            "[{}] {} {}{}",
            comment.id,
            comment.mood,
            comment.username,
            if view.deletable { " (yours)" } else { "" }
        );
        println!("    {}", comment.content);
    }
}

async fn list_comments(args: ListArgs) -> portfolio_client::Result<()> {
    let mut panel = CommentPanel::new(args.api_arguments.client());
    panel.change_limit(args.limit).await?;
    if args.oldest_first {
        panel.change_sort(SortOrder::Old).await?;
    }
    print_comments(&panel);
    Ok(())
}

async fn add_comment(args: AddArgs) -> portfolio_client::Result<()> {
    let mut panel = CommentPanel::new(args.api_arguments.client());
    panel.show_comment_form().await?;
    if let Some(form) = panel.form() {
        if !form.visible {
            log::error!("{}{}", form.message.text, form.message.href);
            std::process::exit(1);
        }
    }

    panel
        .add_comment(CommentForm {
            content: args.content,
            username: args.username,
            mood: args.mood,
            email: String::new(),
        })
        .await?;
    log::info!("Comment added");
    print_comments(&panel);
    Ok(())
}

/// Asks the server to delete `id` directly, comments past the list size cap included. The server
/// answers 404 for comments that aren't the session's.
async fn delete_comment<B: Backend>(backend: &B, id: CommentId) -> portfolio_client::Result<()> {
    backend.delete_comment(id).await?;
    log::info!("Comment {} deleted", id);
    Ok(())
}

async fn show_user(args: SharedApiArgs) -> portfolio_client::Result<()> {
    let status = args.client().login_status().await?;
    if status.logged_in {
        println!("Logged in as {}, log out at {}", status.user_email, status.link);
    } else {
        println!("Not logged in, log in at {}", status.link);
    }
    Ok(())
}

async fn show_stats(args: SharedApiArgs) -> portfolio_client::Result<()> {
    let dashboard = Dashboard::new(args.client());
    for chart in dashboard.charts().await? {
        println!("{}", chart.options.title);
        for row in chart.rows() {
            println!("    {}: {}", row[0], row[1]);
        }
    }
    Ok(())
}

#[async_std::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let result = match Command::from_args() {
        Command::User(args) => show_user(args).await,
        Command::Comments(args) => list_comments(args).await,
        Command::AddComment(args) => add_comment(args).await,
        Command::DeleteComment(args) => {
            delete_comment(&args.api_arguments.client(), args.id).await
        },
        Command::AddPageView(args) => args.client().add_page_view().await,
        Command::Stats(args) => show_stats(args).await,
    };

    if let Err(err) = result {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
