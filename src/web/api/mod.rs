#[macro_use]
pub mod utils;
pub mod comments;
pub mod page_views;
pub mod stats;
pub mod user;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    app.at("/user").get(user::get_user);
    app.at("/logout").get(user::logout);

    app.at("/comments").get(comments::list_comments);
    app.at("/add-comment").post(comments::add_comment);
    app.at("/delete-comment").post(comments::delete_comment);

    app.at("/add-page-view").post(page_views::add_page_view);

    app.at("/comment-stats").get(stats::comment_stats);
    app.at("/page-view-stats").get(stats::page_view_stats);
}
