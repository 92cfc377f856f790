pub mod api;
pub mod html;

pub(super) fn mount(
    app: &mut tide::Server<crate::State>,
    static_path: &std::path::Path,
) -> std::io::Result<()> {
    html::mount(app);
    api::mount(app);
    app.at("/static").serve_dir(static_path)?;
    Ok(())
}
