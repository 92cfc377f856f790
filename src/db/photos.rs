use sqlx::{FromRow, PgConnection};

use crate::models;

pub type PhotoId = i32;

#[derive(Debug, FromRow)]
pub struct Photo {
    pub id: PhotoId,
    pub title: Option<String>,
    pub url: String,
    pub position: i32,
}

#[async_trait::async_trait]
pub trait PhotoProvider {
    /// Every gallery photo in slideshow order.
    async fn get_gallery_photos(&mut self) -> Result<Vec<models::photos::Photo>, sqlx::Error>;
}

#[async_trait::async_trait]
impl PhotoProvider for PgConnection {
    async fn get_gallery_photos(&mut self) -> Result<Vec<models::photos::Photo>, sqlx::Error> {
        let rows: Vec<Photo> = sqlx::query_as(
            r#"
                SELECT
                    id, title, url, position
                FROM
                    gallery_photos
                ORDER BY
                    position ASC, id ASC
            "#,
        )
        .fetch_all(self)
        .await?;

        Ok(rows.into_iter().map(models::photos::Photo::from).collect())
    }
}
