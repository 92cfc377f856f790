use std::convert::TryFrom;

use sqlx::{FromRow, PgConnection};

use crate::db::Error;
use crate::models;
use portfolio_api_structs::{CommentId, SortOrder};

trait OrderDirection {
    fn order_direction(&self) -> &'static str;
}

impl OrderDirection for SortOrder {
    fn order_direction(&self) -> &'static str {
        match self {
            SortOrder::New => "DESC",
            SortOrder::Old => "ASC",
        }
    }
}

#[derive(Debug, FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub email: String,
    pub username: String,
    pub time: i64,
    pub mood: String,
}

#[async_trait::async_trait]
pub trait CommentProvider {
    async fn get_comments(
        &mut self,
        limit: i64,
        sort: SortOrder,
    ) -> Result<Vec<portfolio_api_structs::Comment>, Error>;

    async fn insert_comment(
        &mut self,
        comment: &models::comments::NewComment,
    ) -> Result<CommentId, sqlx::Error>;

    /// Deletes the comment only if it is owned by `email`, returning whether a comment was deleted.
    async fn delete_comment(&mut self, id: CommentId, email: &str) -> Result<bool, sqlx::Error>;

    /// Username and mood of every stored comment.
    async fn get_comment_usernames_and_moods(
        &mut self,
    ) -> Result<Vec<(String, String)>, sqlx::Error>;
}

#[async_trait::async_trait]
impl CommentProvider for PgConnection {
    async fn get_comments(
        &mut self,
        limit: i64,
        sort: SortOrder,
    ) -> Result<Vec<portfolio_api_structs::Comment>, Error> {
        let query = format!(
            r#"
                SELECT
                    id, content, email, username, time, mood
                FROM
                    comments
                ORDER BY
                    time {direction}, id {direction}
                LIMIT $1
            "#,
            direction = sort.order_direction(),
        );

        let rows: Vec<Comment> = sqlx::query_as(&query).bind(limit).fetch_all(self).await?;
        tracing::debug!("Fetched {} comments sorted {:?}", rows.len(), sort);

        let comments = rows
            .into_iter()
            .map(portfolio_api_structs::Comment::try_from)
            .collect::<Result<_, _>>()?;
        Ok(comments)
    }

    async fn insert_comment(
        &mut self,
        comment: &models::comments::NewComment,
    ) -> Result<CommentId, sqlx::Error> {
        let (id,): (CommentId,) = sqlx::query_as(
            r#"
                INSERT INTO comments (
                    content, email, username, time, mood
                ) VALUES (
                    $1, $2, $3, $4, $5
                )
                RETURNING id
            "#,
        )
        .bind(&comment.content)
        .bind(&comment.email)
        .bind(&comment.username)
        .bind(comment.time)
        .bind(comment.mood.emoji())
        .fetch_one(self)
        .await?;

        Ok(id)
    }

    async fn delete_comment(&mut self, id: CommentId, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
                DELETE FROM
                    comments
                WHERE
                    id = $1
                    AND email = $2
            "#,
        )
        .bind(id)
        .bind(email)
        .execute(self)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_comment_usernames_and_moods(
        &mut self,
    ) -> Result<Vec<(String, String)>, sqlx::Error> {
        sqlx::query_as(
            r#"
                SELECT
                    username, mood
                FROM
                    comments
            "#,
        )
        .fetch_all(self)
        .await
    }
}
