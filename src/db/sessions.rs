use sqlx::PgConnection;

#[async_trait::async_trait]
pub trait SessionProvider {
    /// Email of the user owning the session token, if the token is known.
    async fn session_email(&mut self, token: &str) -> Result<Option<String>, sqlx::Error>;

    async fn delete_session(&mut self, token: &str) -> Result<(), sqlx::Error>;
}

#[async_trait::async_trait]
impl SessionProvider for PgConnection {
    async fn session_email(&mut self, token: &str) -> Result<Option<String>, sqlx::Error> {
        let email: Option<(String,)> = sqlx::query_as(
            r#"
                SELECT
                    email
                FROM
                    sessions
                WHERE
                    token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self)
        .await?;

        Ok(email.map(|(email,)| email))
    }

    async fn delete_session(&mut self, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
                DELETE FROM
                    sessions
                WHERE
                    token = $1
            "#,
        )
        .bind(token)
        .execute(self)
        .await?;

        Ok(())
    }
}
