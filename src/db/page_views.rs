use sqlx::PgConnection;
use time::Date;

#[async_trait::async_trait]
pub trait PageViewProvider {
    /// Counts one more view on `day`, returning the day's new total.
    async fn add_page_view(&mut self, day: Date, now_millis: i64) -> Result<i64, sqlx::Error>;

    /// Stored view counts for the days in `first..=last`. Days without views are absent.
    async fn get_page_view_counts(
        &mut self,
        first: Date,
        last: Date,
    ) -> Result<Vec<(Date, i64)>, sqlx::Error>;
}

#[async_trait::async_trait]
impl PageViewProvider for PgConnection {
    async fn add_page_view(&mut self, day: Date, now_millis: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
                INSERT INTO page_views (
                    day, count, last_updated
                ) VALUES (
                    $1, 1, $2
                )
                ON CONFLICT (day) DO UPDATE SET
                    count = page_views.count + 1,
                    last_updated = EXCLUDED.last_updated
                RETURNING count
            "#,
        )
        .bind(day)
        .bind(now_millis)
        .fetch_one(self)
        .await?;

        Ok(count)
    }

    async fn get_page_view_counts(
        &mut self,
        first: Date,
        last: Date,
    ) -> Result<Vec<(Date, i64)>, sqlx::Error> {
        sqlx::query_as(
            r#"
                SELECT
                    day, count
                FROM
                    page_views
                WHERE
                    day BETWEEN $1 AND $2
                ORDER BY
                    day ASC
            "#,
        )
        .bind(first)
        .bind(last)
        .fetch_all(self)
        .await
    }
}
