use serde::Serialize;
use serde_json::{json, Value};

use crate::{Backend, Result};
use portfolio_api_structs::{CommentStats, Mood, PageViewStats};

const WIDTH: u32 = 500;
const HEIGHT: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    PieChart,
    ColumnChart,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOptions {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
}

/// A chart ready to be drawn by the charting library into the element `element_id`.
///
/// `data` is laid out as the library's data tables expect it: a header row followed by one
/// `[label, value]` row per entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chart {
    pub element_id: &'static str,
    pub kind: ChartKind,
    pub options: ChartOptions,
    pub data: Vec<Vec<Value>>,
}

impl Chart {
    fn new(
        element_id: &'static str,
        kind: ChartKind,
        title: &'static str,
        header: [&'static str; 2],
    ) -> Self {
        Chart {
            element_id,
            kind,
            options: ChartOptions {
                title,
                width: WIDTH,
                height: HEIGHT,
            },
            data: vec![vec![json!(header[0]), json!(header[1])]],
        }
    }

    fn row(mut self, label: impl Into<Value>, value: u64) -> Self {
        self.data.push(vec![label.into(), json!(value)]);
        self
    }

    /// Rows below the header.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.data[1..]
    }
}

pub fn general_comment_chart(stats: &CommentStats) -> Chart {
    let count = &stats.comment_count;
    Chart::new(
        "comment-piechart",
        ChartKind::PieChart,
        "Number of Comments by Username",
        ["Username", "Number of Comments"],
    )
    .row("Anonymous", count.anonymous_total)
    .row("Custom", count.total.saturating_sub(count.anonymous_total))
}

pub fn mood_comment_chart(stats: &CommentStats) -> Chart {
    Mood::ALL.iter().fold(
        Chart::new(
            "mood-piechart",
            ChartKind::PieChart,
            "Number of Comments by Mood",
            ["Mood", "Number of Comments"],
        ),
        |chart, mood| chart.row(mood.emoji(), stats.mood(*mood)),
    )
}

pub fn page_view_chart(stats: &PageViewStats) -> Chart {
    stats.iter().fold(
        Chart::new(
            "page-view-chart",
            ChartKind::ColumnChart,
            "Page Views in the Last Week",
            ["Date", "Page Views"],
        ),
        |chart, day| chart.row(day.date.as_str(), day.views),
    )
}

/// The statistics page. Every chart fetches its own data.
pub struct Dashboard<B> {
    backend: B,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B) -> Self {
        Dashboard { backend }
    }

    pub async fn general_comment_chart(&self) -> Result<Chart> {
        let stats = self.backend.comment_stats().await?;
        Ok(general_comment_chart(&stats))
    }

    pub async fn mood_comment_chart(&self) -> Result<Chart> {
        let stats = self.backend.comment_stats().await?;
        Ok(mood_comment_chart(&stats))
    }

    pub async fn page_view_chart(&self) -> Result<Chart> {
        let stats = self.backend.page_view_stats().await?;
        Ok(page_view_chart(&stats))
    }

    pub async fn charts(&self) -> Result<Vec<Chart>> {
        Ok(vec![
            self.general_comment_chart().await?,
            self.mood_comment_chart().await?,
            self.page_view_chart().await?,
        ])
    }
}
