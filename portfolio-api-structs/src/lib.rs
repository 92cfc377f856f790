use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type CommentId = i64;

/// Display name stored when a commenter leaves the username empty.
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

/// Longest comment content accepted, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Grinning,
    Thinking,
    Cowboy,
    Frowning,
    Alien,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Grinning,
        Mood::Thinking,
        Mood::Cowboy,
        Mood::Frowning,
        Mood::Alien,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Grinning => "😀",
            Mood::Thinking => "🤔",
            Mood::Cowboy => "🤠",
            Mood::Frowning => "☹️",
            Mood::Alien => "👽",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Grinning
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl fmt::Display for UnknownMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mood {:?}", self.0)
    }
}

impl std::error::Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The frowning face is also commonly sent without the emoji variation selector.
        if s == "☹" {
            return Ok(Mood::Frowning);
        }
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.emoji() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

impl serde::Serialize for Mood {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.emoji())
    }
}

impl<'de> serde::Deserialize<'de> for Mood {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    New,
    Old,
}

impl SortOrder {
    /// Reads a `sort` query parameter, falling back to newest first for anything unrecognised.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("old") => SortOrder::Old,
            _ => SortOrder::New,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::New => "new",
            SortOrder::Old => "old",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::New
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub email: String,
    pub username: String,
    /// Milliseconds since the unix epoch.
    pub time: i64,
    pub mood: Mood,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    pub logged_in: bool,
    pub user_email: String,
    pub link: String,
}

/// Query string of `GET /comments`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CommentQuery {
    pub limit: Option<u32>,
    pub sort: Option<SortOrder>,
}

/// Form body of `POST /add-comment`, named after the comment form's fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CommentForm {
    #[serde(rename = "comment-input")]
    pub content: String,
    #[serde(rename = "username-input")]
    pub username: String,
    #[serde(rename = "select-mood")]
    pub mood: String,
    #[serde(rename = "email-input")]
    pub email: String,
}

/// Form body of `POST /delete-comment`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DeleteCommentForm {
    pub id: CommentId,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCount {
    pub total: u64,
    pub anonymous_total: u64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentStats {
    pub comment_count: CommentCount,
    pub mood_count: BTreeMap<Mood, u64>,
}

impl CommentStats {
    pub fn mood(&self, mood: Mood) -> u64 {
        self.mood_count.get(&mood).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DailyViews {
    /// Short date, `M/D/YY`.
    pub date: String,
    pub views: u64,
}

/// Page views of the last week, oldest day first.
pub type PageViewStats = Vec<DailyViews>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_parses_every_emoji() {
        for mood in Mood::ALL.iter() {
            assert_eq!(mood.emoji().parse::<Mood>(), Ok(*mood));
        }
        assert_eq!("☹".parse::<Mood>(), Ok(Mood::Frowning));
        assert!("🙂".parse::<Mood>().is_err());
    }

    #[test]
    fn stats_use_emoji_keys() {
        let mut stats = CommentStats::default();
        stats.comment_count.total = 3;
        stats.comment_count.anonymous_total = 1;
        stats.mood_count.insert(Mood::Alien, 3);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["commentCount"]["anonymousTotal"], 1);
        assert_eq!(json["moodCount"]["👽"], 3);

        let back: CommentStats = serde_json::from_value(json).unwrap();
        assert_eq!(back.mood(Mood::Alien), 3);
        assert_eq!(back.mood(Mood::Cowboy), 0);
    }

    #[test]
    fn login_status_is_camel_case() {
        let status: LoginStatus = serde_json::from_str(
            r#"{"loggedIn":true,"userEmail":"a@example.com","link":"/logout"}"#,
        )
        .unwrap();
        assert!(status.logged_in);
        assert_eq!(status.user_email, "a@example.com");
    }

    #[test]
    fn unknown_sort_order_is_rejected() {
        assert!(serde_json::from_str::<SortOrder>(r#""sideways""#).is_err());
        assert_eq!(
            serde_json::from_str::<SortOrder>(r#""old""#).unwrap(),
            SortOrder::Old
        );
    }

    #[test]
    fn sort_param_defaults_to_new() {
        assert_eq!(SortOrder::from_param(Some("old")), SortOrder::Old);
        assert_eq!(SortOrder::from_param(Some("new")), SortOrder::New);
        assert_eq!(SortOrder::from_param(Some("sideways")), SortOrder::New);
        assert_eq!(SortOrder::from_param(None), SortOrder::New);
    }
}
