use std::convert::TryFrom;

use thiserror::Error;

use portfolio_api_structs::{
    Comment, CommentForm, CommentStats, Mood, UnknownMood, ANONYMOUS_USERNAME,
    MAX_COMMENT_LENGTH,
};

/// A validated comment ready to be stored.
#[derive(Debug, PartialEq)]
pub struct NewComment {
    pub content: String,
    pub email: String,
    pub username: String,
    pub time: i64,
    pub mood: Mood,
}

#[derive(Error, Debug, PartialEq)]
pub enum Rejection {
    #[error("comment is empty")]
    Empty,
    #[error("comment is longer than {} characters", MAX_COMMENT_LENGTH)]
    TooLong,
    #[error("{0}")]
    Mood(#[from] UnknownMood),
}

impl NewComment {
    /// Validates a submitted comment form. The owner is always the session's email, never the
    /// email field of the form.
    pub fn from_form(form: CommentForm, email: &str, time: i64) -> Result<Self, Rejection> {
        let content = form.content.trim();
        if content.is_empty() {
            return Err(Rejection::Empty);
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(Rejection::TooLong);
        }

        let mood = if form.mood.is_empty() {
            Mood::default()
        } else {
            form.mood.parse()?
        };

        let username = match form.username.trim() {
            "" => ANONYMOUS_USERNAME,
            username => username,
        };

        Ok(NewComment {
            content: content.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            time,
            mood,
        })
    }
}

impl TryFrom<crate::db::comments::Comment> for Comment {
    type Error = UnknownMood;

    fn try_from(c: crate::db::comments::Comment) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: c.id,
            mood: c.mood.parse()?,
            content: c.content,
            email: c.email,
            username: c.username,
            time: c.time,
        })
    }
}

/// Tallies comments by anonymity and mood. Rows with an unknown mood still count towards the
/// totals.
pub fn comment_stats<I, U, M>(rows: I) -> CommentStats
where
    I: IntoIterator<Item = (U, M)>,
    U: AsRef<str>,
    M: AsRef<str>,
{
    let mut stats = CommentStats::default();
    for (username, mood) in rows {
        stats.comment_count.total += 1;
        if username.as_ref() == ANONYMOUS_USERNAME {
            stats.comment_count.anonymous_total += 1;
        }
        match mood.as_ref().parse::<Mood>() {
            Ok(mood) => *stats.mood_count.entry(mood).or_insert(0) += 1,
            Err(err) => tracing::warn!("Not counting comment mood: {}", err),
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(content: &str, username: &str, mood: &str) -> CommentForm {
        CommentForm {
            content: content.to_string(),
            username: username.to_string(),
            mood: mood.to_string(),
            email: "someone-else@example.com".to_string(),
        }
    }

    #[test]
    fn empty_username_becomes_anonymous() {
        let comment =
            NewComment::from_form(form("Nice photos!", "  ", "🤠"), "me@example.com", 42).unwrap();
        assert_eq!(comment.username, ANONYMOUS_USERNAME);
        assert_eq!(comment.mood, Mood::Cowboy);
        assert_eq!(comment.time, 42);
    }

    #[test]
    fn owner_is_session_email() {
        let comment =
            NewComment::from_form(form("hello", "Ann", "😀"), "me@example.com", 0).unwrap();
        assert_eq!(comment.email, "me@example.com");
        assert_eq!(comment.username, "Ann");
    }

    #[test]
    fn rejects_empty_and_long_content() {
        assert_eq!(
            NewComment::from_form(form(" \n", "Ann", "😀"), "me@example.com", 0),
            Err(Rejection::Empty)
        );

        let long = "x".repeat(MAX_COMMENT_LENGTH + 1);
        assert_eq!(
            NewComment::from_form(form(&long, "Ann", "😀"), "me@example.com", 0),
            Err(Rejection::TooLong)
        );

        let longest = "é".repeat(MAX_COMMENT_LENGTH);
        assert!(NewComment::from_form(form(&longest, "Ann", "😀"), "me@example.com", 0).is_ok());
    }

    #[test]
    fn rejects_unknown_mood() {
        assert!(matches!(
            NewComment::from_form(form("hi", "Ann", "🙃"), "me@example.com", 0),
            Err(Rejection::Mood(_))
        ));
        assert_eq!(
            NewComment::from_form(form("hi", "Ann", ""), "me@example.com", 0)
                .unwrap()
                .mood,
            Mood::Grinning
        );
    }

    #[test]
    fn stats_count_anonymous_and_moods() {
        let stats = comment_stats(vec![
            ("Anonymous", "😀"),
            ("Ann", "😀"),
            ("Anonymous", "👽"),
            ("Bob", "not a mood"),
        ]);
        assert_eq!(stats.comment_count.total, 4);
        assert_eq!(stats.comment_count.anonymous_total, 2);
        assert_eq!(stats.mood(Mood::Grinning), 2);
        assert_eq!(stats.mood(Mood::Alien), 1);
        assert_eq!(stats.mood(Mood::Thinking), 0);
        assert_eq!(stats.mood_count.len(), 2);
    }

    #[test]
    fn stored_comment_converts_to_api_comment() {
        let stored = crate::db::comments::Comment {
            id: 7,
            content: "hello".to_string(),
            email: "me@example.com".to_string(),
            username: "Ann".to_string(),
            time: 1_600_000_000_000,
            mood: "🤔".to_string(),
        };
        let comment = Comment::try_from(stored).unwrap();
        assert_eq!(comment.id, 7);
        assert_eq!(comment.mood, Mood::Thinking);
    }
}
