use serde::{Deserialize, Serialize};

pub type PhotoId = i32;

/// A slide of the gallery slideshow.
#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    pub url: String,
}

impl From<crate::db::photos::Photo> for Photo {
    fn from(p: crate::db::photos::Photo) -> Self {
        Photo {
            id: p.id,
            title: p.title.unwrap_or_else(|| "Untitled".to_string()),
            url: p.url,
        }
    }
}
