use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Random,
    Trending,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Random => "random",
            SourceKind::Trending => "trending",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub extract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    pub url: String,
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
}

impl Article {
    pub fn new(id: i64, title: String, url: String) -> Self {
        Self {
            id,
            title,
            extract: String::new(),
            thumbnail: None,
            url,
            source: SourceKind::Random,
            views: None,
            rank: None,
            is_liked: None,
        }
    }

    pub fn with_extract(mut self, extract: String) -> Self {
        self.extract = extract;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: Option<Thumbnail>) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    /// Mark as trending with its pageview count and 1-based rank
    pub fn with_trending(mut self, views: u64, rank: u32) -> Self {
        self.source = SourceKind::Trending;
        self.views = Some(views);
        self.rank = Some(rank);
        self
    }

    pub fn liked(&self) -> bool {
        self.is_liked.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_skips_empty_fields() {
        let article = Article::new(
            42,
            "Rust".to_string(),
            "https://en.wikipedia.org/wiki/Rust".to_string(),
        )
        .with_extract("Rust is iron oxide.".to_string());

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["source"], "random");
        assert!(json.get("views").is_none());
        assert!(json.get("isLiked").is_none());
    }

    #[test]
    fn test_deserializes_trending_article() {
        let json = r#"{
            "id": 7,
            "title": "Eclipse",
            "extract": "An eclipse is...",
            "thumbnail": {"source": "https://upload.example/e.jpg", "width": 320, "height": 200},
            "url": "https://en.wikipedia.org/wiki/Eclipse",
            "source": "trending",
            "views": 120000,
            "rank": 2,
            "isLiked": true
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.source, SourceKind::Trending);
        assert_eq!(article.views, Some(120000));
        assert_eq!(article.rank, Some(2));
        assert!(article.liked());
        assert_eq!(article.thumbnail.unwrap().width, 320);
    }

    #[test]
    fn test_with_trending_sets_source() {
        let article = Article::new(1, "A".to_string(), "u".to_string()).with_trending(500, 1);
        assert_eq!(article.source, SourceKind::Trending);
        assert_eq!(article.views, Some(500));
        assert_eq!(article.rank, Some(1));
    }
}
