use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Byline used when the source does not name an author.
pub const DEFAULT_AUTHOR: &str = "Dal Gazette Staff";

/// Newspaper section an article is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    News,
    Opinions,
    #[serde(rename = "Arts & Culture")]
    ArtsCulture,
    Sports,
}

impl Category {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Opinions => "Opinions",
            Category::ArtsCulture => "Arts & Culture",
            Category::Sports => "Sports",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A scraped article ready for display.
///
/// Serialized with camelCase keys. `image_url` and `url` are omitted from
/// the JSON output when absent rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique within a batch, stable for the same source and title.
    pub id: String,
    pub title: String,
    /// Plain text, at most 200 characters plus a trailing `...`.
    pub excerpt: String,
    /// Paragraphs separated by a blank line, with a small set of inline tags kept.
    pub content: String,
    pub category: Category,
    pub author: String,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Lower-cased category labels in extraction order.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> Article {
        Article {
            id: "rss-0123456789ab".to_string(),
            title: "Council approves new library hours".to_string(),
            excerpt: "The council voted on Tuesday.".to_string(),
            content: "The council voted on Tuesday.".to_string(),
            category: Category::ArtsCulture,
            author: DEFAULT_AUTHOR.to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            image_url: None,
            tags: vec!["arts".to_string()],
            url: None,
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert!(json.get("publishedAt").is_some());
        assert!(json.get("published_at").is_none());
        assert_eq!(json["category"], "Arts & Culture");
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let json = serde_json::to_value(sample()).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("imageUrl"));
        assert!(!obj.contains_key("url"));
    }

    #[test]
    fn present_optional_fields_are_written() {
        let mut article = sample();
        article.image_url = Some("https://dalgazette.com/wp-content/uploads/a.jpg".to_string());
        article.url = Some("https://dalgazette.com/news/a/".to_string());
        let json = serde_json::to_value(article).expect("serialize");
        assert_eq!(
            json["imageUrl"],
            "https://dalgazette.com/wp-content/uploads/a.jpg"
        );
        assert_eq!(json["url"], "https://dalgazette.com/news/a/");
    }

    #[test]
    fn category_defaults_to_news() {
        assert_eq!(Category::default(), Category::News);
    }

    #[test]
    fn category_round_trips_through_label() {
        for category in [
            Category::News,
            Category::Opinions,
            Category::ArtsCulture,
            Category::Sports,
        ] {
            let json = serde_json::to_string(&category).expect("serialize");
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: Category = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, category);
        }
    }
}
