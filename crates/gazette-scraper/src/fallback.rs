//! Static placeholder articles served when the live source is unavailable.

use chrono::{DateTime, Duration, Utc};
use gazette_core::{Article, Category};

struct FallbackEntry {
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    category: Category,
    tags: &'static [&'static str],
    hours_ago: i64,
}

const ENTRIES: &[FallbackEntry] = &[
    FallbackEntry {
        title: "Dalhousie Student Union Announces New Sustainability Initiative",
        excerpt: "The DSU has launched a campus-wide program aimed at reducing waste and expanding green spaces.",
        content: "The DSU has launched a campus-wide program aimed at reducing waste and expanding green spaces.\n\nStudents can get involved through society volunteer sign-ups posted at the Student Union Building.",
        category: Category::News,
        tags: &["news", "campus"],
        hours_ago: 2,
    },
    FallbackEntry {
        title: "Tigers Basketball Team Advances to Championship",
        excerpt: "The Dalhousie Tigers secured their spot in the conference final with a decisive home win.",
        content: "The Dalhousie Tigers secured their spot in the conference final with a decisive home win.\n\nThe championship game tips off next weekend at the Dalplex.",
        category: Category::Sports,
        tags: &["sports", "basketball"],
        hours_ago: 5,
    },
    FallbackEntry {
        title: "Library Extends Study Hours for Exam Season",
        excerpt: "The Killam Library will stay open around the clock during the final two weeks of term.",
        content: "The Killam Library will stay open around the clock during the final two weeks of term.\n\nExtra study rooms can be booked online with a student ID.",
        category: Category::News,
        tags: &["news", "campus"],
        hours_ago: 9,
    },
];

/// Returns the placeholder set, timestamped relative to `now`.
#[must_use]
pub fn fallback_articles(now: DateTime<Utc>, staff_author: &str) -> Vec<Article> {
    ENTRIES
        .iter()
        .enumerate()
        .map(|(idx, entry)| Article {
            id: format!("fallback-{}", idx + 1),
            title: entry.title.to_string(),
            excerpt: entry.excerpt.to_string(),
            content: entry.content.to_string(),
            category: entry.category,
            author: staff_author.to_string(),
            published_at: now - Duration::hours(entry.hours_ago),
            image_url: None,
            tags: entry.tags.iter().map(ToString::to_string).collect(),
            url: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_set_has_three_news_or_sports_articles() {
        let articles = fallback_articles(Utc::now(), "Dal Gazette Staff");
        assert_eq!(articles.len(), 3);
        assert!(articles
            .iter()
            .all(|a| matches!(a.category, Category::News | Category::Sports)));
        assert!(articles.iter().any(|a| a.category == Category::Sports));
    }

    #[test]
    fn fallback_ids_are_unique_and_titles_valid() {
        let articles = fallback_articles(Utc::now(), "Staff");
        let mut ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(articles.iter().all(|a| a.title.chars().count() > 10));
        assert!(articles.iter().all(|a| a.author == "Staff"));
    }

    #[test]
    fn fallback_dates_precede_now() {
        let now = Utc::now();
        let articles = fallback_articles(now, "Staff");
        assert!(articles.iter().all(|a| a.published_at < now));
    }
}
