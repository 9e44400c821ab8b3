//! News Service
//!
//! Serves a fixed set of headlines, stamped fresh on every call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

const CATEGORIES: [&str; 5] = ["technology", "employment", "relocation", "startup", "remote-work"];

/// News headline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub published: DateTime<Utc>,
    pub category: String,
}

struct Headline {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    source: &'static str,
    category: &'static str,
}

const HEADLINES: [Headline; 3] = [
    Headline {
        title: "AI Revolution Continues: New Developments in Remote Work",
        description: "Latest advancements in AI technology are transforming how remote teams collaborate...",
        url: "https://example.com/ai-remote-work",
        source: "TechCrunch",
        category: "technology",
    },
    Headline {
        title: "Global Remote Work Market Grows 25% This Quarter",
        description: "The remote work industry shows unprecedented growth with new opportunities emerging...",
        url: "https://example.com/remote-work-growth",
        source: "Forbes",
        category: "employment",
    },
    Headline {
        title: "Best Cities for Remote Workers in 2024",
        description: "Comprehensive guide to the most remote-friendly cities worldwide...",
        url: "https://example.com/best-remote-cities",
        source: "Remote Year",
        category: "relocation",
    },
];

/// News service for business logic
pub struct NewsService;

impl NewsService {
    /// Technology and employment headlines
    pub fn live() -> Vec<NewsItem> {
        info!("NewsService::live");

        let published = Utc::now();
        HEADLINES
            .iter()
            .map(|h| NewsItem {
                id: Uuid::new_v4().to_string(),
                title: h.title.to_string(),
                description: h.description.to_string(),
                url: h.url.to_string(),
                source: h.source.to_string(),
                published,
                category: h.category.to_string(),
            })
            .collect()
    }

    pub fn categories() -> &'static [&'static str] {
        &CATEGORIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_news_has_fresh_ids() {
        let first = NewsService::live();
        let second = NewsService::live();
        assert_eq!(first.len(), 3);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_item_categories_are_listed() {
        for item in NewsService::live() {
            assert!(NewsService::categories().contains(&item.category.as_str()));
        }
    }
}
