//! JSON Feed 1.1 document types (<https://jsonfeed.org/version/1.1>).
//!
//! Field order matches the order the fields are serialized in.

use serde::Serialize;

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

/// Top-level feed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonFeed {
    pub version: &'static str,
    pub title: String,
    pub home_page_url: String,
    pub icon: String,
    pub items: Vec<FeedItem>,
}

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content_html: String,
    pub image: String,
    pub date_published: String,
}
