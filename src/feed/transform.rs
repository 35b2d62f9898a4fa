//! Series listing to JSON Feed mapping.
//!
//! Pure and order preserving: one feed item per upstream item, no filtering,
//! sorting or deduplication. Timestamps are copied as received.

use crate::feed::types::{FeedItem, JsonFeed, JSON_FEED_VERSION};
use crate::series::id::SeriesId;
use crate::series::schema::{SeriesItem, SeriesPage};

const SERIES_PAGE_URL: &str = "https://www.nicovideo.jp/series/";
const WATCH_URL: &str = "https://www.nicovideo.jp/watch/";

/// Referral tag appended to every watch link for traffic attribution.
pub const WATCH_REF: &str = "thirdparty_nicoseriesfeed";

/// Build the feed document for series `id`.
pub fn build_feed(id: &SeriesId, page: SeriesPage) -> JsonFeed {
    JsonFeed {
        version: JSON_FEED_VERSION,
        title: page.detail.title,
        home_page_url: format!("{SERIES_PAGE_URL}{id}"),
        icon: page.detail.thumbnail_url,
        items: page.items.into_iter().map(feed_item).collect(),
    }
}

/// Canonical watch URL for a video.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}{video_id}?ref={WATCH_REF}")
}

fn feed_item(item: SeriesItem) -> FeedItem {
    let video = item.video;
    let url = watch_url(&video.id);
    let content_html = content_html(&url, &video.thumbnail.n_hd_url, &video.short_description);

    FeedItem {
        id: item.meta.id,
        url,
        title: video.title,
        content_html,
        image: video.thumbnail.n_hd_url,
        date_published: video.registered_at,
    }
}

// `description` is inserted as received, without HTML escaping.
fn content_html(url: &str, thumbnail_url: &str, description: &str) -> String {
    format!(
        r#"<a href="{url}"><img src="{thumbnail_url}" style="width: 100%; aspect-ratio: 16 / 9;"></a><p>{description}…</p>"#
    )
}
