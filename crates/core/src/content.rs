//! Content publishing rules: choice sets, read time, thumbnails, embed
//! snippets and the "time since" phrase shown on news items.

use chrono::Duration;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

pub const PLATFORM_TIKTOK: &str = "tiktok";
pub const PLATFORM_YOUTUBE: &str = "youtube";
pub const PLATFORM_X: &str = "x";
pub const PLATFORM_FACEBOOK: &str = "facebook";
pub const PLATFORM_INSTAGRAM: &str = "instagram";

pub const VALID_PLATFORMS: &[&str] = &[
    PLATFORM_TIKTOK,
    PLATFORM_YOUTUBE,
    PLATFORM_X,
    PLATFORM_FACEBOOK,
    PLATFORM_INSTAGRAM,
];

pub const VALID_VIDEO_CONTENT_TYPES: &[&str] = &[
    "budget_basics",
    "finance_bill",
    "national_budget",
    "county_budget",
    "sector_deep_dive",
    "tracker_story",
    "youth_voice",
];

pub const VALID_DIFFICULTY_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

pub const VALID_POST_TYPES: &[&str] = &[
    "investigation",
    "explainer",
    "update",
    "field_report",
    "opinion",
    "sponsored",
];

pub const POST_STATUS_DRAFT: &str = "draft";
pub const POST_STATUS_REVIEW: &str = "review";
pub const POST_STATUS_PUBLISHED: &str = "published";
pub const POST_STATUS_ARCHIVED: &str = "archived";

pub const VALID_POST_STATUSES: &[&str] = &[
    POST_STATUS_DRAFT,
    POST_STATUS_REVIEW,
    POST_STATUS_PUBLISHED,
    POST_STATUS_ARCHIVED,
];

/// Number of videos returned by the `featured` action.
pub const FEATURED_VIDEO_LIMIT: i64 = 6;

/// Number of videos returned per platform by the `by-platform` action.
pub const PER_PLATFORM_LIMIT: i64 = 12;

/// Number of related posts returned by the `related` action.
pub const RELATED_POST_LIMIT: i64 = 3;

/// Number of breaking news items returned by the `breaking` action.
pub const BREAKING_NEWS_LIMIT: i64 = 3;

/// Maximum SEO title length.
pub const MAX_META_TITLE_LENGTH: usize = 70;

/// Maximum SEO description length.
pub const MAX_META_DESCRIPTION_LENGTH: usize = 160;

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Average reading speed used for `read_time_minutes`.
const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time: whole minutes at 200 words per minute, never
/// less than one.
pub fn read_time_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    (words / WORDS_PER_MINUTE).max(1) as i32
}

/// The thumbnail to show for a video: the stored URL when set, the YouTube
/// still for YouTube videos, an empty string otherwise.
pub fn video_thumbnail_url(platform: &str, external_id: &str, stored: Option<&str>) -> String {
    match stored.filter(|s| !s.is_empty()) {
        Some(url) => url.to_string(),
        None if platform == PLATFORM_YOUTUBE => {
            format!("https://img.youtube.com/vi/{external_id}/maxresdefault.jpg")
        }
        None => String::new(),
    }
}

/// HTML snippet embedding the video on a page. Only YouTube and TikTok
/// have embeds; other platforms yield an empty string.
pub fn embed_code(platform: &str, external_id: &str, external_url: &str) -> String {
    match platform {
        PLATFORM_YOUTUBE => format!(
            concat!(
                r#"<iframe src="https://www.youtube.com/embed/{}" "#,
                r#"frameborder="0" allowfullscreen></iframe>"#
            ),
            external_id
        ),
        PLATFORM_TIKTOK => format!(
            concat!(
                r#"<blockquote class="tiktok-embed" cite="{}" "#,
                r#"data-video-id="{}"></blockquote>"#
            ),
            external_url, external_id
        ),
        _ => String::new(),
    }
}

/// Total playlist duration in whole minutes from per-video seconds.
pub fn total_duration_minutes(durations_seconds: &[i32]) -> i64 {
    durations_seconds.iter().map(|s| i64::from(*s)).sum::<i64>() / 60
}

/// A published item is publicly visible once its publish time has passed.
pub fn is_live(published_at: Option<Timestamp>, now: Timestamp) -> bool {
    published_at.is_some_and(|at| at <= now)
}

/// News items drop out of public listings once they expire.
pub fn is_news_current(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.map_or(true, |at| at > now)
}

// ---------------------------------------------------------------------------
// Time since
// ---------------------------------------------------------------------------

const TIME_UNITS: &[(i64, &str)] = &[
    (60 * 24 * 365, "year"),
    (60 * 24 * 30, "month"),
    (60 * 24 * 7, "week"),
    (60 * 24, "day"),
    (60, "hour"),
    (1, "minute"),
];

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Human phrase for the time elapsed between `from` and `to`, using at most
/// two adjacent units ("2 days, 3 hours"). Anything under a minute, or a
/// `from` in the future, reads "0 minutes".
pub fn time_since(from: Timestamp, to: Timestamp) -> String {
    let minutes = (to - from).max(Duration::zero()).num_minutes();
    let Some(first) = TIME_UNITS.iter().position(|(size, _)| minutes >= *size) else {
        return pluralize(0, "minute");
    };

    let (size, unit) = TIME_UNITS[first];
    let count = minutes / size;
    let mut phrase = pluralize(count, unit);

    if let Some((next_size, next_unit)) = TIME_UNITS.get(first + 1) {
        let rest = (minutes - count * size) / next_size;
        if rest > 0 {
            phrase.push_str(", ");
            phrase.push_str(&pluralize(rest, next_unit));
        }
    }
    phrase
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(h: u32, m: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    // -- read time -----------------------------------------------------------

    #[test]
    fn short_content_reads_in_one_minute() {
        assert_eq!(read_time_minutes("a few words"), 1);
        assert_eq!(read_time_minutes(""), 1);
    }

    #[test]
    fn read_time_floors_word_count() {
        let text = "word ".repeat(650);
        assert_eq!(read_time_minutes(&text), 3);
    }

    // -- thumbnails and embeds -----------------------------------------------

    #[test]
    fn stored_thumbnail_wins() {
        let url = video_thumbnail_url(PLATFORM_YOUTUBE, "abc", Some("https://cdn/x.jpg"));
        assert_eq!(url, "https://cdn/x.jpg");
    }

    #[test]
    fn youtube_thumbnail_fallback() {
        assert_eq!(
            video_thumbnail_url(PLATFORM_YOUTUBE, "abc123", None),
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
    }

    #[test]
    fn other_platforms_have_no_fallback() {
        assert_eq!(video_thumbnail_url(PLATFORM_TIKTOK, "1", Some("")), "");
    }

    #[test]
    fn youtube_embed_is_iframe() {
        let code = embed_code(PLATFORM_YOUTUBE, "abc", "");
        assert!(code.starts_with("<iframe"));
        assert!(code.contains("youtube.com/embed/abc"));
    }

    #[test]
    fn tiktok_embed_is_blockquote() {
        let code = embed_code(PLATFORM_TIKTOK, "99", "https://tiktok.com/@bns/video/99");
        assert!(code.contains(r#"cite="https://tiktok.com/@bns/video/99""#));
        assert!(code.contains(r#"data-video-id="99""#));
    }

    #[test]
    fn instagram_has_no_embed() {
        assert_eq!(embed_code(PLATFORM_INSTAGRAM, "x", "y"), "");
    }

    // -- durations and visibility --------------------------------------------

    #[test]
    fn total_duration_is_whole_minutes() {
        assert_eq!(total_duration_minutes(&[90, 45, 30]), 2);
        assert_eq!(total_duration_minutes(&[]), 0);
    }

    #[test]
    fn future_publish_is_not_live() {
        assert!(!is_live(Some(at(12, 0)), at(11, 0)));
        assert!(is_live(Some(at(10, 0)), at(11, 0)));
        assert!(!is_live(None, at(11, 0)));
    }

    #[test]
    fn expired_news_is_not_current() {
        assert!(is_news_current(None, at(9, 0)));
        assert!(!is_news_current(Some(at(8, 0)), at(9, 0)));
    }

    // -- time since ----------------------------------------------------------

    #[test]
    fn time_since_under_a_minute() {
        assert_eq!(time_since(at(10, 0), at(10, 0)), "0 minutes");
    }

    #[test]
    fn time_since_two_units() {
        assert_eq!(time_since(at(8, 15), at(10, 0)), "1 hour, 45 minutes");
    }

    #[test]
    fn time_since_skips_zero_second_unit() {
        let from = Utc.with_ymd_and_hms(2025, 5, 30, 10, 0, 0).unwrap();
        assert_eq!(time_since(from, at(10, 0)), "2 days");
    }

    #[test]
    fn time_since_future_is_zero() {
        assert_eq!(time_since(at(11, 0), at(10, 0)), "0 minutes");
    }
}
