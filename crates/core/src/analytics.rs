//! Analytics constants and the user-agent sniffing applied to recorded
//! page views.

use crate::error::CoreError;
use crate::types::Date;

pub const VALID_ENGAGEMENT_EVENTS: &[&str] =
    &["play", "pause", "complete", "seek", "mute", "unmute"];

/// Donor funnel stages, in journey order.
pub const FUNNEL_STAGES: &[&str] = &[
    "awareness",
    "interest",
    "consideration",
    "donation",
    "retention",
    "advocacy",
];

pub const VALID_DEVICE_TYPES: &[&str] = &["desktop", "mobile", "tablet", "bot"];

/// Look-back window for `views_this_week`.
pub const SUMMARY_WINDOW_DAYS: i64 = 7;

/// Number of paths listed in the page-view summary.
pub const TOP_PAGES_LIMIT: i64 = 10;

/// Position of a funnel stage in the donor journey (unknown stages last).
pub fn funnel_position(stage: &str) -> usize {
    FUNNEL_STAGES
        .iter()
        .position(|s| *s == stage)
        .unwrap_or(FUNNEL_STAGES.len())
}

/// Reject a date range whose start falls after its end.
pub fn validate_date_range(start: Option<Date>, end: Option<Date>) -> Result<(), CoreError> {
    match (start, end) {
        (Some(s), Some(e)) if s > e => Err(CoreError::Validation(
            "start_date must not be after end_date".into(),
        )),
        _ => Ok(()),
    }
}

/// Device, browser and OS inferred from a `User-Agent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub device_type: &'static str,
    pub browser: &'static str,
    pub os: &'static str,
}

/// Coarse user-agent classification. Order matters: Edge and Opera
/// advertise Chrome, Chrome advertises Safari.
pub fn classify_user_agent(user_agent: &str) -> ClientInfo {
    let ua = user_agent.to_ascii_lowercase();

    let device_type = if ua.contains("bot") || ua.contains("spider") || ua.contains("crawl") {
        "bot"
    } else if ua.contains("ipad") || ua.contains("tablet") {
        "tablet"
    } else if ua.contains("mobile") || ua.contains("android") || ua.contains("iphone") {
        "mobile"
    } else {
        "desktop"
    };

    let browser = if ua.contains("edg/") {
        "Edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("firefox") {
        "Firefox"
    } else if ua.contains("chrome") || ua.contains("crios") {
        "Chrome"
    } else if ua.contains("safari") {
        "Safari"
    } else {
        "Other"
    };

    let os = if ua.contains("android") {
        "Android"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
        "iOS"
    } else if ua.contains("windows") {
        "Windows"
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        "macOS"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        "Other"
    };

    ClientInfo {
        device_type,
        browser,
        os,
    }
}
