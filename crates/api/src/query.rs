//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use bns_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by every list endpoint. Values are clamped on read: the limit
/// defaults to 20 and is capped at 100, the offset is never negative.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        clamp_offset(self.offset)
    }
}

/// `?sponsor_id=` for the sponsor-asset `by-sponsor` action.
#[derive(Debug, Deserialize)]
pub struct SponsorIdParam {
    pub sponsor_id: Option<bns_core::types::DbId>,
}

/// `?video_id=` for the engagement `by-video` action.
#[derive(Debug, Deserialize)]
pub struct VideoIdParam {
    pub video_id: Option<bns_core::types::DbId>,
}

/// `?location=` for the menu `by-location` action.
#[derive(Debug, Deserialize)]
pub struct LocationParam {
    pub location: Option<String>,
}

/// `?category=` for the settings `by-category` action.
#[derive(Debug, Deserialize)]
pub struct CategoryParam {
    pub category: Option<String>,
}

/// `?type=` for the widget and media `by-type` actions.
#[derive(Debug, Deserialize)]
pub struct TypeParam {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// `?folder=` for the media `by-folder` action.
#[derive(Debug, Deserialize)]
pub struct FolderParam {
    pub folder: Option<String>,
}
