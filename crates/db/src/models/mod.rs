//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the list endpoint filters, a `*Query` struct of its parameters

pub mod blog_post;
pub mod campaign;
pub mod category;
pub mod deliverable;
pub mod donation;
pub mod donor_profile;
pub mod email_log;
pub mod funnel_event;
pub mod media_item;
pub mod menu;
pub mod news_item;
pub mod organization;
pub mod page;
pub mod page_view;
pub mod partner;
pub mod playlist;
pub mod session;
pub mod site_setting;
pub mod sponsor_asset;
pub mod sponsor_profile;
pub mod subscriber;
pub mod user;
pub mod video;
pub mod video_engagement;
pub mod widget;
