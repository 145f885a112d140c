//! Request handlers grouped by resource.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `bns_db`, apply
//! the domain rules from `bns_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod campaigns;
pub mod categories;
pub mod dashboard;
pub mod deliverables;
pub mod donations;
pub mod donors;
pub mod email_logs;
pub mod engagement;
pub mod funnel;
pub mod media;
pub mod menus;
pub mod news;
pub mod organization;
pub mod page_views;
pub mod pages;
pub mod partners;
pub mod playlists;
pub mod posts;
pub mod settings;
pub mod sponsor_assets;
pub mod sponsor_dashboard;
pub mod sponsors;
pub mod subscribers;
pub mod users;
pub mod videos;
pub mod widgets;
