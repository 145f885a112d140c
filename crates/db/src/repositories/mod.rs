//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Steps that must share a
//! transaction take `&mut PgConnection` instead.

mod support;

pub mod blog_post_repo;
pub mod campaign_repo;
pub mod category_repo;
pub mod deliverable_repo;
pub mod donation_repo;
pub mod donor_profile_repo;
pub mod email_log_repo;
pub mod funnel_repo;
pub mod media_repo;
pub mod menu_repo;
pub mod news_item_repo;
pub mod organization_repo;
pub mod page_repo;
pub mod page_view_repo;
pub mod partner_repo;
pub mod playlist_repo;
pub mod session_repo;
pub mod site_setting_repo;
pub mod sponsor_asset_repo;
pub mod sponsor_profile_repo;
pub mod subscriber_repo;
pub mod user_repo;
pub mod video_engagement_repo;
pub mod video_repo;
pub mod widget_repo;

pub use blog_post_repo::BlogPostRepo;
pub use campaign_repo::CampaignRepo;
pub use category_repo::CategoryRepo;
pub use deliverable_repo::DeliverableRepo;
pub use donation_repo::DonationRepo;
pub use donor_profile_repo::DonorProfileRepo;
pub use email_log_repo::EmailLogRepo;
pub use funnel_repo::FunnelRepo;
pub use media_repo::MediaRepo;
pub use menu_repo::MenuRepo;
pub use news_item_repo::NewsItemRepo;
pub use organization_repo::OrganizationRepo;
pub use page_repo::PageRepo;
pub use page_view_repo::PageViewRepo;
pub use partner_repo::PartnerRepo;
pub use playlist_repo::PlaylistRepo;
pub use session_repo::SessionRepo;
pub use site_setting_repo::SiteSettingRepo;
pub use sponsor_asset_repo::SponsorAssetRepo;
pub use sponsor_profile_repo::SponsorProfileRepo;
pub use subscriber_repo::SubscriberRepo;
pub use user_repo::UserRepo;
pub use video_engagement_repo::VideoEngagementRepo;
pub use video_repo::VideoRepo;
pub use widget_repo::WidgetRepo;
