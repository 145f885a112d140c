//! Organisation profile singleton and its public projections.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of `organization_profile`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationProfile {
    pub id: DbId,
    pub organization_name: String,
    pub consortium_name: String,
    pub tagline: String,
    pub brand_promise: String,
    pub description: String,
    pub vision: String,
    pub mission: String,
    pub headquarters: String,
    pub registration_country: String,
    pub year_established: i32,
    pub email_general: String,
    pub email_partnerships: String,
    pub email_media: String,
    pub phone: String,
    pub website: String,
    pub tiktok: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
    pub facebook: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub alert_color: String,
    pub success_color: String,
    pub neutral_dark: String,
    pub neutral_light: String,
    pub countries_reached: i32,
    pub budget_reports_analyzed: i32,
    pub citizens_engaged: i32,
    pub youth_champion_trainings: i32,
    pub partner_organizations: i32,
    pub programs_delivered: i32,
    pub is_independent: bool,
    pub is_non_partisan: bool,
    pub document_version: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Admin patch of the profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrganizationProfile {
    pub organization_name: Option<String>,
    pub consortium_name: Option<String>,
    pub tagline: Option<String>,
    pub brand_promise: Option<String>,
    pub description: Option<String>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub headquarters: Option<String>,
    pub registration_country: Option<String>,
    pub year_established: Option<i32>,
    pub email_general: Option<String>,
    pub email_partnerships: Option<String>,
    pub email_media: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub tiktok: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub alert_color: Option<String>,
    pub success_color: Option<String>,
    pub neutral_dark: Option<String>,
    pub neutral_light: Option<String>,
    pub countries_reached: Option<i32>,
    pub budget_reports_analyzed: Option<i32>,
    pub citizens_engaged: Option<i32>,
    pub youth_champion_trainings: Option<i32>,
    pub partner_organizations: Option<i32>,
    pub programs_delivered: Option<i32>,
    pub is_independent: Option<bool>,
    pub is_non_partisan: Option<bool>,
    pub document_version: Option<String>,
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ImpactStatistics {
    pub countries_reached: i32,
    pub budget_reports_analyzed: i32,
    pub citizens_engaged: i32,
    pub youth_champion_trainings: i32,
    pub partner_organizations: i32,
    pub programs_delivered: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandIdentity {
    pub organization_name: String,
    pub tagline: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub alert_color: String,
    pub success_color: String,
    pub neutral_dark: String,
    pub neutral_light: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialHandles {
    pub tiktok: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
    pub facebook: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactInfo {
    pub organization_name: String,
    pub headquarters: String,
    pub email_general: String,
    pub email_partnerships: String,
    pub email_media: String,
    pub phone: String,
    pub website: String,
    #[serde(flatten)]
    pub social: SocialHandles,
}

/// Everything safe to show anonymously: identity, mission, location,
/// public contact addresses, social handles, brand and impact figures.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub organization_name: String,
    pub consortium_name: String,
    pub tagline: String,
    pub brand_promise: String,
    pub description: String,
    pub vision: String,
    pub mission: String,
    pub headquarters: String,
    pub registration_country: String,
    pub year_established: i32,
    pub email_general: String,
    pub email_partnerships: String,
    pub email_media: String,
    pub website: String,
    #[serde(flatten)]
    pub social: SocialHandles,
    #[serde(flatten)]
    pub brand: BrandColors,
    #[serde(flatten)]
    pub impact: ImpactStatistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandColors {
    pub primary_color: String,
    pub secondary_color: String,
    pub alert_color: String,
    pub success_color: String,
    pub neutral_dark: String,
    pub neutral_light: String,
}

impl OrganizationProfile {
    fn social(&self) -> SocialHandles {
        SocialHandles {
            tiktok: self.tiktok.clone(),
            instagram: self.instagram.clone(),
            twitter: self.twitter.clone(),
            youtube: self.youtube.clone(),
            facebook: self.facebook.clone(),
        }
    }

    fn colors(&self) -> BrandColors {
        BrandColors {
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            alert_color: self.alert_color.clone(),
            success_color: self.success_color.clone(),
            neutral_dark: self.neutral_dark.clone(),
            neutral_light: self.neutral_light.clone(),
        }
    }

    pub fn impact(&self) -> ImpactStatistics {
        ImpactStatistics {
            countries_reached: self.countries_reached,
            budget_reports_analyzed: self.budget_reports_analyzed,
            citizens_engaged: self.citizens_engaged,
            youth_champion_trainings: self.youth_champion_trainings,
            partner_organizations: self.partner_organizations,
            programs_delivered: self.programs_delivered,
        }
    }

    pub fn brand(&self) -> BrandIdentity {
        let colors = self.colors();
        BrandIdentity {
            organization_name: self.organization_name.clone(),
            tagline: self.tagline.clone(),
            primary_color: colors.primary_color,
            secondary_color: colors.secondary_color,
            alert_color: colors.alert_color,
            success_color: colors.success_color,
            neutral_dark: colors.neutral_dark,
            neutral_light: colors.neutral_light,
        }
    }

    pub fn contact(&self) -> ContactInfo {
        ContactInfo {
            organization_name: self.organization_name.clone(),
            headquarters: self.headquarters.clone(),
            email_general: self.email_general.clone(),
            email_partnerships: self.email_partnerships.clone(),
            email_media: self.email_media.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            social: self.social(),
        }
    }

    pub fn public(&self) -> PublicProfile {
        PublicProfile {
            organization_name: self.organization_name.clone(),
            consortium_name: self.consortium_name.clone(),
            tagline: self.tagline.clone(),
            brand_promise: self.brand_promise.clone(),
            description: self.description.clone(),
            vision: self.vision.clone(),
            mission: self.mission.clone(),
            headquarters: self.headquarters.clone(),
            registration_country: self.registration_country.clone(),
            year_established: self.year_established,
            email_general: self.email_general.clone(),
            email_partnerships: self.email_partnerships.clone(),
            email_media: self.email_media.clone(),
            website: self.website.clone(),
            social: self.social(),
            brand: self.colors(),
            impact: self.impact(),
        }
    }
}
