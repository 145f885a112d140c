//! Donation model and DTOs.

use bns_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub donor_id: DbId,
    pub amount: Money,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub transaction_id: String,
    pub payment_provider: String,
    pub payment_metadata: serde_json::Value,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub parent_donation_id: Option<DbId>,
    pub receipt_number: Option<String>,
    pub receipt_sent: bool,
    pub campaign_source: String,
    pub landing_page: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonation {
    pub donor_id: DbId,
    pub amount: Money,
    pub currency: Option<String>,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub payment_provider: Option<String>,
    pub payment_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
    pub parent_donation_id: Option<DbId>,
    pub campaign_source: Option<String>,
    pub landing_page: Option<String>,
}

/// Bookkeeping patch. Status moves through the status action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDonation {
    pub transaction_id: Option<String>,
    pub payment_provider: Option<String>,
    pub payment_metadata: Option<serde_json::Value>,
    pub receipt_sent: Option<bool>,
    pub campaign_source: Option<String>,
    pub landing_page: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonationStatusChange {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DonationQuery {
    pub status: Option<String>,
    pub donor: Option<DbId>,
    pub payment_method: Option<String>,
}

/// Totals over completed donations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonationStatistics {
    pub total_raised: Money,
    pub donation_count: i64,
}
