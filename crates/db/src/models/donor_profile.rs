//! Donor profile model and DTOs.

use bns_core::types::{Date, DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donor_profiles` table, joined with the owning user's
/// email and display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonorProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub user_email: String,
    pub user_name: String,
    pub donor_type: String,
    pub tax_id: String,
    pub billing_address: String,
    pub total_donated: Money,
    pub donation_count: i32,
    pub first_donation_date: Option<Date>,
    pub last_donation_date: Option<Date>,
    pub is_recurring_donor: bool,
    pub preferred_payment_method: String,
    pub communication_preferences: serde_json::Value,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonorProfile {
    pub user_id: DbId,
    pub donor_type: Option<String>,
    pub tax_id: Option<String>,
    pub billing_address: Option<String>,
    pub is_recurring_donor: Option<bool>,
    pub preferred_payment_method: Option<String>,
    pub communication_preferences: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// Donation totals are maintained by the record-donation action and are
/// not writable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDonorProfile {
    pub donor_type: Option<String>,
    pub tax_id: Option<String>,
    pub billing_address: Option<String>,
    pub is_recurring_donor: Option<bool>,
    pub preferred_payment_method: Option<String>,
    pub communication_preferences: Option<serde_json::Value>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DonorQuery {
    pub donor_type: Option<String>,
    pub is_recurring_donor: Option<bool>,
}
