//! Per-recipient email log model.

use bns_core::newsletter::DeliveryMilestones;
use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `email_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmailLog {
    pub id: DbId,
    pub campaign_id: DbId,
    pub subscriber_id: DbId,
    pub message_id: String,
    pub sent_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub opened_at: Option<Timestamp>,
    pub clicked_at: Option<Timestamp>,
    pub bounced_at: Option<Timestamp>,
    pub complained_at: Option<Timestamp>,
    pub clicked_links: serde_json::Value,
    pub created_at: Timestamp,
}

impl EmailLog {
    pub fn milestones(&self) -> DeliveryMilestones {
        DeliveryMilestones {
            sent_at: self.sent_at,
            delivered_at: self.delivered_at,
            opened_at: self.opened_at,
            clicked_at: self.clicked_at,
            bounced_at: self.bounced_at,
            complained_at: self.complained_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailLogQuery {
    pub campaign: Option<DbId>,
    pub subscriber: Option<DbId>,
}

/// Body of the click-tracking action.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackClick {
    pub url: String,
}

/// Staff record of a campaign email handed to the mail provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSend {
    pub campaign_id: DbId,
    pub subscriber_id: DbId,
    pub message_id: Option<String>,
}
