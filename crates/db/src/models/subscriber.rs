//! Newsletter subscriber model and DTOs.

use bns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscribers` table.
///
/// The confirmation token is a capability; it is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub content_preference: String,
    pub status: String,
    pub subscribed_at: Option<Timestamp>,
    pub unsubscribed_at: Option<Timestamp>,
    pub unsubscribe_reason: String,
    pub source: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub emails_sent: i32,
    pub emails_opened: i32,
    pub emails_clicked: i32,
    pub last_opened_at: Option<Timestamp>,
    pub last_clicked_at: Option<Timestamp>,
    #[serde(skip_serializing)]
    pub confirmation_token: Option<String>,
    pub confirmed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public subscribe request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub content_preference: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
}

/// Insert DTO assembled by the subscribe handler.
#[derive(Debug, Clone)]
pub struct CreateSubscriber {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub content_preference: String,
    pub source: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub confirmation_token: String,
}

/// Staff patch of a subscriber.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubscriber {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub content_preference: Option<String>,
    pub status: Option<String>,
    pub category_ids: Option<Vec<DbId>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscriberQuery {
    pub status: Option<String>,
    pub content_preference: Option<String>,
    pub search: Option<String>,
}
