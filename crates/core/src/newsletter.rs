//! Newsletter rules: subscriber double opt-in, campaign status transitions,
//! engagement rates and the derived delivery status of an email log.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Subscriber choices
// ---------------------------------------------------------------------------

pub const SUBSCRIBER_PENDING: &str = "pending";
pub const SUBSCRIBER_ACTIVE: &str = "active";
pub const SUBSCRIBER_UNSUBSCRIBED: &str = "unsubscribed";
pub const SUBSCRIBER_BOUNCED: &str = "bounced";
pub const SUBSCRIBER_COMPLAINED: &str = "complained";

pub const VALID_SUBSCRIBER_STATUSES: &[&str] = &[
    SUBSCRIBER_PENDING,
    SUBSCRIBER_ACTIVE,
    SUBSCRIBER_UNSUBSCRIBED,
    SUBSCRIBER_BOUNCED,
    SUBSCRIBER_COMPLAINED,
];

pub const VALID_CONTENT_PREFERENCES: &[&str] = &[
    "all",
    "videos_only",
    "blogs_only",
    "weekly_digest",
    "monthly_roundup",
];

pub const DEFAULT_CONTENT_PREFERENCE: &str = "all";

// ---------------------------------------------------------------------------
// Campaign choices
// ---------------------------------------------------------------------------

pub const CAMPAIGN_DRAFT: &str = "draft";
pub const CAMPAIGN_SCHEDULED: &str = "scheduled";
pub const CAMPAIGN_SENDING: &str = "sending";
pub const CAMPAIGN_SENT: &str = "sent";
pub const CAMPAIGN_PAUSED: &str = "paused";
pub const CAMPAIGN_CANCELLED: &str = "cancelled";

pub const VALID_CAMPAIGN_STATUSES: &[&str] = &[
    CAMPAIGN_DRAFT,
    CAMPAIGN_SCHEDULED,
    CAMPAIGN_SENDING,
    CAMPAIGN_SENT,
    CAMPAIGN_PAUSED,
    CAMPAIGN_CANCELLED,
];

pub const VALID_CAMPAIGN_TYPES: &[&str] = &[
    "weekly_digest",
    "daily_update",
    "breaking_news",
    "monthly_roundup",
    "sponsored",
    "welcome_series",
];

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// `numerator / denominator * 100`, rounded to two decimals. Zero when the
/// denominator is zero.
pub fn percentage(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let raw = numerator as f64 / denominator as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Subscription flow
// ---------------------------------------------------------------------------

/// What a subscribe request does, given any existing record for the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeAction {
    /// No record yet: insert a pending subscriber with a fresh token.
    Create,
    /// A pending record exists: report that confirmation was resent.
    ResendConfirmation,
    /// A lapsed record (unsubscribed, bounced, complained): reset it to
    /// pending with a fresh token.
    Resubscribe,
}

/// Decide how to handle a subscribe request for an email whose current
/// status is `existing` (if the email is known).
///
/// Active subscribers are rejected with "Already subscribed".
pub fn subscribe_action(existing: Option<&str>) -> Result<SubscribeAction, CoreError> {
    match existing {
        None => Ok(SubscribeAction::Create),
        Some(SUBSCRIBER_ACTIVE) => Err(CoreError::Validation("Already subscribed".into())),
        Some(SUBSCRIBER_PENDING) => Ok(SubscribeAction::ResendConfirmation),
        Some(_) => Ok(SubscribeAction::Resubscribe),
    }
}

/// A confirmation token moves only a pending subscriber to active.
pub fn ensure_can_confirm(status: &str) -> Result<(), CoreError> {
    if status == SUBSCRIBER_PENDING {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid token".into()))
    }
}

/// Whether an unsubscribe request should change the record. Repeating an
/// unsubscribe is accepted but leaves the original timestamp alone.
pub fn unsubscribe_changes_record(status: &str) -> bool {
    status != SUBSCRIBER_UNSUBSCRIBED
}

/// Check a status set directly by staff. Activation only happens through
/// the confirmation link, so staff may unsubscribe pending or active
/// readers and flag active ones as bounced or complained. Re-sending the
/// current status is a no-op.
pub fn ensure_staff_status_change(current: &str, requested: &str) -> Result<(), CoreError> {
    if current == requested {
        return Ok(());
    }
    let allowed = match requested {
        SUBSCRIBER_UNSUBSCRIBED => matches!(current, SUBSCRIBER_ACTIVE | SUBSCRIBER_PENDING),
        SUBSCRIBER_BOUNCED | SUBSCRIBER_COMPLAINED => current == SUBSCRIBER_ACTIVE,
        _ => false,
    };
    if allowed {
        Ok(())
    } else if requested == SUBSCRIBER_ACTIVE {
        Err(CoreError::Validation(
            "Subscribers become active only by confirming their email".into(),
        ))
    } else {
        Err(CoreError::Validation(format!(
            "Cannot change subscriber status from '{current}' to '{requested}'"
        )))
    }
}

/// Validate and normalise a subscriber email (trimmed, lowercased).
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    if email.validate_email() {
        Ok(email)
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

// ---------------------------------------------------------------------------
// Campaign transitions
// ---------------------------------------------------------------------------

/// Only drafts can be queued for sending.
pub fn ensure_can_send(status: &str) -> Result<(), CoreError> {
    if status == CAMPAIGN_DRAFT {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Campaign cannot be sent in current status".into(),
        ))
    }
}

/// A campaign is marked sent once delivery has been scheduled or started.
pub fn ensure_can_mark_sent(status: &str) -> Result<(), CoreError> {
    if status == CAMPAIGN_SCHEDULED || status == CAMPAIGN_SENDING {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Campaign in status '{status}' cannot be marked sent"
        )))
    }
}

// ---------------------------------------------------------------------------
// Email log status
// ---------------------------------------------------------------------------

/// Delivery milestones recorded on an email log.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryMilestones {
    pub sent_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub opened_at: Option<Timestamp>,
    pub clicked_at: Option<Timestamp>,
    pub bounced_at: Option<Timestamp>,
    pub complained_at: Option<Timestamp>,
}

/// The most significant milestone reached, by precedence
/// complained > bounced > clicked > opened > delivered > sent > pending.
pub fn email_log_status(m: &DeliveryMilestones) -> &'static str {
    if m.complained_at.is_some() {
        "complained"
    } else if m.bounced_at.is_some() {
        "bounced"
    } else if m.clicked_at.is_some() {
        "clicked"
    } else if m.opened_at.is_some() {
        "opened"
    } else if m.delivered_at.is_some() {
        "delivered"
    } else if m.sent_at.is_some() {
        "sent"
    } else {
        "pending"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    // -- percentage ----------------------------------------------------------

    #[test]
    fn percentage_of_zero_denominator_is_zero() {
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(50, 200), 25.0);
    }

    // -- subscribe -----------------------------------------------------------

    #[test]
    fn new_email_creates_subscriber() {
        assert_eq!(subscribe_action(None).unwrap(), SubscribeAction::Create);
    }

    #[test]
    fn active_email_is_rejected() {
        let err = subscribe_action(Some(SUBSCRIBER_ACTIVE)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Already subscribed");
    }

    #[test]
    fn pending_email_resends() {
        assert_eq!(
            subscribe_action(Some(SUBSCRIBER_PENDING)).unwrap(),
            SubscribeAction::ResendConfirmation
        );
    }

    #[test]
    fn lapsed_emails_resubscribe() {
        for status in [SUBSCRIBER_UNSUBSCRIBED, SUBSCRIBER_BOUNCED, SUBSCRIBER_COMPLAINED] {
            assert_eq!(subscribe_action(Some(status)).unwrap(), SubscribeAction::Resubscribe);
        }
    }

    #[test]
    fn only_pending_can_confirm() {
        assert!(ensure_can_confirm(SUBSCRIBER_PENDING).is_ok());
        assert!(ensure_can_confirm(SUBSCRIBER_ACTIVE).is_err());
    }

    #[test]
    fn repeat_unsubscribe_is_noop() {
        assert!(unsubscribe_changes_record(SUBSCRIBER_ACTIVE));
        assert!(!unsubscribe_changes_record(SUBSCRIBER_UNSUBSCRIBED));
    }

    #[test]
    fn staff_cannot_activate_subscribers() {
        assert_matches!(
            ensure_staff_status_change(SUBSCRIBER_PENDING, SUBSCRIBER_ACTIVE),
            Err(CoreError::Validation(msg)) if msg.contains("confirming")
        );
        assert!(ensure_staff_status_change(SUBSCRIBER_UNSUBSCRIBED, SUBSCRIBER_ACTIVE).is_err());
        assert!(ensure_staff_status_change(SUBSCRIBER_ACTIVE, SUBSCRIBER_PENDING).is_err());
    }

    #[test]
    fn staff_status_changes_follow_lifecycle() {
        assert!(ensure_staff_status_change(SUBSCRIBER_PENDING, SUBSCRIBER_UNSUBSCRIBED).is_ok());
        assert!(ensure_staff_status_change(SUBSCRIBER_ACTIVE, SUBSCRIBER_BOUNCED).is_ok());
        assert!(ensure_staff_status_change(SUBSCRIBER_ACTIVE, SUBSCRIBER_COMPLAINED).is_ok());
        assert!(ensure_staff_status_change(SUBSCRIBER_PENDING, SUBSCRIBER_BOUNCED).is_err());
        assert!(ensure_staff_status_change(SUBSCRIBER_ACTIVE, SUBSCRIBER_ACTIVE).is_ok());
    }

    #[test]
    fn emails_are_normalised() {
        assert_eq!(normalize_email("  Reader@Example.COM ").unwrap(), "reader@example.com");
        assert!(normalize_email("not-an-email").is_err());
    }

    // -- campaigns -----------------------------------------------------------

    #[test]
    fn only_drafts_can_be_sent() {
        assert!(ensure_can_send(CAMPAIGN_DRAFT).is_ok());
        for status in [CAMPAIGN_SCHEDULED, CAMPAIGN_SENT, CAMPAIGN_CANCELLED] {
            assert!(ensure_can_send(status).is_err());
        }
    }

    #[test]
    fn mark_sent_requires_scheduled_or_sending() {
        assert!(ensure_can_mark_sent(CAMPAIGN_SCHEDULED).is_ok());
        assert!(ensure_can_mark_sent(CAMPAIGN_SENDING).is_ok());
        assert!(ensure_can_mark_sent(CAMPAIGN_DRAFT).is_err());
    }

    // -- email log status ----------------------------------------------------

    #[test]
    fn empty_log_is_pending() {
        assert_eq!(email_log_status(&DeliveryMilestones::default()), "pending");
    }

    #[test]
    fn complaint_outranks_everything() {
        let now = Utc::now();
        let m = DeliveryMilestones {
            sent_at: Some(now),
            delivered_at: Some(now),
            opened_at: Some(now),
            clicked_at: Some(now),
            bounced_at: Some(now),
            complained_at: Some(now),
        };
        assert_eq!(email_log_status(&m), "complained");
    }

    #[test]
    fn click_outranks_open() {
        let now = Utc::now();
        let m = DeliveryMilestones {
            sent_at: Some(now),
            opened_at: Some(now),
            clicked_at: Some(now),
            ..Default::default()
        };
        assert_eq!(email_log_status(&m), "clicked");
    }
}
