//! Donations, donor totals and sponsorship deliverables.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::newsletter::percentage;
use crate::types::{Date, DbId, Money};

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

pub const VALID_DONOR_TYPES: &[&str] = &["individual", "corporate", "foundation", "institutional"];

pub const VALID_SPONSOR_LEVELS: &[&str] = &["bronze", "silver", "gold", "platinum", "strategic"];

pub const VALID_PAYMENT_METHODS: &[&str] = &["mpesa", "bank", "card", "paypal", "crypto"];

pub const VALID_RECURRING_FREQUENCIES: &[&str] = &["monthly", "quarterly", "yearly"];

pub const DEFAULT_CURRENCY: &str = "KES";

pub const DONATION_PENDING: &str = "pending";
pub const DONATION_COMPLETED: &str = "completed";
pub const DONATION_FAILED: &str = "failed";
pub const DONATION_REFUNDED: &str = "refunded";

pub const VALID_DONATION_STATUSES: &[&str] = &[
    DONATION_PENDING,
    DONATION_COMPLETED,
    DONATION_FAILED,
    DONATION_REFUNDED,
];

pub const DELIVERABLE_PENDING: &str = "pending";
pub const DELIVERABLE_IN_PROGRESS: &str = "in_progress";
pub const DELIVERABLE_COMPLETED: &str = "completed";
pub const DELIVERABLE_OVERDUE: &str = "overdue";

pub const VALID_DELIVERABLE_STATUSES: &[&str] = &[
    DELIVERABLE_PENDING,
    DELIVERABLE_IN_PROGRESS,
    DELIVERABLE_COMPLETED,
    DELIVERABLE_OVERDUE,
];

pub const DELIVERABLE_DEDICATED_CONTENT: &str = "dedicated_content";

pub const VALID_DELIVERABLE_TYPES: &[&str] = &[
    "logo_display",
    DELIVERABLE_DEDICATED_CONTENT,
    "event_presence",
    "newsletter_mention",
    "social_shoutout",
];

/// Deliverable types that count as a brand mention.
pub const BRAND_MENTION_TYPES: &[&str] = &["newsletter_mention", "social_shoutout"];

pub const VALID_ASSET_TYPES: &[&str] = &["logo", "guidelines", "ad_creative", "photo", "other"];

/// Number of sponsors listed in the dashboard's top-sponsor table.
pub const TOP_SPONSOR_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

/// Donation amounts must be strictly positive.
pub fn validate_amount(amount: Money) -> Result<(), CoreError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Donation amount must be greater than zero".into(),
        ))
    }
}

/// Recurring donations need a frequency; one-off donations must not have one.
pub fn validate_recurrence(is_recurring: bool, frequency: Option<&str>) -> Result<(), CoreError> {
    match (is_recurring, frequency) {
        (true, None) => Err(CoreError::Validation(
            "Recurring donations require a recurring_frequency".into(),
        )),
        (false, Some(_)) => Err(CoreError::Validation(
            "recurring_frequency is only valid for recurring donations".into(),
        )),
        (_, Some(f)) => crate::choices::validate_choice(
            "recurring_frequency",
            f,
            VALID_RECURRING_FREQUENCIES,
        ),
        (false, None) => Ok(()),
    }
}

/// Allowed donation status transitions:
/// pending -> completed | failed, completed -> refunded.
pub fn ensure_donation_transition(from: &str, to: &str) -> Result<(), CoreError> {
    let allowed = matches!(
        (from, to),
        (DONATION_PENDING, DONATION_COMPLETED)
            | (DONATION_PENDING, DONATION_FAILED)
            | (DONATION_COMPLETED, DONATION_REFUNDED)
    );
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Donation cannot move from '{from}' to '{to}'"
        )))
    }
}

/// Receipt number issued when a donation completes: `BNS-YYYYMMDD-000042`.
pub fn receipt_number(donation_id: DbId, completed_on: Date) -> String {
    format!(
        "BNS-{:04}{:02}{:02}-{donation_id:06}",
        completed_on.year(),
        completed_on.month(),
        completed_on.day()
    )
}

/// Running totals kept on a donor profile.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorTotals {
    pub total_donated: Money,
    pub donation_count: i32,
    pub first_donation_date: Option<Date>,
    pub last_donation_date: Option<Date>,
}

impl DonorTotals {
    /// Fold one donation of `amount` made on `today` into the totals.
    pub fn record(&self, amount: Money, today: Date) -> Result<Self, CoreError> {
        validate_amount(amount)?;
        Ok(Self {
            total_donated: self.total_donated + amount,
            donation_count: self.donation_count + 1,
            first_donation_date: self.first_donation_date.or(Some(today)),
            last_donation_date: Some(today),
        })
    }
}

// ---------------------------------------------------------------------------
// Deliverables
// ---------------------------------------------------------------------------

/// Delivered share of a deliverable, as a percentage rounded to two
/// decimals; zero when nothing is required.
pub fn completion_percentage(delivered: i32, required: i32) -> f64 {
    percentage(i64::from(delivered), i64::from(required))
}

/// A deliverable is overdue when it is not completed and its due date has
/// passed.
pub fn is_overdue(status: &str, due_date: Date, today: Date) -> bool {
    status != DELIVERABLE_COMPLETED && due_date < today
}

/// Status once `delivered` units have been delivered. Reaching the required
/// quantity completes the deliverable; any progress moves a pending one to
/// in progress.
pub fn status_after_progress(current: &str, delivered: i32, required: i32) -> &'static str {
    if delivered >= required {
        DELIVERABLE_COMPLETED
    } else if delivered > 0 {
        DELIVERABLE_IN_PROGRESS
    } else if current == DELIVERABLE_OVERDUE {
        DELIVERABLE_OVERDUE
    } else {
        DELIVERABLE_PENDING
    }
}

/// Validate a progress increment against the deliverable.
pub fn validate_progress(status: &str, added: i32) -> Result<(), CoreError> {
    if added <= 0 {
        return Err(CoreError::Validation(
            "quantity must be a positive number".into(),
        ));
    }
    if status == DELIVERABLE_COMPLETED {
        return Err(CoreError::Validation(
            "Deliverable is already completed".into(),
        ));
    }
    Ok(())
}

/// Contracted dedicated-content pieces not yet delivered.
pub fn content_pieces_remaining(contracted: i32, delivered: i64) -> i64 {
    (i64::from(contracted) - delivered).max(0)
}

/// First day of the month containing `today`.
pub fn month_start(today: Date) -> Date {
    today.with_day(1).unwrap_or(today)
}
