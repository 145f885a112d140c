/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (contract periods, due dates, donation days).
pub type Date = chrono::NaiveDate;

/// Monetary amounts, stored as `NUMERIC(12,2)`.
pub type Money = rust_decimal::Decimal;
