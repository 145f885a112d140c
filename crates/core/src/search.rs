//! Query-string helpers shared by every list endpoint: pagination clamping,
//! `ILIKE` pattern building and `?ordering=` parsing.

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Build a case-insensitive substring pattern for `ILIKE`, escaping the
/// wildcard characters in user input. Returns `None` for blank input.
pub fn ilike_pattern(search: Option<&str>) -> Option<String> {
    let term = search?.trim();
    if term.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

/// Parse `?ordering=field` / `?ordering=-field` against a whitelist.
///
/// Returns the SQL `ORDER BY` fragment for an allowed field, or `default`
/// when the parameter is absent or names an unknown column.
pub fn order_clause(ordering: Option<&str>, allowed: &[&str], default: &str) -> String {
    let Some(raw) = ordering.map(str::trim).filter(|s| !s.is_empty()) else {
        return default.to_string();
    };
    let (field, direction) = match raw.strip_prefix('-') {
        Some(field) => (field, "DESC"),
        None => (raw, "ASC"),
    };
    if allowed.contains(&field) {
        format!("{field} {direction}, id DESC")
    } else {
        default.to_string()
    }
}

/// Next/previous `limit`/`offset` pairs for a page, `None` at either edge.
pub fn page_links(count: i64, limit: i64, offset: i64) -> (Option<i64>, Option<i64>) {
    let next = (offset + limit < count).then_some(offset + limit);
    let previous = (offset > 0).then(|| (offset - limit).max(0));
    (next, previous)
}
