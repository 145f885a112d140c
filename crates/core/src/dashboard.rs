//! Decisions behind the HTML dashboard view of API responses.
//!
//! Given a JSON body that a handler already produced, this module decides
//! what kind of page to draw (paginated table, object detail, error, ...),
//! describes each field for display, and turns resource field descriptors
//! into form inputs. It never fails: anything it cannot interpret degrades
//! to a simpler shape.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::choices::display_label;

/// Nested objects are listed down to this many levels; deeper values are
/// shown as raw JSON.
pub const MAX_FIELD_DEPTH: usize = 4;

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

/// JSON type of a value as shown in the dashboard.
pub fn field_type(value: &Value) -> FieldType {
    match value {
        Value::Null => FieldType::Null,
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => FieldType::Integer,
        Value::Number(_) => FieldType::Float,
        Value::String(_) => FieldType::String,
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
    }
}

/// One top-level (or nested) key of an object payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub is_object: bool,
    pub is_list: bool,
    /// Element count for arrays.
    pub count: Option<usize>,
    pub nested_fields: Vec<FieldInfo>,
}

/// Describe every key of `map`, recursing into nested objects up to
/// [`MAX_FIELD_DEPTH`].
pub fn extract_fields(map: &Map<String, Value>) -> Vec<FieldInfo> {
    extract_fields_at(map, 1)
}

fn extract_fields_at(map: &Map<String, Value>, depth: usize) -> Vec<FieldInfo> {
    map.iter()
        .map(|(name, value)| {
            let nested_fields = match value {
                Value::Object(inner) if depth < MAX_FIELD_DEPTH => {
                    extract_fields_at(inner, depth + 1)
                }
                _ => Vec::new(),
            };
            FieldInfo {
                name: name.clone(),
                value: value.clone(),
                field_type: field_type(value),
                is_object: value.is_object(),
                is_list: value.is_array(),
                count: value.as_array().map(Vec::len),
                nested_fields,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload shape
// ---------------------------------------------------------------------------

/// What a response body looks like from the dashboard's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    /// `{count, next, previous, results}`.
    Paginated {
        results: Vec<Value>,
        count: u64,
        next: Option<String>,
        previous: Option<String>,
    },
    /// `{detail}` or the API's `{error, code}` body, with any per-field
    /// messages from its `fields` map.
    Error {
        detail: String,
        code: Option<String>,
        field_errors: Map<String, Value>,
    },
    /// Any other mapping.
    Object {
        object: Map<String, Value>,
        fields: Vec<FieldInfo>,
    },
    /// A bare sequence.
    List { results: Vec<Value>, count: u64 },
    /// A string, number, boolean or null.
    Scalar(Value),
}

/// Strip the `{ "data": ... }` envelope when it is the only key.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Classify a response body. The `data` envelope is removed first.
pub fn classify_payload(value: Value) -> PayloadShape {
    match unwrap_envelope(value) {
        Value::Object(mut map) => {
            if let Some(Value::Array(results)) = map.remove("results") {
                let count = map
                    .get("count")
                    .and_then(Value::as_u64)
                    .unwrap_or(results.len() as u64);
                return PayloadShape::Paginated {
                    count,
                    next: map.get("next").and_then(Value::as_str).map(str::to_string),
                    previous: map.get("previous").and_then(Value::as_str).map(str::to_string),
                    results,
                };
            }
            if let Some(detail) = map.get("detail") {
                return PayloadShape::Error {
                    detail: value_text(detail),
                    code: None,
                    field_errors: Map::new(),
                };
            }
            let field_errors = match map.get("fields") {
                Some(Value::Object(fields)) if map.len() == 3 => Some(fields.clone()),
                None if map.len() == 2 => Some(Map::new()),
                _ => None,
            };
            if let (Some(field_errors), Some(error), Some(Value::String(code))) =
                (field_errors, map.get("error"), map.get("code"))
            {
                return PayloadShape::Error {
                    detail: value_text(error),
                    code: Some(code.clone()),
                    field_errors,
                };
            }
            let fields = extract_fields(&map);
            PayloadShape::Object { object: map, fields }
        }
        Value::Array(results) => PayloadShape::List {
            count: results.len() as u64,
            results,
        },
        scalar => PayloadShape::Scalar(scalar),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Column headers for a table of result rows: the keys of the first object
/// row, in order.
pub fn table_columns(results: &[Value]) -> Vec<String> {
    results
        .iter()
        .find_map(Value::as_object)
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Text shown in a table cell: strings as-is, null as empty, arrays as an
/// item count, objects as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Affordances
// ---------------------------------------------------------------------------

/// Which write controls to offer for a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Affordances {
    pub has_create: bool,
    pub has_update: bool,
    pub has_delete: bool,
}

impl Affordances {
    pub fn from_methods<S: AsRef<str>>(methods: &[S]) -> Self {
        let has = |m: &str| methods.iter().any(|x| x.as_ref().eq_ignore_ascii_case(m));
        Self {
            has_create: has("POST"),
            has_update: has("PUT") || has("PATCH"),
            has_delete: has("DELETE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field descriptors and form fields
// ---------------------------------------------------------------------------

/// Declared kind of a writable resource field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Char,
    Text,
    Choice,
    Boolean,
    Integer,
    Decimal,
    Date,
    DateTime,
    Email,
    Url,
    Json,
}

/// Static description of one resource field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub label: Option<&'static str>,
    pub help_text: &'static str,
    pub max_length: Option<usize>,
    pub choices: &'static [&'static str],
}

impl FieldDescriptor {
    /// An optional, writable field with no extra metadata.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            read_only: false,
            write_only: false,
            label: None,
            help_text: "",
            max_length: None,
            choices: &[],
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub const fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub const fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn help(mut self, text: &'static str) -> Self {
        self.help_text = text;
        self
    }

    /// Display label: the explicit label, or the name with underscores
    /// turned into spaces and title-cased.
    pub fn display_label(&self) -> String {
        self.label
            .map(str::to_string)
            .unwrap_or_else(|| display_label(self.name))
    }
}

/// Metadata row listing a resource field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldMeta {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub read_only: bool,
    pub help_text: String,
}

/// Metadata rows for every declared field.
pub fn describe_fields(descriptors: &[FieldDescriptor]) -> Vec<FieldMeta> {
    descriptors
        .iter()
        .map(|d| FieldMeta {
            name: d.name.to_string(),
            label: d.display_label(),
            required: d.required,
            read_only: d.read_only,
            help_text: d.help_text.to_string(),
        })
        .collect()
}

/// Input widget chosen for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Select,
    Checkbox,
    Textarea,
    Text,
}

/// Char fields longer than this get a textarea.
pub const TEXTAREA_THRESHOLD: usize = 100;

/// Pick the widget for a field kind.
pub fn widget_for(kind: FieldKind, max_length: Option<usize>) -> Widget {
    match kind {
        FieldKind::Choice => Widget::Select,
        FieldKind::Boolean => Widget::Checkbox,
        FieldKind::Text | FieldKind::Json => Widget::Textarea,
        FieldKind::Char if max_length.is_some_and(|n| n > TEXTAREA_THRESHOLD) => Widget::Textarea,
        _ => Widget::Text,
    }
}

/// HTML `type` attribute for single-line inputs.
fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer | FieldKind::Decimal => "number",
        FieldKind::Date => "date",
        FieldKind::DateTime => "datetime-local",
        FieldKind::Email => "email",
        FieldKind::Url => "url",
        _ => "text",
    }
}

/// JSON type a form value is sent as. Decimals stay strings so money keeps
/// its exact digits.
fn value_kind(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer => "integer",
        FieldKind::Boolean => "boolean",
        FieldKind::Json => "json",
        _ => "string",
    }
}

/// One input of the create/update form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub widget: Widget,
    pub input_type: &'static str,
    pub value_kind: &'static str,
    pub required: bool,
    pub read_only: bool,
    pub help_text: String,
    pub errors: Vec<String>,
    pub choices: Vec<(String, String)>,
}

/// Build form inputs from descriptors, skipping write-only fields.
/// `errors` maps field names to messages from a failed submission.
pub fn build_form_fields(
    descriptors: &[FieldDescriptor],
    errors: &Map<String, Value>,
) -> Vec<FormField> {
    descriptors
        .iter()
        .filter(|d| !d.write_only)
        .map(|d| FormField {
            name: d.name.to_string(),
            label: d.display_label(),
            widget: widget_for(d.kind, d.max_length),
            input_type: input_type(d.kind),
            value_kind: value_kind(d.kind),
            required: d.required,
            read_only: d.read_only,
            help_text: d.help_text.to_string(),
            errors: field_errors(errors.get(d.name)),
            choices: crate::choices::choice_pairs(d.choices),
        })
        .collect()
}

fn field_errors(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(value_text).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![value_text(other)],
    }
}

// ---------------------------------------------------------------------------
// Route patterns
// ---------------------------------------------------------------------------

/// Match a concrete request path against a route pattern in which
/// `{name}` segments match any single non-empty segment. Trailing slashes
/// are ignored.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    pattern_segments.len() == path_segments.len()
        && pattern_segments
            .iter()
            .zip(&path_segments)
            .all(|(p, s)| (p.starts_with('{') && p.ends_with('}') && !s.is_empty()) || p == s)
}

// ---------------------------------------------------------------------------
// Content negotiation
// ---------------------------------------------------------------------------

/// Decide whether a request wants the HTML dashboard.
///
/// `?format=html` / `?format=json` win. Otherwise HTML is served only when
/// `text/html` is named explicitly in `Accept` with a quality at least as
/// high as JSON's (where `*/*` stands in for JSON).
pub fn wants_html(accept: Option<&str>, format: Option<&str>) -> bool {
    match format.map(str::to_ascii_lowercase).as_deref() {
        Some("html") | Some("api") => return true,
        Some("json") => return false,
        _ => {}
    }
    let Some(accept) = accept else {
        return false;
    };

    let mut html_q: Option<f32> = None;
    let mut json_q: Option<f32> = None;
    let mut any_q: Option<f32> = None;
    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let q = parts
            .filter_map(|p| p.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        match media.as_str() {
            "text/html" => html_q = Some(q),
            "application/json" => json_q = Some(q),
            "*/*" => any_q = Some(q),
            _ => {}
        }
    }

    match html_q {
        Some(h) if h > 0.0 => h >= json_q.or(any_q).unwrap_or(0.0),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Dashboard colour scheme, chosen by the `theme` cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Name of the cookie holding the preference.
    pub const COOKIE: &'static str = "theme";

    /// Parse a cookie value; anything unrecognised means the default.
    pub fn from_cookie(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// Strict parse used when the user picks a theme.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Badge class for an HTTP method.
pub fn method_badge(method: &str) -> &'static str {
    match method.to_ascii_uppercase().as_str() {
        "GET" => "badge-get",
        "POST" => "badge-post",
        "PUT" | "PATCH" => "badge-put",
        "DELETE" => "badge-delete",
        _ => "badge-other",
    }
}

/// Badge class for an HTTP status code range.
pub fn status_badge(status: u16) -> &'static str {
    match status {
        200..=299 => "badge-success",
        300..=399 => "badge-redirect",
        400..=499 => "badge-warning",
        _ => "badge-danger",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    // -- field types ---------------------------------------------------------

    #[test]
    fn field_types_follow_json_types() {
        assert_eq!(field_type(&json!(null)), FieldType::Null);
        assert_eq!(field_type(&json!(true)), FieldType::Boolean);
        assert_eq!(field_type(&json!(3)), FieldType::Integer);
        assert_eq!(field_type(&json!(3.5)), FieldType::Float);
        assert_eq!(field_type(&json!("x")), FieldType::String);
        assert_eq!(field_type(&json!([1])), FieldType::Array);
        assert_eq!(field_type(&json!({})), FieldType::Object);
    }

    #[test]
    fn field_type_serialises_lowercase() {
        assert_eq!(serde_json::to_value(FieldType::Boolean).unwrap(), json!("boolean"));
    }

    // -- classification ------------------------------------------------------

    #[test]
    fn paginated_payload_inside_envelope() {
        let body = json!({"data": {
            "count": 45, "next": "?offset=20", "previous": null, "results": [{"id": 1}]
        }});
        assert_matches!(
            classify_payload(body),
            PayloadShape::Paginated { count: 45, next: Some(n), previous: None, results }
                if n == "?offset=20" && results.len() == 1
        );
    }

    #[test]
    fn paginated_count_defaults_to_results_length() {
        let body = json!({"results": [1, 2, 3]});
        assert_matches!(classify_payload(body), PayloadShape::Paginated { count: 3, .. });
    }

    #[test]
    fn detail_is_error() {
        assert_matches!(
            classify_payload(json!({"detail": "No posts available"})),
            PayloadShape::Error { detail, code: None, .. } if detail == "No posts available"
        );
    }

    #[test]
    fn api_error_body_is_error() {
        assert_matches!(
            classify_payload(json!({"error": "Tag with id 4 not found", "code": "NOT_FOUND"})),
            PayloadShape::Error { code: Some(c), .. } if c == "NOT_FOUND"
        );
    }

    #[test]
    fn api_error_body_carries_field_errors() {
        let body = json!({
            "error": "Invalid status 'lost'",
            "code": "VALIDATION_ERROR",
            "fields": {"status": ["Invalid status 'lost'"]}
        });
        let PayloadShape::Error { field_errors, .. } = classify_payload(body) else {
            panic!("expected error");
        };
        assert_eq!(field_errors["status"], json!(["Invalid status 'lost'"]));
    }

    #[test]
    fn object_with_error_key_and_extras_stays_object() {
        let body = json!({"data": {"error": "x", "code": "Y", "id": 3}});
        assert_matches!(classify_payload(body), PayloadShape::Object { .. });
    }

    #[test]
    fn object_lists_fields() {
        let body = json!({"data": {"id": 7, "title": "Budget 101", "tags": ["a", "b"]}});
        let PayloadShape::Object { fields, .. } = classify_payload(body) else {
            panic!("expected object");
        };
        assert_eq!(fields.len(), 3);
        let tags = fields.iter().find(|f| f.name == "tags").unwrap();
        assert!(tags.is_list);
        assert_eq!(tags.count, Some(2));
    }

    #[test]
    fn bare_list_counts_items() {
        assert_matches!(
            classify_payload(json!({"data": [1, 2]})),
            PayloadShape::List { count: 2, .. }
        );
    }

    #[test]
    fn scalar_payload() {
        assert_matches!(classify_payload(json!("ok")), PayloadShape::Scalar(_));
    }

    #[test]
    fn envelope_with_siblings_is_kept() {
        let body = json!({"data": 1, "meta": 2});
        assert_matches!(
            classify_payload(body),
            PayloadShape::Object { fields, .. } if fields.len() == 2
        );
    }

    #[test]
    fn nested_fields_are_depth_limited() {
        let body = json!({"a": {"b": {"c": {"d": {"e": 1}}}}});
        let fields = extract_fields(body.as_object().unwrap());
        let b = &fields[0].nested_fields[0];
        let c = &b.nested_fields[0];
        let d = &c.nested_fields[0];
        assert_eq!(d.name, "d");
        assert!(d.is_object);
        assert!(d.nested_fields.is_empty());
    }

    // -- tables --------------------------------------------------------------

    #[test]
    fn columns_come_from_first_object_row() {
        let rows = vec![json!({"id": 1, "name": "x"}), json!({"id": 2})];
        assert_eq!(table_columns(&rows), vec!["id", "name"]);
        assert!(table_columns(&[json!(1)]).is_empty());
    }

    #[test]
    fn cells_render_compactly() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(cell_text(&json!(4)), "4");
    }

    // -- affordances ---------------------------------------------------------

    #[test]
    fn affordances_from_methods() {
        let a = Affordances::from_methods(&["GET", "patch", "DELETE"]);
        assert!(!a.has_create);
        assert!(a.has_update);
        assert!(a.has_delete);
        assert_eq!(Affordances::from_methods::<&str>(&[]), Affordances::default());
    }

    // -- form fields ---------------------------------------------------------

    const STATUSES: &[&str] = &["draft", "published"];

    fn descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("title", FieldKind::Char).required().max_length(255),
            FieldDescriptor::new("slug", FieldKind::Char).max_length(50),
            FieldDescriptor::new("status", FieldKind::Choice).choices(STATUSES),
            FieldDescriptor::new("is_featured", FieldKind::Boolean),
            FieldDescriptor::new("content", FieldKind::Text),
            FieldDescriptor::new("password", FieldKind::Char).write_only(),
            FieldDescriptor::new("duration_seconds", FieldKind::Integer),
        ]
    }

    #[test]
    fn write_only_fields_are_skipped() {
        let fields = build_form_fields(&descriptors(), &Map::new());
        assert!(fields.iter().all(|f| f.name != "password"));
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn widgets_follow_field_kind() {
        let fields = build_form_fields(&descriptors(), &Map::new());
        let widget = |name: &str| fields.iter().find(|f| f.name == name).unwrap().widget;
        assert_eq!(widget("title"), Widget::Textarea);
        assert_eq!(widget("slug"), Widget::Text);
        assert_eq!(widget("status"), Widget::Select);
        assert_eq!(widget("is_featured"), Widget::Checkbox);
        assert_eq!(widget("content"), Widget::Textarea);
        assert_eq!(widget("duration_seconds"), Widget::Text);
    }

    #[test]
    fn labels_and_choices() {
        let fields = build_form_fields(&descriptors(), &Map::new());
        let featured = fields.iter().find(|f| f.name == "is_featured").unwrap();
        assert_eq!(featured.label, "Is Featured");
        let status = fields.iter().find(|f| f.name == "status").unwrap();
        assert_eq!(status.choices[1], ("published".into(), "Published".into()));
        let duration = fields.iter().find(|f| f.name == "duration_seconds").unwrap();
        assert_eq!(duration.input_type, "number");
        assert_eq!(duration.value_kind, "integer");
        assert_eq!(featured.value_kind, "boolean");
    }

    #[test]
    fn submission_errors_attach_to_fields() {
        let errors = json!({"title": ["This field is required."], "slug": "taken"});
        let fields = build_form_fields(&descriptors(), errors.as_object().unwrap());
        let title = fields.iter().find(|f| f.name == "title").unwrap();
        assert_eq!(title.errors, vec!["This field is required."]);
        let slug = fields.iter().find(|f| f.name == "slug").unwrap();
        assert_eq!(slug.errors, vec!["taken"]);
    }

    #[test]
    fn describe_fields_keeps_flags() {
        let meta = describe_fields(&descriptors());
        assert!(meta[0].required);
        assert_eq!(meta[0].label, "Title");
    }

    // -- path patterns -------------------------------------------------------

    #[test]
    fn patterns_match_placeholders() {
        assert!(path_matches("/api/v1/content/posts/{slug}", "/api/v1/content/posts/finance-bill"));
        assert!(path_matches("/api/v1/content/posts", "/api/v1/content/posts/"));
        assert!(!path_matches("/api/v1/content/posts/{slug}", "/api/v1/content/posts"));
        assert!(!path_matches("/api/v1/content/posts/{slug}", "/api/v1/content/videos/x"));
    }

    // -- negotiation ---------------------------------------------------------

    #[test]
    fn browser_accept_gets_html() {
        let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
        assert!(wants_html(Some(accept), None));
    }

    #[test]
    fn wildcard_accept_gets_json() {
        assert!(!wants_html(Some("*/*"), None));
        assert!(!wants_html(None, None));
    }

    #[test]
    fn json_preferred_over_html() {
        assert!(!wants_html(Some("application/json, text/html;q=0.5"), None));
    }

    #[test]
    fn format_param_overrides_accept() {
        assert!(wants_html(Some("application/json"), Some("html")));
        assert!(!wants_html(Some("text/html"), Some("json")));
    }

    // -- presentation --------------------------------------------------------

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!(Theme::from_cookie(None), Theme::Dark);
        assert_eq!(Theme::from_cookie(Some("purple")), Theme::Dark);
        assert_eq!(Theme::from_cookie(Some("light")), Theme::Light);
        assert_eq!(Theme::parse("Light"), None);
    }

    #[test]
    fn badges() {
        assert_eq!(method_badge("patch"), "badge-put");
        assert_eq!(status_badge(201), "badge-success");
        assert_eq!(status_badge(404), "badge-warning");
        assert_eq!(status_badge(503), "badge-danger");
    }
}
