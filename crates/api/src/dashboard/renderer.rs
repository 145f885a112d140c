//! Tera-backed HTML rendering of JSON API responses.
//!
//! Templates are compiled once at startup and embedded in the binary, so
//! the server does not depend on its working directory.

use bns_core::dashboard::{
    build_form_fields, cell_text, classify_payload, describe_fields, method_badge, status_badge,
    table_columns, Affordances, FieldInfo, FieldMeta, FieldType, FormField, PayloadShape, Theme,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

use super::registry::{ResourceMatch, ENDPOINT_GROUPS};

const BASE_TEMPLATE: &str = "base.html";
const MACROS_TEMPLATE: &str = "macros.html";
const RESPONSE_TEMPLATE: &str = "response.html";
const INDEX_TEMPLATE: &str = "index.html";

/// Request details the page is drawn for.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub path: &'a str,
    pub method: &'a str,
    pub status: u16,
    pub theme: Theme,
    pub resource: Option<ResourceMatch>,
}

/// A field of an object payload, flattened for display.
#[derive(Debug, Serialize)]
struct FieldRow {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    text: String,
    count: Option<usize>,
    is_object: bool,
    nested: Vec<FieldRow>,
}

impl From<FieldInfo> for FieldRow {
    fn from(info: FieldInfo) -> Self {
        let text = match &info.value {
            Value::Object(_) => String::new(),
            Value::Array(_) => {
                serde_json::to_string_pretty(&info.value).unwrap_or_else(|_| info.value.to_string())
            }
            other => cell_text(other),
        };
        Self {
            name: info.name,
            field_type: info.field_type,
            text,
            count: info.count,
            is_object: info.is_object,
            nested: info.nested_fields.into_iter().map(FieldRow::from).collect(),
        }
    }
}

/// Everything `response.html` reads.
#[derive(Debug, Default, Serialize)]
struct ResponseContext {
    title: String,
    theme: &'static str,
    endpoint: String,
    method: String,
    method_badge: &'static str,
    status: u16,
    status_badge: &'static str,
    shape: &'static str,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    detail: Option<String>,
    code: Option<String>,
    fields: Vec<FieldRow>,
    scalar: Option<String>,
    raw_json: String,
    allowed_methods: Vec<AllowedMethod>,
    affordances: Affordances,
    resource_name: Option<&'static str>,
    field_meta: Vec<FieldMeta>,
    form_fields: Vec<FormField>,
}

#[derive(Debug, Serialize)]
struct AllowedMethod {
    name: &'static str,
    badge: &'static str,
}

/// Compiled dashboard templates.
pub struct DashboardRenderer {
    tera: Tera,
}

impl DashboardRenderer {
    /// Compile the embedded templates.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (BASE_TEMPLATE, include_str!("templates/base.html")),
            (MACROS_TEMPLATE, include_str!("templates/macros.html")),
            (RESPONSE_TEMPLATE, include_str!("templates/response.html")),
            (INDEX_TEMPLATE, include_str!("templates/index.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Render a JSON response body as a dashboard page.
    pub fn render(&self, body: Value, request: &RenderRequest<'_>) -> Result<String, tera::Error> {
        let context = build_response_context(body, request);
        self.tera
            .render(RESPONSE_TEMPLATE, &Context::from_serialize(&context)?)
    }

    /// Render the `/api` endpoint index.
    pub fn render_index(&self, theme: Theme) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("title", "API Dashboard");
        context.insert(
            "description",
            "Browse and interact with the Budget Ndio Story API",
        );
        context.insert("theme", theme.as_str());
        context.insert("endpoint", "/api");
        context.insert("groups", &*ENDPOINT_GROUPS);
        self.tera.render(INDEX_TEMPLATE, &context)
    }
}

impl std::fmt::Debug for DashboardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardRenderer").finish_non_exhaustive()
    }
}

fn build_response_context(body: Value, request: &RenderRequest<'_>) -> ResponseContext {
    let raw_json = serde_json::to_string_pretty(&body).unwrap_or_default();
    let mut context = ResponseContext {
        title: title_for(request),
        theme: request.theme.as_str(),
        endpoint: request.path.to_string(),
        method: request.method.to_ascii_uppercase(),
        method_badge: method_badge(request.method),
        status: request.status,
        status_badge: status_badge(request.status),
        raw_json,
        ..ResponseContext::default()
    };

    let mut field_errors = Map::new();
    match classify_payload(body) {
        PayloadShape::Paginated {
            results,
            count,
            next,
            previous,
        } => {
            context.shape = "paginated";
            fill_table(&mut context, &results);
            context.count = count;
            context.next = next;
            context.previous = previous;
        }
        PayloadShape::List { results, count } => {
            context.shape = "list";
            fill_table(&mut context, &results);
            context.count = count;
        }
        PayloadShape::Error {
            detail,
            code,
            field_errors: errors,
        } => {
            context.shape = "error";
            context.detail = Some(detail);
            context.code = code;
            field_errors = errors;
        }
        PayloadShape::Object { fields, .. } => {
            context.shape = "object";
            context.fields = fields.into_iter().map(FieldRow::from).collect();
        }
        PayloadShape::Scalar(value) => {
            context.shape = "scalar";
            context.scalar = Some(cell_text(&value));
        }
    }

    if let Some(found) = request.resource {
        context.resource_name = Some(found.resource.name);
        context.affordances = Affordances::from_methods(found.methods);
        context.allowed_methods = found
            .methods
            .iter()
            .map(|&name| AllowedMethod {
                name,
                badge: method_badge(name),
            })
            .collect();
        context.field_meta = describe_fields(found.resource.fields);
        // Singletons without an item path are edited in place.
        let show_form = if found.is_collection {
            context.affordances.has_create
                || (found.resource.item.is_none() && context.affordances.has_update)
        } else {
            context.affordances.has_update
        };
        if show_form {
            context.form_fields = build_form_fields(found.resource.fields, &field_errors);
        }
    }
    context
}

/// Rows of cell text, one column per key of the first object row.
/// Non-object rows show as a single cell.
fn fill_table(context: &mut ResponseContext, results: &[Value]) {
    let columns = table_columns(results);
    context.rows = results
        .iter()
        .map(|row| match row.as_object() {
            Some(map) => columns
                .iter()
                .map(|c| map.get(c).map(cell_text).unwrap_or_default())
                .collect(),
            None => vec![cell_text(row)],
        })
        .collect();
    context.columns = if columns.is_empty() && !results.is_empty() {
        vec!["value".to_string()]
    } else {
        columns
    };
}

fn title_for(request: &RenderRequest<'_>) -> String {
    match request.resource {
        Some(found) => found.resource.name.to_string(),
        None => request
            .path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(bns_core::choices::display_label)
            .unwrap_or_else(|| "API".to_string()),
    }
}
