//! HTML dashboard over the JSON API.
//!
//! Browsers asking for `text/html` (or any client passing `?format=html`)
//! get every JSON response drawn as a page: paginated tables, object
//! detail, errors, and a create/update form when the resource is known.
//!
//! - [`negotiate`] -- middleware that swaps the JSON body for HTML.
//! - [`registry`] -- static resource metadata (methods, form fields).
//! - [`renderer`] -- tera templates and their context.

pub mod negotiate;
pub mod registry;
pub mod renderer;

pub use renderer::{DashboardRenderer, RenderRequest};
