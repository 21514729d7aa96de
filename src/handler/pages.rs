//! Landing page rendering module
//!
//! Renders the fixed landing page template. No request-derived variables are
//! injected; the template file is read from disk and passed through the
//! template registry so a broken or missing template surfaces as a 500.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use handlebars::Handlebars;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;
use tokio::fs;

/// Serve the landing page
pub async fn serve_index(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match load_and_render(&state.templates, &state.config.site.template).await {
        Some(html) => http::build_html_response(html, ctx.is_head),
        None => http::build_500_response(),
    }
}

/// Read the template file and render it with an empty context
///
/// The template carries no substitution variables, so rendering returns it
/// verbatim while still going through the registry's parser.
pub async fn load_and_render(templates: &Handlebars<'static>, template_path: &str) -> Option<String> {
    let source = match fs::read_to_string(template_path).await {
        Ok(s) => s,
        Err(e) => {
            logger::log_error(&format!("Failed to read template '{template_path}': {e}"));
            return None;
        }
    };

    match templates.render_template(&source, &serde_json::json!({})) {
        Ok(html) => Some(html),
        Err(e) => {
            logger::log_error(&format!("Failed to render template '{template_path}': {e}"));
            None
        }
    }
}
