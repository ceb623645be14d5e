use askama::Template;
use axum::{Router, http::StatusCode, response::Html, routing::get};
use chrono::Local;

use crate::routes::API_PREFIX;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    now: String,
    project_name: String,
    api_prefix: &'static str,
}

type HtmlError = (StatusCode, Html<String>);

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Result<Html<String>, HtmlError> {
    let rendered = IndexTemplate {
        now: Local::now().to_rfc3339(),
        project_name: project_name(),
        api_prefix: API_PREFIX,
    }
    .render()
    .map_err(|err| {
        tracing::error!(error = %err, "failed to render index");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("failed to render index".to_string()),
        )
    })?;
    Ok(Html(rendered))
}

/// `todos_api` -> `Todos Api`
pub(crate) fn project_name() -> String {
    let words: Vec<String> = env!("CARGO_PKG_NAME")
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = first.to_ascii_uppercase().to_string();
                    out.push_str(&chars.as_str().to_ascii_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Project".to_string()
    } else {
        words.join(" ")
    }
}
