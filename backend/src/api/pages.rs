//! HTML pages

use axum::{extract::State, response::Html};

use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// GET / - Chat page, showing whether a document is attached
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let has_pdf = state.session.read().await.has_document();
    Html(render_index(has_pdf))
}

fn render_index(has_pdf: bool) -> String {
    let (class, label) = if has_pdf {
        ("attached", "PDF attached: answers are grounded in the uploaded document.")
    } else {
        ("detached", "No PDF attached.")
    };
    INDEX_TEMPLATE
        .replace("{{pdf_status_class}}", class)
        .replace("{{pdf_status}}", label)
}
