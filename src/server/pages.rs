use super::state::AppState;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse};
use axum::{routing, Router};

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const NOT_FOUND_PAGE: &str = include_str!("../../templates/404.html");
const WIDGET_SCRIPT: &str = include_str!("../../public/js/app.js");
const WIDGET_STYLES: &str = include_str!("../../public/css/style.css");

pub fn api() -> Router<AppState> {
    Router::new()
        .route("/", routing::get(index))
        .route("/js/app.js", routing::get(widget_script))
        .route("/css/style.css", routing::get(widget_styles))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn widget_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        WIDGET_SCRIPT,
    )
}

async fn widget_styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], WIDGET_STYLES)
}

pub async fn not_found(uri: Uri) -> (StatusCode, Html<&'static str>) {
    tracing::debug!(%uri, "no route found");
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}
