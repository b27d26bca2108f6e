use axum::response::Html;

const DASHBOARD_PAGE: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page dashboard. All data comes from the recommendations API.
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}
