//! Static operator dashboard.

use axum::response::Html;

/// Page compiled into the binary; it polls the machine endpoints itself.
const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

/// GET /
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
