use axum::response::Html;

static LANDING_HTML: &str = include_str!("../web/landing.html");

pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_HTML)
}
