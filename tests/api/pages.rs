use crate::helpers::spawn_app;
use pretty_assertions::assert_eq;

fn content_type(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn landing_page_renders_search_widget() {
    let app = spawn_app().await;

    let response = app.get_path("/").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(content_type(&response).starts_with("text/html"));
    let page = response.text().await.unwrap();
    assert!(page.contains("<title>Weather APP</title>"));
    assert!(page.contains("class=\"weatherForm\""));
    assert!(page.contains("/js/app.js"));
}

#[tokio::test]
async fn widget_assets_are_served() {
    let app = spawn_app().await;

    let script = app.get_path("/js/app.js").await;
    assert_eq!(script.status().as_u16(), 200);
    assert!(content_type(&script).starts_with("application/javascript"));
    assert!(script.text().await.unwrap().contains("/weather"));

    let styles = app.get_path("/css/style.css").await;
    assert_eq!(styles.status().as_u16(), 200);
    assert!(content_type(&styles).starts_with("text/css"));
}

#[tokio::test]
async fn unknown_route_renders_not_found_page() {
    let app = spawn_app().await;

    let response = app.get_path("/no/such/page").await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(content_type(&response).starts_with("text/html"));
    let page = response.text().await.unwrap();
    assert!(page.contains("Page does not exist!! Try Again"));
}

#[tokio::test]
async fn request_id_is_propagated() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();

    let request_id = response.headers().get("x-request-id").and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("abc-123"));
}
