// API Integration Tests
//
// Purpose: exercise every endpoint against a small in-memory inventory
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use dealership_site::{create_router, AppState, Inventory, SiteConfig};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt; // for oneshot
    use tracing_subscriber::fmt::MakeWriter;

    const INVENTORY: &str = r#"[
        {"category": "suv", "price": 30000, "title": "Explorer"},
        {"category": "sedan", "price": 25000, "title": "Accord"},
        {"category": "suv", "price": 45000, "title": "GLE", "badge": "New"},
        {"category": "coupe", "price": "TBD", "title": "Concept"}
    ]"#;

    // Helper: Create test app state
    fn create_test_app() -> axum::Router {
        let inventory = Inventory::from_json(INVENTORY).expect("test inventory parses");
        let state = AppState::from_inventory(inventory, &SiteConfig::default());
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn text_response(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).expect("Body is UTF-8")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // Helper: Collect log output written while a guard is held
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn titles(body: &Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["title"].as_str().unwrap().to_string())
            .collect()
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = create_test_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Vehicle Listing
    // =========================================================================

    #[tokio::test]
    async fn test_vehicles_no_filters() {
        let response = create_test_app().oneshot(get("/api/vehicles")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["rows"], 4);
        assert_eq!(body["total"], 4);
        assert_eq!(titles(&body), vec!["Explorer", "Accord", "GLE", "Concept"]);
        assert_eq!(body["filters"]["sort"], "featured");
    }

    #[tokio::test]
    async fn test_vehicles_category_price_low() {
        let response = create_test_app()
            .oneshot(get("/api/vehicles?category=suv&price=all&sort=price-low"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(titles(&body), vec!["Explorer", "GLE"]);
        assert_eq!(body["hidden"], serde_json::json!([1, 3]));
        assert_eq!(body["data"][1]["position"], 2);
    }

    #[tokio::test]
    async fn test_vehicles_bounded_range_featured() {
        let response = create_test_app()
            .oneshot(get("/api/vehicles?price=20000-30000"))
            .await
            .unwrap();
        let body: Value = json_response(response).await;
        assert_eq!(titles(&body), vec!["Explorer", "Accord"]);
    }

    #[tokio::test]
    async fn test_vehicles_open_range_price_high() {
        let response = create_test_app()
            .oneshot(get("/api/vehicles?category=all&price=40000%2B&sort=price-high"))
            .await
            .unwrap();
        let body: Value = json_response(response).await;
        assert_eq!(titles(&body), vec!["GLE"]);
        assert_eq!(body["filters"]["price"], "40000+");
    }

    #[tokio::test]
    async fn test_vehicles_repeat_query_is_identical() {
        let app = create_test_app();
        let uri = "/api/vehicles?sort=year";

        let first = json_response(app.clone().oneshot(get(uri)).await.unwrap()).await;
        let second = json_response(app.oneshot(get(uri)).await.unwrap()).await;
        assert_eq!(first, second);
        assert_eq!(titles(&first), vec!["GLE", "Explorer", "Accord", "Concept"]);
    }

    #[tokio::test]
    async fn test_vehicles_bad_controls() {
        let app = create_test_app();

        let response = app.clone().oneshot(get("/api/vehicles?price=cheap")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("cheap"));

        let response = app.oneshot(get("/api/vehicles?sort=mileage")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categories() {
        let response = create_test_app()
            .oneshot(get("/api/vehicles/categories"))
            .await
            .unwrap();
        let body: Value = json_response(response).await;
        assert_eq!(body["rows"], 3);
        assert_eq!(body["data"][0], serde_json::json!({"category": "suv", "count": 2}));
    }

    // =========================================================================
    // Section 3: Pages
    // =========================================================================

    #[tokio::test]
    async fn test_inventory_page_renders_visible_cards() {
        let response = create_test_app()
            .oneshot(get("/inventory?category=suv&sort=price-high"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = text_response(response).await;
        let gle = html.find("<h3>GLE</h3>").expect("GLE rendered");
        let explorer = html.find("<h3>Explorer</h3>").expect("Explorer rendered");
        assert!(gle < explorer, "price-high puts GLE first");
        assert!(!html.contains("<h3>Accord</h3>"));
        assert!(html.contains("(2 hidden)"));
    }

    #[tokio::test]
    async fn test_home_page() {
        let response = create_test_app().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_response(response).await;
        assert!(html.contains("4 vehicles in stock"));
        assert!(html.contains(r#"class="nav-menu ""#));
        assert!(html.contains(r#"href="?menu=open""#));
    }

    #[tokio::test]
    async fn test_menu_open_param() {
        let response = create_test_app().oneshot(get("/?menu=open")).await.unwrap();
        let html = text_response(response).await;
        assert!(html.contains(r#"class="nav-menu active""#));
        assert!(html.contains(r#"class="hamburger active""#));
        assert!(html.contains(r#"href="?menu=closed""#));

        // Filters survive the toggle link on the inventory page
        let response = create_test_app()
            .oneshot(get("/inventory?category=suv&menu=open"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = text_response(response).await;
        assert!(html.contains(r#"class="nav-menu active""#));
        assert!(html.contains("category=suv"));
        assert!(html.contains("menu=closed"));
    }

    // =========================================================================
    // Section 4: Forms
    // =========================================================================

    #[tokio::test]
    async fn test_contact_success() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/forms/contact",
                serde_json::json!({
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "email": "jane@example.com",
                    "message": "Is the GLE available?"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["severity"], "success");

        // The outcome is also queued as a toast
        let toasts = json_response(app.oneshot(get("/api/notifications")).await.unwrap()).await;
        assert_eq!(toasts["rows"], 1);
        assert_eq!(toasts["data"][0]["color"], "#27ae60");
        assert_eq!(
            toasts["data"][0]["class"],
            "notification notification-success"
        );
    }

    #[tokio::test]
    async fn test_contact_missing_fields() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/forms/contact",
                serde_json::json!({"firstName": "Jane"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = json_response(response).await;
        assert_eq!(body["error"], "Please fill in all required fields");
        assert_eq!(body["notification"]["severity"], "error");
    }

    #[tokio::test]
    async fn test_contact_invalid_email() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/forms/contact",
                serde_json::json!({
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "email": "jane-at-example",
                    "message": "Hi"
                }),
            ))
            .await
            .unwrap();
        let body: Value = json_response(response).await;
        assert_eq!(body["error"], "Please enter a valid email address");
    }

    #[tokio::test]
    async fn test_test_drive_booking() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/forms/test-drive",
                serde_json::json!({
                    "testVehicle": "gle",
                    "testDate": "2099-06-01",
                    "testTime": "10:00"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(post_json(
                "/api/forms/test-drive",
                serde_json::json!({
                    "testVehicle": "gle",
                    "testDate": "2000-01-01",
                    "testTime": "10:00"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_response(response).await;
        assert_eq!(body["error"], "Please select a future date");
    }

    #[tokio::test]
    async fn test_phone_formatting() {
        let response = create_test_app()
            .oneshot(get("/api/format/phone?value=555.123.4567"))
            .await
            .unwrap();
        let body: Value = json_response(response).await;
        assert_eq!(body["value"], "(555) 123-4567");
    }

    // =========================================================================
    // Section 5: Actions and Tracking
    // =========================================================================

    #[tokio::test]
    async fn test_schedule_test_drive_action() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = create_test_app()
            .oneshot(post_json(
                "/api/actions/schedule-test-drive",
                serde_json::json!({
                    "target": "gle",
                    "text": "Schedule Test Drive",
                    "class": "btn btn-primary",
                    "options": [
                        {"value": "", "text": "Select a vehicle"},
                        {"value": "mercedes-gle", "text": "2024 Mercedes-Benz GLE"}
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["preselect"], "mercedes-gle");
        assert_eq!(body["notification"]["severity"], "info");

        let logged = logs.contents();
        assert!(logged.contains("Button Click"), "logs: {logged}");
        assert!(logged.contains("Schedule Test Drive"), "logs: {logged}");
        assert!(logged.contains("btn btn-primary"), "logs: {logged}");
    }

    #[tokio::test]
    async fn test_action_errors() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(post_json("/api/actions/teleport", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(post_json("/api/actions/view-details", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_record_event() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/events",
                serde_json::json!({
                    "name": "Button Click",
                    "properties": {"buttonText": "Browse Inventory", "buttonType": "btn"}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
