use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, TestApp, ORDER_FORM_ID};

fn order(rendered_at: i64) -> Vec<(&'static str, String)> {
    vec![
        ("your-firstname", "Anna".into()),
        ("your-lastname", "Andersson".into()),
        ("your-email", "anna@example.se".into()),
        ("quantity", "2".into()),
        ("shipment", "Mötas upp i Göteborg".into()),
        ("acceptance-privacy", "1".into()),
        ("rendered_at", rendered_at.to_string()),
    ]
}

fn ten_seconds_ago() -> i64 {
    chrono::Utc::now().timestamp_millis() - 10_000
}

#[tokio::test]
async fn valid_order_is_sent() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(ORDER_FORM_ID)))
        .and(method("POST"))
        .and(body_string_contains("Mötas upp i Göteborg"))
        .and(body_string_contains("order-form"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "mail_sent",
            "message": "Tack för ditt meddelande."
        })))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let res = app.post_order(&order(ten_seconds_ago())).await;
    assert_eq!(res.status().as_u16(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["notification"]["heading"], "Tack för din beställning!");
    assert_eq!(body["fields"]["first_name"], "");
    assert_eq!(body["fields"]["quantity"], "1");
}

#[tokio::test]
async fn honeypot_drops_silently() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(ORDER_FORM_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let mut body = order(ten_seconds_ago());
    body.push(("website", "http://spam.example".into()));
    let res = app.post_order(&body).await;
    assert_eq!(res.status().as_u16(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "idle");
    assert!(body["notification"].is_null());
}

#[tokio::test]
async fn too_fast_or_unstamped_drops_silently() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(ORDER_FORM_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let just_now = order(chrono::Utc::now().timestamp_millis());
    let mut unstamped = order(0);
    unstamped.retain(|(key, _)| *key != "rendered_at");

    for body in [just_now, unstamped] {
        let res = app.post_order(&body).await;
        assert_eq!(res.status().as_u16(), 200);

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["status"], "idle");
    }
}

#[tokio::test]
async fn post_shipment_requires_address() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(ORDER_FORM_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let mut body = order(ten_seconds_ago());
    body.retain(|(key, _)| *key != "shipment");
    let res = app.post_order(&body).await;
    assert_eq!(res.status().as_u16(), 422);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["field_errors"]["your-address"].is_string());
    assert!(body["field_errors"]["your-city"].is_string());
}

#[tokio::test]
async fn consent_is_required() {
    let app = spawn_app().await;

    let mut body = order(ten_seconds_ago());
    body.retain(|(key, _)| *key != "acceptance-privacy");
    let res = app.post_order(&body).await;
    assert_eq!(res.status().as_u16(), 422);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["field_errors"]["acceptance-privacy"], "Du måste godkänna villkoren.");
}
