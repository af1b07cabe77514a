use wiremock::{
    matchers::{method, path, query_param},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, spawn_app_with};

fn anna() -> [(&'static str, &'static str); 3] {
    [
        ("FNAME", "Anna"),
        ("LNAME", "Andersson"),
        ("EMAIL", "test@test.com"),
    ]
}

#[tokio::test]
async fn new_subscriber_is_welcomed_and_form_cleared() {
    let app = spawn_app().await;

    Mock::given(path("/subscribe/post-json"))
        .and(method("GET"))
        .and(query_param("u", "abc"))
        .and(query_param("FNAME", "Anna"))
        .and(query_param("LNAME", "Andersson"))
        .and(query_param("EMAIL", "test@test.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "msg": "Almost finished... We need to confirm your email address."
        })))
        .expect(1)
        .mount(&app.list_server)
        .await;

    let res = app.post_newsletter(&anna()).await;
    assert_eq!(res.status().as_u16(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["duplicate"], false);
    assert_eq!(body["notification"]["kind"], "welcome");
    assert_eq!(body["notification"]["heading"], "Välkommen!");
    assert_eq!(body["fields"]["first_name"], "");
    assert_eq!(body["fields"]["email"], "");
}

#[tokio::test]
async fn already_subscribed_error_is_a_duplicate() {
    let app = spawn_app().await;

    Mock::given(path("/subscribe/post-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "error",
            "msg": "test@test.com is already subscribed to list Rum för Dramatik."
        })))
        .expect(1)
        .mount(&app.list_server)
        .await;

    let res = app.post_newsletter(&anna()).await;
    assert_eq!(res.status().as_u16(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["duplicate"], true);
    assert_eq!(body["notification"]["kind"], "already_registered");
    assert_eq!(body["notification"]["heading"], "Redan prenumerant");
    assert!(body["inline_error"].is_null());
    // 重复登记不清空输入
    assert_eq!(body["fields"]["email"], "test@test.com");
}

#[tokio::test]
async fn other_list_errors_are_shown_inline() {
    let app = spawn_app().await;

    Mock::given(path("/subscribe/post-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "error",
            "msg": "Too many subscribe attempts for this email address."
        })))
        .mount(&app.list_server)
        .await;

    let body: serde_json::Value = app.post_newsletter(&anna()).await.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["duplicate"], false);
    assert!(body["notification"].is_null());
    assert_eq!(
        body["inline_error"],
        "Too many subscribe attempts for this email address."
    );
}

#[tokio::test]
async fn empty_fields_are_blocked_without_request() {
    let app = spawn_app().await;

    Mock::given(path("/subscribe/post-json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.list_server)
        .await;

    let test_cases = [
        ([("FNAME", ""), ("LNAME", "Andersson"), ("EMAIL", "test@test.com")], "FNAME"),
        ([("FNAME", "Anna"), ("LNAME", ""), ("EMAIL", "test@test.com")], "LNAME"),
        ([("FNAME", "Anna"), ("LNAME", "Andersson"), ("EMAIL", "")], "EMAIL"),
        ([("FNAME", "Anna"), ("LNAME", "Andersson"), ("EMAIL", "test.test.com")], "EMAIL"),
    ];
    for (body, field) in test_cases {
        let res = app.post_newsletter(&body).await;
        assert_eq!(res.status().as_u16(), 422, "field `{field}` should block.");

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["status"], "idle");
        assert!(body["field_errors"][field].is_string());
    }
}

#[tokio::test]
async fn unreachable_list_is_a_network_error() {
    let app = spawn_app_with(|config| {
        config.mailing_list.action_url = Some("http://127.0.0.1:1/subscribe/post?u=abc".into());
    })
    .await;

    let body: serde_json::Value = app.post_newsletter(&anna()).await.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["duplicate"], false);
    assert_eq!(
        body["inline_error"],
        "Nätverksfel: Kontrollera din anslutning."
    );
}

#[tokio::test]
async fn newsletter_route_is_missing_without_list_url() {
    let app = spawn_app_with(|config| config.mailing_list.action_url = None).await;

    let res = app.post_newsletter(&anna()).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn malformed_list_url_disables_newsletter_only() {
    let app = spawn_app_with(|config| {
        config.mailing_list.action_url = Some("inte en adress".into());
    })
    .await;

    let res = app.post_newsletter(&anna()).await;
    assert_eq!(res.status().as_u16(), 404);

    let res = app.get("/health_check").await;
    assert!(res.status().is_success());
}
