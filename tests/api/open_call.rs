use base64::{engine::general_purpose::STANDARD, Engine};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, TestApp, OPEN_CALL_FORM_ID};

fn application(files: &[&str]) -> serde_json::Value {
    let files: Vec<_> = files
        .iter()
        .map(|name| serde_json::json!({"name": name, "content": STANDARD.encode(b"%PDF-1.4 manus")}))
        .collect();

    serde_json::json!({
        "applicant-firstname": "Anna",
        "applicant-lastname": "Andersson",
        "applicant-email": "anna@example.se",
        "files": files,
    })
}

#[tokio::test]
async fn application_is_sent_with_files() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(OPEN_CALL_FORM_ID)))
        .and(method("POST"))
        .and(body_string_contains("name=\"applicant-email\""))
        .and(body_string_contains("filename=\"manus.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "mail_sent",
            "message": "Tack! Vi har tagit emot ditt bidrag."
        })))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let res = app.post_open_call(&application(&["manus.pdf"])).await;
    assert_eq!(res.status().as_u16(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["notification"]["heading"], "Tack för din ansökan!");
    assert_eq!(
        body["notification"]["description"],
        "Tack! Vi har tagit emot ditt bidrag."
    );
    assert_eq!(body["fields"]["files"], serde_json::json!([]));
}

#[tokio::test]
async fn four_files_are_blocked_without_request() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(OPEN_CALL_FORM_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let res = app
        .post_open_call(&application(&["a.pdf", "b.pdf", "c.doc", "d.docx"]))
        .await;
    assert_eq!(res.status().as_u16(), 422);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["field_errors"]["files"],
        "Du kan max ladda upp 3 filer totalt."
    );
}

#[tokio::test]
async fn four_identical_files_are_blocked_without_request() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(OPEN_CALL_FORM_ID)))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    let res = app
        .post_open_call(&application(&["a.pdf", "a.pdf", "a.pdf", "a.pdf"]))
        .await;
    assert_eq!(res.status().as_u16(), 422);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "idle");
    assert_eq!(
        body["field_errors"]["files"],
        "Du kan max ladda upp 3 filer totalt."
    );
}

#[tokio::test]
async fn server_field_errors_land_on_their_field() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(OPEN_CALL_FORM_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "validation_failed",
            "message": "Ett eller flera fält innehåller fel.",
            "invalid_fields": [
                {"field": "applicant-email", "message": "Ange en giltig e-postadress."}
            ]
        })))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let res = app.post_open_call(&application(&["manus.pdf"])).await;
    assert_eq!(res.status().as_u16(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["field_errors"],
        serde_json::json!({"applicant-email": "Ange en giltig e-postadress."})
    );
    // 输入保留
    assert_eq!(body["fields"]["email"], "anna@example.se");
}

#[tokio::test]
async fn server_error_is_reported_inline() {
    let app = spawn_app().await;

    Mock::given(path(TestApp::feedback_path(OPEN_CALL_FORM_ID)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.form_server)
        .await;

    let body: serde_json::Value = app
        .post_open_call(&application(&["manus.pdf"]))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["inline_error"],
        "Serverfel: Kunde inte skicka formuläret. Försök igen senare."
    );
}

#[tokio::test]
async fn invalid_base64_is_rejected() {
    let app = spawn_app().await;

    let body = serde_json::json!({
        "applicant-firstname": "Anna",
        "applicant-lastname": "Andersson",
        "applicant-email": "anna@example.se",
        "files": [{"name": "manus.pdf", "content": "inte base64!"}],
    });
    let res = app.post_open_call(&body).await;

    assert_eq!(res.status().as_u16(), 400);
}
