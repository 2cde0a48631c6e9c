use std::time::Duration;

use detibot_engine::{
    Backend, BackendSettings, FailureKind, ReqwestBackend, SourceRequest, UrlSourceRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(BackendSettings {
        base_url: format!("{}/detibot", server.uri()),
        ..BackendSettings::default()
    })
    .expect("backend")
}

fn success() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"response": "Successfull"}))
}

#[tokio::test]
async fn url_source_posts_full_json_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detibot/insert_urlsource"))
        .and(body_json(json!({
            "url": "https://x.test",
            "recursive": true,
            "paths": ["/docs", "/faq"],
            "loader_type": "url",
            "update_period": "Monthly",
            "description": "Department site",
            "wait_time": 3
        })))
        .respond_with(success())
        .expect(1)
        .mount(&server)
        .await;

    let source = SourceRequest::Url(UrlSourceRequest {
        url: "https://x.test".into(),
        recursive: true,
        paths: vec!["/docs".into(), "/faq".into()],
        update_period: "Monthly".into(),
        description: "Department site".into(),
    });

    backend_for(&server)
        .submit_source(&source)
        .await
        .expect("accepted");
}

#[tokio::test]
async fn file_source_uploads_multipart_with_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detibot/insert_filesource"))
        .respond_with(success())
        .mount(&server)
        .await;

    let source = SourceRequest::File {
        file_name: "guide.pdf".into(),
        bytes: b"%PDF-1.4 body".to_vec(),
        description: "Student guide".into(),
    };
    backend_for(&server)
        .submit_source(&source)
        .await
        .expect("accepted");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"file\"; filename=\"guide.pdf\""));
    assert!(body
        .to_ascii_lowercase()
        .contains("content-type: application/pdf"));
    assert!(body.contains("name=\"descript\""));
    assert!(body.contains("Student guide"));
    assert!(body.contains("%PDF-1.4 body"));
}

#[tokio::test]
async fn missing_success_marker_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detibot/insert_faqsource"))
        .and(body_json(json!({"question": "q", "answer": "a"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": false})))
        .mount(&server)
        .await;

    let source = SourceRequest::Faq {
        question: "q".into(),
        answer: "a".into(),
    };
    let err = backend_for(&server)
        .submit_source(&source)
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::Rejected {
            response: "false".into()
        }
    );
}

#[tokio::test]
async fn server_error_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = SourceRequest::Faq {
        question: "q".into(),
        answer: "a".into(),
    };
    let err = backend_for(&server)
        .submit_source(&source)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn prompt_goes_to_language_endpoint_with_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detibot/pt"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "prompt": "e agora?",
            "chat": ["olá", "olá! como posso ajudar?"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Pergunte à vontade.")))
        .expect(1)
        .mount(&server)
        .await;

    let history = vec!["olá".to_string(), "olá! como posso ajudar?".to_string()];
    let reply = backend_for(&server)
        .send_prompt("pt", "e agora?", &history)
        .await
        .expect("reply");

    assert_eq!(reply, "Pergunte à vontade.");
}

#[tokio::test]
async fn non_string_reply_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detibot/en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "oops"})))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .send_prompt("en", "hi", &[])
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn configured_request_timeout_is_honoured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/detibot/en"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!("late")),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(BackendSettings {
        base_url: format!("{}/detibot/", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..BackendSettings::default()
    })
    .expect("backend");

    let err = backend.send_prompt("en", "hi", &[]).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
