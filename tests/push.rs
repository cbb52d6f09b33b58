mod common;

use chrono::Utc;
use common::at;
use routinely::config::PushConfig;
use routinely::entities::Tone;
use routinely::notify::{NotifyError, PushGateway, PushNotifier, PushTicket};
use routinely::scheduler::ScheduledReminder;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reminder() -> ScheduledReminder {
    ScheduledReminder {
        task_id: "task-1".to_string(),
        task_name: "Stretch".to_string(),
        tone: Tone::Chime,
        fire_at: at(7, 30),
    }
}

fn gateway(server: &MockServer) -> PushGateway {
    PushGateway::new(format!("{}/api/v1/notifications/", server.uri()), "app-123", "secret")
}

#[tokio::test]
async fn test_schedule_posts_notification() {
    let server = MockServer::start().await;
    let send_after = at(7, 30)
        .with_timezone(&Utc)
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    Mock::given(method("POST"))
        .and(path("/api/v1/notifications"))
        .and(header("authorization", "Basic secret"))
        .and(body_partial_json(json!({
            "app_id": "app-123",
            "contents": { "en": "Stretch" },
            "send_after": send_after,
            "data": { "tone": "chime", "taskId": "task-1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "notif-9", "recipients": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = gateway(&server).schedule(&reminder()).await.unwrap();
    assert_eq!(ticket, PushTicket("notif-9".to_string()));
}

#[tokio::test]
async fn test_schedule_rejected_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad app id"))
        .mount(&server)
        .await;

    let err = gateway(&server).schedule(&reminder()).await.unwrap_err();
    assert_eq!(
        err,
        NotifyError::Rejected {
            status: 400,
            body: "bad app id".to_string()
        }
    );
}

#[tokio::test]
async fn test_schedule_without_id_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "", "errors": ["All included players are not subscribed"] })))
        .mount(&server)
        .await;

    let err = gateway(&server).schedule(&reminder()).await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected { status: 200, .. }));
}

#[tokio::test]
async fn test_cancel_deletes_notification() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/notifications/notif-9"))
        .and(query_param("app_id", "app-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server)
        .cancel(&PushTicket("notif-9".to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    let gateway = PushGateway::new("http://127.0.0.1:9/notifications", "app", "key");
    let err = gateway.schedule(&reminder()).await.unwrap_err();
    assert!(matches!(err, NotifyError::Request(_)));
}

#[test]
fn test_from_config_requires_enabled_and_key() {
    let mut config = PushConfig::default();
    assert!(PushGateway::from_config(&config).is_none());

    config.enabled = true;
    config.app_id = "app".to_string();
    config.api_key_env = "ROUTINELY_TEST_PUSH_KEY_UNSET".to_string();
    assert!(PushGateway::from_config(&config).is_none());

    config.api_key_env = "ROUTINELY_TEST_PUSH_KEY_SET".to_string();
    std::env::set_var("ROUTINELY_TEST_PUSH_KEY_SET", "abc");
    let gateway = PushGateway::from_config(&config).unwrap();
    assert_eq!(gateway.endpoint(), config.endpoint.trim_end_matches('/'));
}
