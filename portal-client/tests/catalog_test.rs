mod common;

use common::TestPortal;
use portal_client::models::{AvailableEvent, AvailableSpeaker};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn public_lists_need_no_session() {
    let app = TestPortal::spawn().await;

    Mock::given(method("GET"))
        .and(path("/content"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": [{ "eventID": 3, "name": "Expo" }] })),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/speakers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": [{ "speakerID": 4, "name": "Linus" }] })),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    assert_eq!(
        app.client.catalog.available_events().await,
        vec![AvailableEvent {
            event_id: 3,
            name: "Expo".to_string(),
        }]
    );
    assert_eq!(
        app.client.catalog.available_speakers().await,
        vec![AvailableSpeaker {
            speaker_id: 4,
            name: "Linus".to_string(),
        }]
    );
    assert!(app.requests_to("/login/getToken").await.is_empty());
}

#[tokio::test]
async fn failures_degrade_to_empty() {
    let app = TestPortal::spawn().await;

    Mock::given(method("GET"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/speakers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&app.server)
        .await;

    assert!(app.client.catalog.available_events().await.is_empty());
    assert!(app.client.catalog.available_speakers().await.is_empty());
    assert!(app.client.catalog.try_available_events().await.is_err());
}
