mod common;

use common::{TestPortal, TEST_EMAIL, TEST_ROLE, TEST_SESSION_KEY, TEST_TOKEN};
use portal_client::config::BackendSettings;
use portal_client::error::ClientError;
use portal_client::PortalClient;
use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn no_session_key_means_no_token_and_no_request() {
    let app = TestPortal::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let tokens = app.client.token_provider();
    assert!(tokens.fetch_token().await.is_none());
    assert!(matches!(
        tokens.try_fetch_token().await,
        Err(ClientError::MissingSession)
    ));
}

#[tokio::test]
async fn token_is_returned_verbatim() {
    let app = TestPortal::spawn().await;
    app.login_with_token().await;

    let token = app
        .client
        .token_provider()
        .fetch_token()
        .await
        .expect("Expected a token");

    assert_eq!(token.expose(), TEST_TOKEN);
}

#[tokio::test]
async fn each_fetch_hits_the_backend() {
    let app = TestPortal::spawn().await;
    app.client
        .session
        .login(TEST_SESSION_KEY, TEST_EMAIL, TEST_ROLE)
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/login/getToken"))
        .and(header("userkey", TEST_SESSION_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "T" })))
        .expect(2)
        .mount(&app.server)
        .await;

    let tokens = app.client.token_provider();
    assert_eq!(tokens.fetch_token().await.unwrap().expose(), "T");
    assert_eq!(tokens.fetch_token().await.unwrap().expose(), "T");
}

#[tokio::test]
async fn rejected_exchange_yields_none() {
    let app = TestPortal::spawn().await;
    app.client
        .session
        .login(TEST_SESSION_KEY, TEST_EMAIL, TEST_ROLE)
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/login/getToken"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad key" })))
        .mount(&app.server)
        .await;

    let tokens = app.client.token_provider();
    assert!(tokens.fetch_token().await.is_none());
    assert!(matches!(
        tokens.try_fetch_token().await,
        Err(ClientError::TokenFetchFailed(_))
    ));
}

#[tokio::test]
async fn body_without_token_yields_none() {
    let app = TestPortal::spawn().await;
    app.client
        .session
        .login(TEST_SESSION_KEY, TEST_EMAIL, TEST_ROLE)
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/login/getToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "" })))
        .mount(&app.server)
        .await;

    assert!(app.client.token_provider().fetch_token().await.is_none());
}

#[tokio::test]
async fn unreachable_backend_yields_none() {
    // Nothing listens on the discard port.
    let client = PortalClient::with_storage(BackendSettings::new("http://127.0.0.1:9"), None)
        .unwrap();
    client
        .session
        .login(TEST_SESSION_KEY, TEST_EMAIL, TEST_ROLE)
        .await
        .unwrap();

    assert!(client.token_provider().fetch_token().await.is_none());
}
