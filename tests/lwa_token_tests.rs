//! Integration tests for the LWA refresh-token grant.
//!
//! A wiremock server stands in for `api.amazon.com/auth/o2/token`.

use marketplace_bridge::{AuthError, LwaCredentials, LwaTokenProvider};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LwaCredentials {
    LwaCredentials::new(
        "amzn1.application-oa2-client.test",
        "test-client-secret",
        "Atzr|test-refresh",
    )
}

fn provider(server: &MockServer) -> LwaTokenProvider {
    LwaTokenProvider::new(format!("{}/auth/o2/token", server.uri()))
}

#[tokio::test]
async fn test_fetch_token_posts_refresh_grant_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/o2/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains(
            "client_id=amzn1.application-oa2-client.test",
        ))
        .and(body_string_contains("client_secret=test-client-secret"))
        .and(body_string_contains("refresh_token=Atzr%7Ctest-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "Atza|access",
            "refresh_token": "Atzr|test-refresh",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = provider(&server).fetch_token(&credentials()).await.unwrap();

    assert_eq!(token.access_token, "Atza|access");
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.expires_in, 3600);
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_each_call_sends_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/o2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "a"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let provider = provider(&server);
    let first = provider.fetch_token(&credentials()).await.unwrap();
    let second = provider.fetch_token(&credentials()).await.unwrap();

    assert_eq!(first.access_token, second.access_token);
    // Defaults apply when the endpoint omits them
    assert_eq!(first.expires_in, 3600);
    assert_eq!(first.token_type, "bearer");
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider(&server);

    for (credentials, field) in [
        (LwaCredentials::new("", "secret", "refresh"), "client_id"),
        (LwaCredentials::new("id", " ", "refresh"), "client_secret"),
        (LwaCredentials::new("id", "secret", ""), "refresh_token"),
    ] {
        let result = provider.fetch_token(&credentials).await;
        assert_eq!(result.unwrap_err(), AuthError::MissingCredential { field });
    }
}

#[tokio::test]
async fn test_error_status_is_token_request_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/o2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "The request has an invalid grant parameter"
        })))
        .mount(&server)
        .await;

    let result = provider(&server).fetch_token(&credentials()).await;

    match result {
        Err(AuthError::TokenRequestFailed { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid_grant"));
        }
        other => panic!("Expected TokenRequestFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_body_without_access_token_is_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/o2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token_type": "bearer"})),
        )
        .mount(&server)
        .await;

    let result = provider(&server).fetch_token(&credentials()).await;
    assert!(matches!(
        result,
        Err(AuthError::InvalidTokenResponse { .. })
    ));
}

#[tokio::test]
async fn test_non_json_body_is_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/o2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = provider(&server).fetch_token(&credentials()).await;
    assert!(matches!(
        result,
        Err(AuthError::InvalidTokenResponse { .. })
    ));
}
