//! Tests for auth module
//!
//! These tests drive the full router in-process:
//! - Login routes with stub provider verifiers
//! - Malformed bodies
//! - Session authentication on `/auth/me`

#[cfg(test)]
mod tests {
    use super::super::identity::{FacebookClaims, GoogleClaims, Provider, ProviderClaims};
    use super::super::token::SessionTokenIssuer;
    use crate::build_router;
    use crate::common::config::SESSION_TTL_SECS;
    use crate::common::{AppConfig, AppState};
    use crate::services::{ProviderVerifier, VerificationError};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
        Router,
    };
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Answers from a fixed table keyed by credential; unknown credentials
    /// fail the way a provider rejection does
    struct StubVerifier {
        provider: Provider,
        answers: HashMap<String, ProviderClaims>,
        expected_audience: Option<String>,
    }

    impl StubVerifier {
        fn new(provider: Provider) -> Self {
            Self {
                provider,
                answers: HashMap::new(),
                expected_audience: None,
            }
        }

        fn with(mut self, credential: &str, claims: ProviderClaims) -> Self {
            self.answers.insert(credential.to_string(), claims);
            self
        }

        fn expecting_audience(mut self, audience: &str) -> Self {
            self.expected_audience = Some(audience.to_string());
            self
        }
    }

    #[async_trait]
    impl ProviderVerifier for StubVerifier {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn verify(&self, credential: &str) -> Result<ProviderClaims, VerificationError> {
            let claims = self
                .answers
                .get(credential)
                .cloned()
                .ok_or_else(|| VerificationError::Payload("unknown credential".to_string()))?;

            if let (Some(expected), ProviderClaims::Google(google)) =
                (&self.expected_audience, &claims)
            {
                if &google.audience != expected {
                    return Err(VerificationError::AudienceMismatch {
                        actual: google.audience.clone(),
                    });
                }
            }
            Ok(claims)
        }
    }

    fn test_config() -> AppConfig {
        let vars: HashMap<&str, &str> = [
            ("JWT_SECRET", "router-test-secret"),
            ("JWT_ISSUER", "https://handy.com"),
            ("JWT_AUDIENCE", "handy-app"),
        ]
        .into_iter()
        .collect();
        AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    fn google_claims(sub: &str, aud: &str) -> ProviderClaims {
        ProviderClaims::Google(GoogleClaims {
            subject_id: sub.to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            photo_url: Some("https://lh3.googleusercontent.com/a/ada".to_string()),
            audience: aud.to_string(),
            issuer: "https://accounts.google.com".to_string(),
        })
    }

    fn app_with(google: StubVerifier, facebook: StubVerifier) -> Router {
        let state = AppState::with_verifiers(test_config(), Arc::new(google), Arc::new(facebook));
        build_router(state)
    }

    fn default_app() -> Router {
        let google = StubVerifier::new(Provider::Google).with("good-id-token", google_claims("1001", "client-1"));
        let facebook = StubVerifier::new(Provider::Facebook)
            .with(
                "fb-no-email",
                ProviderClaims::Facebook(FacebookClaims {
                    provider_id: "123".to_string(),
                    name: "A".to_string(),
                    email: None,
                }),
            )
            .with(
                "fb-with-email",
                ProviderClaims::Facebook(FacebookClaims {
                    provider_id: "456".to_string(),
                    name: "B".to_string(),
                    email: Some("b@example.com".to_string()),
                }),
            );
        app_with(google, facebook)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_me(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri("/auth/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_google_login_returns_token_and_user() {
        let response = default_app()
            .oneshot(post_json("/auth/google", r#"{"idToken":"good-id-token"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["user"]["id"], "google_1001");
        assert_eq!(body["user"]["email"], "ada@example.com");
        assert_eq!(body["user"]["name"], "Ada Lovelace");
        assert_eq!(body["user"]["photoUrl"], "https://lh3.googleusercontent.com/a/ada");
        assert!(body["token"].as_str().map_or(false, |t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_google_login_with_rejected_token() {
        let response = default_app()
            .oneshot(post_json("/auth/google", r#"{"idToken":"bad"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Invalid Google token"})
        );
    }

    #[tokio::test]
    async fn test_google_login_with_foreign_audience() {
        let google = StubVerifier::new(Provider::Google)
            .with("foreign", google_claims("1", "other-client"))
            .expecting_audience("client-1");
        let app = app_with(google, StubVerifier::new(Provider::Facebook));

        let response = app
            .oneshot(post_json("/auth/google", r#"{"idToken":"foreign"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Token audience mismatch"})
        );
    }

    #[tokio::test]
    async fn test_google_login_without_audience_config_accepts_any_audience() {
        let google =
            StubVerifier::new(Provider::Google).with("foreign", google_claims("1", "other-client"));
        let app = app_with(google, StubVerifier::new(Provider::Facebook));

        let response = app
            .oneshot(post_json("/auth/google", r#"{"idToken":"foreign"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_facebook_login_without_email_gets_placeholder() {
        let response = default_app()
            .oneshot(post_json("/auth/facebook", r#"{"accessToken":"fb-no-email"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["user"]["id"], "facebook_123");
        assert_eq!(body["user"]["name"], "A");
        assert_eq!(body["user"]["email"], "facebook_123@facebook.com");
        assert!(body["user"].get("photoUrl").is_none());
    }

    #[tokio::test]
    async fn test_facebook_login_with_rejected_token() {
        let response = default_app()
            .oneshot(post_json("/auth/facebook", r#"{"accessToken":"expired"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Invalid Facebook token"})
        );
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_bad_requests() {
        let cases = [
            ("/auth/google", "not json"),
            ("/auth/google", r#"{"id_token":"snake-case"}"#),
            ("/auth/google", r#"{"idToken":42}"#),
            ("/auth/facebook", "{}"),
            ("/auth/facebook", ""),
        ];

        for (uri, body) in cases {
            let response = default_app().oneshot(post_json(uri, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", uri, body);
            assert_eq!(
                json_body(response).await,
                serde_json::json!({"error": "Invalid request body"})
            );
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/google")
            .body(Body::from(r#"{"idToken":"good-id-token"}"#))
            .unwrap();

        let response = default_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_then_me_round_trip() {
        let app = default_app();

        let login = app
            .clone()
            .oneshot(post_json("/auth/facebook", r#"{"accessToken":"fb-with-email"}"#))
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::OK);
        let token = json_body(login).await["token"].as_str().unwrap().to_string();

        let me = app
            .oneshot(get_me(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(me.status(), StatusCode::OK);
        assert_eq!(
            json_body(me).await,
            serde_json::json!({
                "id": "facebook_456",
                "name": "B",
                "email": "b@example.com"
            })
        );
    }

    #[tokio::test]
    async fn test_me_with_expired_token_is_unauthorized_with_empty_body() {
        let config = test_config();
        let issued_at = Utc::now().timestamp() - SESSION_TTL_SECS - 60;
        let token = SessionTokenIssuer::from_config(&config)
            .issue_at("google_1001", "ada@example.com", "Ada", issued_at)
            .unwrap();

        let response = default_app()
            .oneshot(get_me(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer realm=\"Handy App\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_me_accepts_token_in_its_last_minute() {
        let config = test_config();
        let issued_at = Utc::now().timestamp() - SESSION_TTL_SECS + 30;
        let token = SessionTokenIssuer::from_config(&config)
            .issue_at("google_1001", "ada@example.com", "Ada", issued_at)
            .unwrap();

        let response = default_app()
            .oneshot(get_me(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], "google_1001");
    }

    #[tokio::test]
    async fn test_large_body_outcome_does_not_depend_on_log_level() {
        let body = format!(
            r#"{{"idToken":"good-id-token","pad":"{}"}}"#,
            "x".repeat(70 * 1024)
        );

        let at_info = default_app()
            .oneshot(post_json("/auth/google", &body))
            .await
            .unwrap();
        assert_eq!(at_info.status(), StatusCode::OK);

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let at_debug = default_app()
            .oneshot(post_json("/auth/google", &body))
            .await
            .unwrap();
        assert_eq!(at_debug.status(), StatusCode::OK);
        assert_eq!(json_body(at_debug).await["user"]["id"], "google_1001");

        let small = default_app()
            .oneshot(post_json("/auth/google", r#"{"idToken":"good-id-token"}"#))
            .await
            .unwrap();
        assert_eq!(small.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_rejects_missing_and_foreign_tokens() {
        let foreign = SessionTokenIssuer::new("some-other-secret", "https://handy.com", "handy-app")
            .issue("google_1", "a@example.com", "A")
            .unwrap();
        let foreign_header = format!("Bearer {}", foreign);

        for authorization in [
            None,
            Some("Bearer"),
            Some("Bearer not-a-jwt"),
            Some("Basic dXNlcjpwYXNz"),
            Some(foreign_header.as_str()),
        ] {
            let response = default_app().oneshot(get_me(authorization)).await.unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "authorization: {:?}",
                authorization
            );
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = default_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
    }
}
