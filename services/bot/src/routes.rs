//! Interactions service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, warn};

use crate::{
    AppState,
    dispatcher::Dispatch,
    error::BotError,
    middleware::verify_signature,
    models::Interaction,
};

/// Create the router for the interactions service
pub fn create_router(state: AppState) -> Router {
    let signed_routes = Router::new()
        .route("/interactions", post(interactions))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            verify_signature,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(signed_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, BotError> {
    let active_games = state.dispatcher.store().len().await.map_err(|e| {
        error!("Failed to count games: {}", e);
        BotError::InternalServerError
    })?;

    Ok(Json(json!({
        "status": "ok",
        "service": "rps-bot",
        "active_games": active_games
    })))
}

/// Interactions endpoint called by the platform
pub async fn interactions(
    State(state): State<AppState>,
    Json(interaction): Json<Interaction>,
) -> Result<Response, BotError> {
    match state.dispatcher.dispatch(&interaction).await? {
        Dispatch::Reply { response, followup } => {
            if let Some(followup) = followup {
                followup.spawn(state.discord_client.clone(), state.app_id.clone());
            }
            Ok(Json(response).into_response())
        }
        Dispatch::SessionNotFound { session_id } => {
            warn!(
                "Interaction {} refers to game {} which is not in progress",
                interaction.id, session_id
            );
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dispatcher::Dispatcher,
        middleware::{
            Verifier,
            tests::{public_key_hex, sign},
        },
        store::tests::fixed_store,
    };
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use common::{client::DiscordClient, config::DiscordConfig};
    use serde_json::{Value, json};
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const TIMESTAMP: &str = "1700000000";

    fn app() -> Router {
        app_with_platform("http://127.0.0.1:9")
    }

    fn app_with_platform(api_base_url: &str) -> Router {
        let config = DiscordConfig {
            app_id: "app".to_string(),
            guild_id: None,
            public_key: public_key_hex(),
            token: "secret".to_string(),
            api_base_url: api_base_url.to_string(),
        };

        let state = AppState {
            app_id: config.app_id.clone(),
            dispatcher: Dispatcher::new(Arc::new(fixed_store())),
            verifier: Verifier::from_hex(&config.public_key).expect("valid key"),
            discord_client: DiscordClient::new(&config).expect("Failed to build client"),
        };

        create_router(state)
    }

    fn signed(body: &Value) -> Request<Body> {
        let body = serde_json::to_vec(body).expect("serializable");
        Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .header("x-signature-ed25519", sign(TIMESTAMP, &body))
            .header("x-signature-timestamp", TIMESTAMP)
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = app();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["active_games"], 0);
    }

    #[tokio::test]
    async fn test_unsigned_request_is_rejected() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"id":"p","type":1}"#))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Bad request signature");
    }

    #[tokio::test]
    async fn test_tampered_body_is_rejected() {
        let app = app();
        let signature = sign(TIMESTAMP, br#"{"id":"p","type":1}"#);
        let request = Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("content-type", "application/json")
            .header("x-signature-ed25519", signature)
            .header("x-signature-timestamp", TIMESTAMP)
            .body(Body::from(r#"{"id":"p","type":2}"#))
            .unwrap();

        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_ping_returns_pong() {
        let app = app();
        let (status, body) = send(&app, signed(&json!({ "id": "p", "type": 1 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "type": 1 }));
    }

    #[tokio::test]
    async fn test_challenge_flow_over_http() {
        let app = app();

        let (status, body) = send(
            &app,
            signed(&json!({
                "id": "S1",
                "type": 2,
                "token": "t1",
                "member": { "user": { "id": "A" } },
                "data": {
                    "name": "challenge",
                    "options": [{ "name": "object", "type": 3, "value": "rock" }]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], 4);
        assert_eq!(
            body["data"]["components"][0]["components"][0]["custom_id"],
            "accept_button_S1"
        );

        let (status, body) = send(
            &app,
            signed(&json!({
                "id": "I2",
                "type": 3,
                "token": "t2",
                "member": { "user": { "id": "B" } },
                "message": { "id": "M1" },
                "data": { "custom_id": "accept_button_S1" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["flags"], 64);
        let menu = &body["data"]["components"][0]["components"][0];
        assert_eq!(menu["custom_id"], "select_choice_S1");
        assert_eq!(menu["options"].as_array().map(Vec::len), Some(3));

        let (status, body) = send(
            &app,
            signed(&json!({
                "id": "I3",
                "type": 3,
                "token": "t3",
                "member": { "user": { "id": "B" } },
                "message": { "id": "M2" },
                "data": { "custom_id": "select_choice_S1", "values": ["scissors"] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["content"],
            "<@A>'s **rock** crushes <@B>'s **scissors**"
        );

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(&app, request).await;
        assert_eq!(body["active_games"], 0);
    }

    #[tokio::test]
    async fn test_selection_for_unknown_game_has_no_content() {
        let app = app();
        let (status, body) = send(
            &app,
            signed(&json!({
                "id": "I3",
                "type": 3,
                "token": "t3",
                "user": { "id": "B" },
                "data": { "custom_id": "select_choice_never", "values": ["paper"] }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_command_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            signed(&json!({ "id": "x", "type": 2, "data": { "name": "poker" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown command: poker");
    }

    #[tokio::test]
    async fn test_failed_followup_does_not_affect_reply() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/webhooks/app/t2/messages/M1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_with_platform(&server.uri());
        let (status, body) = send(
            &app,
            signed(&json!({
                "id": "I2",
                "type": 3,
                "token": "t2",
                "member": { "user": { "id": "B" } },
                "message": { "id": "M1" },
                "data": { "custom_id": "accept_button_S1" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], 4);
        assert_eq!(
            body["data"]["components"][0]["components"][0]["custom_id"],
            "select_choice_S1"
        );

        // The follow-up runs in the background after the reply
        for _ in 0..50 {
            let received = server.received_requests().await.unwrap_or_default();
            if !received.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let received = server.received_requests().await.unwrap_or_default();
        assert_eq!(received.len(), 1);

        let (status, _) = send(&app, signed(&json!({ "id": "p", "type": 1 }))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
