// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.
//!
//! Handlers only translate between HTTP and the [`UserService`]; gates are
//! attached per route in [`super::router`].
//!
//! [`UserService`]: crate::service::UserService

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    models::{ApiResponse, User, UserPayload},
    scope::OperationScope,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<User>>),
        (status = 500, description = "Store failure", body = crate::error::FailBody)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let scope = OperationScope::new(state.request_timeout);
    let users = scope.run(state.users.get_users()).await?;
    Ok(Json(ApiResponse::success(users)))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Identifier of the user")
    ),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The user, or null data if absent", body = ApiResponse<User>),
        (status = 401, description = "Missing, malformed or invalid token", body = crate::auth::error::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::FailBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Option<User>>>, ApiError> {
    let scope = OperationScope::new(state.request_timeout);
    let user = scope.run(state.users.get_user(&user_id)).await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    tag = "Users",
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Unparseable body", body = crate::error::FailBody),
        (status = 500, description = "Store failure", body = crate::error::FailBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let scope = OperationScope::new(state.request_timeout);
    let user = scope.run(state.users.create_user(payload)).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user).with_message("User has been created successfully!")),
    ))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Identifier of the user to update")
    ),
    request_body = UserPayload,
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, description = "User not found or unparseable body", body = crate::error::FailBody),
        (status = 401, description = "Missing, malformed or invalid token", body = crate::auth::error::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::FailBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let scope = OperationScope::new(state.request_timeout);
    let user = scope.run(state.users.update_user(&user_id, payload)).await?;

    Ok(Json(
        ApiResponse::success(user).with_message("User has been updated successfully!"),
    ))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Identifier of the user to delete")
    ),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "User not found", body = crate::error::FailBody),
        (status = 401, description = "Missing, malformed or invalid token", body = crate::auth::error::AuthErrorBody),
        (status = 500, description = "Store failure", body = crate::error::FailBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let scope = OperationScope::new(state.request_timeout);
    scope.run(state.users.delete_user(&user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        api::router,
        auth::{AuthGate, Claims, TokenCodec},
        config::Secret,
        models::User,
        state::AppState,
        storage::{InMemoryUserStore, UserStore},
    };

    const SECRET: &str = "s3cret";

    fn codec() -> TokenCodec {
        TokenCodec::new(&Secret::new(SECRET).unwrap())
    }

    fn seeded_store() -> Arc<InMemoryUserStore> {
        let now = Utc::now();
        Arc::new(InMemoryUserStore::with_users([User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            created_at: now,
            updated_at: now,
        }]))
    }

    fn app_with(store: Arc<InMemoryUserStore>, codec: Option<TokenCodec>) -> Router {
        router(AppState::new(store, AuthGate::new(codec), Duration::from_secs(5)))
    }

    fn app() -> Router {
        app_with(seeded_store(), Some(codec()))
    }

    fn bearer() -> String {
        format!("Bearer {}", codec().issue("tester").unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn create_user_returns_201_envelope() {
        let store = seeded_store();
        let (status, body) = send(
            app_with(Arc::clone(&store), Some(codec())),
            json_request("POST", "/users", r#"{"name":"Grace","email":"grace@example.com"}"#, None),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "User has been created successfully!");
        assert_eq!(body["data"]["name"], "Grace");

        let id = body["data"]["id"].as_str().unwrap();
        assert!(store.find_by_id(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_user_with_malformed_json_is_400() {
        let (status, body) = send(app(), json_request("POST", "/users", r#"{"name": "#, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_users_needs_no_token() {
        let (status, body) = send(app(), empty_request("GET", "/users", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["id"], "u1");
    }

    #[tokio::test]
    async fn get_user_requires_token() {
        let (status, body) = send(app(), empty_request("GET", "/users/u1", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Missing Authorization header"}));

        let (status, body) = send(app(), empty_request("GET", "/users/u1", Some("Basic abc"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid Authorization header format"}));

        let (status, body) = send(app(), empty_request("GET", "/users/u1", Some("Bearer"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid Authorization header format"}));
    }

    #[tokio::test]
    async fn get_user_with_token_returns_user() {
        let (status, body) = send(app(), empty_request("GET", "/users/u1", Some(&bearer()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn get_absent_user_returns_null_data() {
        let (status, body) = send(app(), empty_request("GET", "/users/nobody", Some(&bearer()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "success", "data": null}));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let expired = codec()
            .sign(&Claims::expiring_at("tester", Utc::now() - chrono::Duration::hours(73)))
            .unwrap();

        let (status, body) = send(
            app(),
            empty_request("GET", "/users/u1", Some(&format!("Bearer {expired}"))),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid or expired token"}));
    }

    #[tokio::test]
    async fn missing_secret_is_500() {
        let (status, body) = send(
            app_with(seeded_store(), None),
            empty_request("GET", "/users/u1", Some(&bearer())),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "JWT secret not configured"}));
    }

    #[tokio::test]
    async fn update_of_missing_user_is_400_before_auth() {
        // No token at all: the existence gate must answer first.
        let (status, body) = send(
            app(),
            json_request("PUT", "/users/ghost", r#"{"name":"x","email":"x@example.com"}"#, None),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": "fail", "message": "User not found!"}));
    }

    #[tokio::test]
    async fn update_of_missing_user_never_reaches_token_verification() {
        // Without a secret, any verification attempt would answer 500.
        let (status, _) = send(
            app_with(seeded_store(), None),
            json_request("PUT", "/users/ghost", "{}", Some("Bearer whatever")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_existing_user_with_token() {
        let (status, body) = send(
            app(),
            json_request(
                "PUT",
                "/users/u1",
                r#"{"name":"Ada Lovelace","email":"ada@lovelace.org"}"#,
                Some(&bearer()),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User has been updated successfully!");
        assert_eq!(body["data"]["id"], "u1");
        assert_eq!(body["data"]["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn update_existing_user_without_token_is_401() {
        let (status, _) = send(
            app(),
            json_request("PUT", "/users/u1", r#"{"name":"x","email":"x@example.com"}"#, None),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn update_with_bad_body_is_400() {
        let (status, body) = send(app(), json_request("PUT", "/users/u1", "not json", Some(&bearer()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn delete_existing_user_without_token_is_401() {
        let store = seeded_store();
        let (status, body) = send(
            app_with(Arc::clone(&store), Some(codec())),
            empty_request("DELETE", "/users/u1", None),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Missing Authorization header"}));
        assert!(store.find_by_id("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_existing_user_with_token_is_204() {
        let store = seeded_store();
        let (status, body) = send(
            app_with(Arc::clone(&store), Some(codec())),
            empty_request("DELETE", "/users/u1", Some(&bearer())),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
        assert!(store.find_by_id("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_user_is_400() {
        let (status, body) = send(app(), empty_request("DELETE", "/users/ghost", Some(&bearer()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User not found!");
    }
}
