// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::error::AuthErrorBody,
    error::FailBody,
    gates::{enforce, ExistenceGate, GateChain},
    models::{User, UserPayload},
    state::AppState,
};

pub mod health;
pub mod users;

/// Build the application router.
///
/// | Route | Gates |
/// |-------|-------|
/// | `GET /users`, `POST /users` | none |
/// | `GET /users/{user_id}` | bearer |
/// | `PUT`/`DELETE /users/{user_id}` | user-exists, then bearer |
pub fn router(state: AppState) -> Router {
    let read_gates = GateChain::new().then(state.auth.clone());
    let write_gates = GateChain::new()
        .then(ExistenceGate::new(state.users.clone(), state.request_timeout))
        .then(state.auth.clone());

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .layer(from_fn_with_state(read_gates, enforce))
                .merge(
                    put(users::update_user)
                        .delete(users::delete_user)
                        .layer(from_fn_with_state(write_gates, enforce)),
                ),
        )
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(User, UserPayload, FailBody, AuthErrorBody)
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Users", description = "User management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
