pub mod actors;
pub mod audit;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod validation;

#[cfg(test)]
mod testing;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use actors::{ActorService, Actor, CreateActor, UpdateActor};
use auth::{AuthService, SignInInput, SignUpInput, SignUpResponse, TokenResponse};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::sign_up_handler,
        auth::handlers::sign_in_handler,
        auth::handlers::refresh_handler,
        actors::handlers::create_actor,
        actors::handlers::list_actors,
        actors::handlers::get_actor,
        actors::handlers::update_actor,
        actors::handlers::delete_actor,
    ),
    components(
        schemas(Actor, CreateActor, UpdateActor, SignUpInput, SignInInput, SignUpResponse, TokenResponse)
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Sign-up, sign-in and token refresh"),
        (name = "actors", description = "Actor catalogue management endpoints")
    ),
    info(
        title = "Hollywood Stars API",
        version = "1.0.0",
        description = "RESTful API for managing a catalogue of actors"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
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

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub actors: Arc<ActorService>,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<ActorService> {
    fn from_ref(state: &AppState) -> Self {
        state.actors.clone()
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/sign-up", post(auth::sign_up_handler))
        .route("/sign-in", post(auth::sign_in_handler))
        .route("/refresh", get(auth::refresh_handler));

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/auth", auth_routes)
        .route(
            "/actors",
            post(actors::create_actor).get(actors::list_actors),
        )
        .route(
            "/actors/:id",
            get(actors::get_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
