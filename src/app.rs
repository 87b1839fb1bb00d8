use std::sync::Arc;

use axum::{
    handler::Handler,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::auth::AuthGate;
use crate::config::AppConfig;
use crate::database::Stores;
use crate::handlers::{coffee, health, listings, trivia};
use crate::middleware::{require_permission, PermissionGuard};
use crate::services::{DrinkService, ListingService, TriviaService};
use crate::types::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};

/// Everything a handler can reach. Built once at startup (or per test) and
/// cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub stores: Stores,
    pub gate: Arc<AuthGate>,
    pub trivia: TriviaService,
    pub drinks: DrinkService,
    pub listings: ListingService,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores, gate: AuthGate) -> Self {
        Self {
            config: Arc::new(config),
            trivia: TriviaService::new(&stores),
            drinks: DrinkService::new(&stores),
            listings: ListingService::new(&stores),
            gate: Arc::new(gate),
            stores,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .merge(trivia_routes())
        .merge(drinks_routes(&state))
        .merge(listings_routes())
        // Global middleware: tracing outermost, then CORS
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn trivia_routes() -> Router<AppState> {
    use axum::routing::delete;

    Router::new()
        .route("/categories", get(trivia::categories_get))
        .route("/categories/:id/questions", get(trivia::category_questions))
        .route("/questions", get(trivia::questions_get).post(trivia::questions_post))
        .route("/questions/:id", delete(trivia::questions_delete))
        .route("/quizzes", post(trivia::quizzes_post))
}

fn drinks_routes(state: &AppState) -> Router<AppState> {
    use axum::routing::patch;

    // Each gated handler gets its own layer; the gate runs before any extractor
    // touches the body or the store.
    let guard = |permission: &'static str| {
        middleware::from_fn_with_state(
            PermissionGuard::new(state.gate.clone(), permission),
            require_permission,
        )
    };

    Router::new()
        .route(
            "/drinks",
            get(coffee::drinks_list).post(coffee::drinks_create.layer(guard(POST_DRINKS))),
        )
        .route(
            "/drinks-detail",
            get(coffee::drinks_detail.layer(guard(GET_DRINKS_DETAIL))),
        )
        .route(
            "/drinks/:id",
            patch(coffee::drinks_update.layer(guard(PATCH_DRINKS)))
                .delete(coffee::drinks_delete.layer(guard(DELETE_DRINKS))),
        )
}

fn listings_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(listings::venues_list).post(listings::venues_create))
        .route("/venues/search", post(listings::venues_search))
        .route(
            "/venues/:id",
            get(listings::venue_get)
                .patch(listings::venues_update)
                .delete(listings::venues_delete),
        )
        .route("/artists", get(listings::artists_list).post(listings::artists_create))
        .route("/artists/search", post(listings::artists_search))
        .route(
            "/artists/:id",
            get(listings::artist_get)
                .patch(listings::artists_update)
                .delete(listings::artists_delete),
        )
        .route("/shows", get(listings::shows_list).post(listings::shows_create))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unusable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}
