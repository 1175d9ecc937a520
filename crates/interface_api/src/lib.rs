//! HTTP API Layer
//!
//! This crate provides the REST API for the claim lifecycle engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Thin adapters from HTTP onto the claim engine
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Domain errors mapped onto HTTP status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimEngine;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
///
/// The pool is optional so the router can run against an in-memory store;
/// readiness reports ready without a database in that case.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ClaimEngine>,
    pub pool: Option<PgPool>,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::draft_claim).get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/submit", post(claims::submit_claim))
        .route("/:id/documents", post(claims::attach_document))
        .route("/:id/notes", post(claims::add_note).get(claims::list_notes))
        .route("/:id/review", post(claims::begin_review))
        .route("/:id/request-info", post(claims::request_more_info))
        .route("/:id/resubmit", post(claims::resubmit_claim))
        .route("/:id/approve", post(claims::approve_claim))
        .route("/:id/deny", post(claims::deny_claim))
        .route("/:id/escalate", post(claims::escalate_claim))
        .route("/:id/decisions", get(claims::list_decisions))
        .route("/:id/fraud-signals", post(claims::record_fraud_signals))
        .route("/:id/risk", get(claims::get_risk))
        .route(
            "/:id/investigations",
            post(claims::open_investigation).get(claims::list_investigations),
        )
        .route(
            "/:id/legal-cases",
            post(claims::open_legal_case).get(claims::list_legal_cases),
        );

    let work_item_routes = Router::new()
        .route("/investigations/:id/close", post(claims::close_investigation))
        .route("/legal-cases/:id/close", post(claims::close_legal_case));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .merge(work_item_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
