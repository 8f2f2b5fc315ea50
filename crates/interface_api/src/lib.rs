//! HTTP API Layer
//!
//! Exposes the insurance ledger contract over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: `POST /api/v1/invoke` dispatches any operation by name;
//!   resource routes cover persons, policies and claims
//! - **Middleware**: request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: contract error kinds mapped to HTTP statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let contract = InsuranceContract::new(Arc::new(InMemoryLedgerStore::new()));
//! let app = create_router(contract);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use insurance_contract::InsuranceContract;

use crate::handlers::{claims, health, invoke, persons, policies};
use crate::middleware::{request_logging_middleware, MakeRequestUuidV7};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub contract: InsuranceContract,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `contract` - The contract serving every operation
pub fn create_router(contract: InsuranceContract) -> Router {
    let state = AppState { contract };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let person_routes = Router::new()
        .route("/", post(persons::create_person))
        .route("/:id", get(persons::get_person))
        .route("/:id/records", get(persons::get_person_records));

    let policy_routes = Router::new()
        .route("/", post(policies::create_policy))
        .route("/:id", get(policies::get_policy));

    let claims_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/:id", get(claims::get_claim))
        .route("/:id/confirm", post(claims::confirm_claim))
        .route("/:id/reject", post(claims::reject_claim));

    let api_routes = Router::new()
        .route("/invoke", post(invoke::invoke))
        .nest("/persons", person_routes)
        .nest("/policies", policy_routes)
        .nest("/claims", claims_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_logging_middleware))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
