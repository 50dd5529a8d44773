//! # Routes
//!
//! Axum router for the storefront API. Gates are expressed in the handler
//! signatures (`Identity` / `AdminIdentity` extractors), so the table below
//! is the whole authorization story:
//!
//! - GET  `/` - greeting
//! - GET  `/product`, `/product/{id}` - open
//! - POST `/product`, DELETE `/product/{id}` - auth + admin
//! - GET  `/orders?user=email` - auth, owner only
//! - GET  `/orders/{id}`, DELETE `/orders/{id}` - auth
//! - POST `/orders`, PATCH `/orders/{id}` - open
//! - GET  `/allOrders`, DELETE `/allOrders/{id}` - auth + admin
//! - PUT  `/allOrders/{id}` - open
//! - GET  `/user` - auth
//! - PUT  `/user/{email}` - open (login/registration)
//! - PUT  `/user/admin/{email}` - auth + admin
//! - GET  `/admin/{email}` - open
//! - GET  `/review`, POST `/review` - open
//! - POST `/create-payment-intent` - auth

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // The storefront frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::greeting))
        // Products
        .route(
            "/product",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/product/{id}",
            get(handlers::get_product).delete(handlers::delete_product),
        )
        // Orders
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/orders/{id}",
            get(handlers::get_order)
                .patch(handlers::finalize_order)
                .delete(handlers::delete_order),
        )
        // Orders, admin views
        .route("/allOrders", get(handlers::list_all_orders))
        .route(
            "/allOrders/{id}",
            put(handlers::update_order_status).delete(handlers::delete_order_admin),
        )
        // Users
        .route("/user", get(handlers::list_users))
        .route("/user/{email}", put(handlers::upsert_user))
        .route("/user/admin/{email}", put(handlers::promote_admin))
        .route("/admin/{email}", get(handlers::check_admin))
        // Reviews
        .route(
            "/review",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        // Payments
        .route(
            "/create-payment-intent",
            post(handlers::create_payment_intent),
        )
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
