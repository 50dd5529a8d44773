//! # shop-api
//!
//! HTTP API layer for the toolshop storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The authorization gate (bearer credential, then admin role)
//! - REST endpoints over the five resource stores
//! - The payment-intent endpoint backed by the Stripe bridge
//!
//! ## Endpoints
//!
//! | Method | Path | Auth | Description |
//! |--------|------|------|-------------|
//! | GET | `/` | - | greeting |
//! | GET | `/product`, `/product/{id}` | - | catalog |
//! | POST | `/product` | admin | add product |
//! | DELETE | `/product/{id}` | admin | remove product |
//! | GET | `/orders?user=email` | auth | own orders |
//! | GET/DELETE | `/orders/{id}` | auth | single order |
//! | POST | `/orders` | - | checkout |
//! | PATCH | `/orders/{id}` | - | finalize payment |
//! | GET | `/allOrders` | admin | all orders |
//! | PUT | `/allOrders/{id}` | - | status update |
//! | DELETE | `/allOrders/{id}` | admin | remove order |
//! | GET | `/user` | auth | account list |
//! | PUT | `/user/{email}` | - | upsert + token |
//! | PUT | `/user/admin/{email}` | admin | promote |
//! | GET | `/admin/{email}` | - | `{admin: bool}` |
//! | GET/POST | `/review` | - | reviews |
//! | POST | `/create-payment-intent` | auth | `{clientSecret}` |

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
