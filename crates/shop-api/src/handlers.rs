//! # Request Handlers
//!
//! One handler per (method, resource) pair. Every handler delegates straight
//! to the injected stores (at most two store calls each) and passes the
//! store's ack or document back unchanged.
//!
//! Not-found policy differs by operation type, on purpose: single-item GET
//! misses answer 200 with a `null` body, while DELETE and PUT misses answer
//! 200 with a zero-count ack.

use crate::auth::{AdminIdentity, Identity};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shop_core::{
    to_document, DeleteAck, Document, DocumentStore, Filter, FinalizePayment, InsertAck,
    ShopError, StatusUpdate, UpdateAck, User,
};
use tracing::{info, instrument};

// =============================================================================
// Request Types
// =============================================================================

/// Query string of GET /orders
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub user: Option<String>,
}

/// Body of POST /create-payment-intent
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub price: f64,
}

// =============================================================================
// Root
// =============================================================================

/// Plain greeting at the root
pub async fn greeting() -> &'static str {
    "Hello from tools manufacturer"
}

// =============================================================================
// Products
// =============================================================================

/// Full catalog list
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.stores.products.find(Filter::new()).await?))
}

/// Single product; a miss answers 200 with `null`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let product = state.stores.products.find_one(Filter::by_id(id)).await?;
    Ok(Json(product.map(Value::Object).unwrap_or(Value::Null)))
}

/// Add a catalog item. Admin only; the body is stored verbatim.
pub async fn create_product(
    State(state): State<AppState>,
    AdminIdentity(identity): AdminIdentity,
    Json(body): Json<Document>,
) -> ApiResult<Json<InsertAck>> {
    info!("{} adding a product", identity.email);
    Ok(Json(state.stores.products.insert_one(body).await?))
}

/// Remove a catalog item. Admin only; a miss acks with count 0.
pub async fn delete_product(
    State(state): State<AppState>,
    AdminIdentity(_): AdminIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    Ok(Json(state.stores.products.delete_one(Filter::by_id(id)).await?))
}

// =============================================================================
// Orders
// =============================================================================

/// Orders for one user. The caller may only read their own: the query email
/// must equal the credential's email, orders or not.
pub async fn list_orders(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Json<Vec<Document>>> {
    if query.user.as_deref() != Some(identity.email.as_str()) {
        return Err(ShopError::Forbidden(
            "orders may only be read by their owner".to_string(),
        )
        .into());
    }

    let orders = state
        .stores
        .orders
        .find(Filter::new().eq("user", identity.email))
        .await?;
    Ok(Json(orders))
}

/// Single order; a miss answers 200 with `null`
pub async fn get_order(
    State(state): State<AppState>,
    _identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let order = state.stores.orders.find_one(Filter::by_id(id)).await?;
    Ok(Json(order.map(Value::Object).unwrap_or(Value::Null)))
}

/// Checkout: store the order body verbatim
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<Document>,
) -> ApiResult<Json<InsertAck>> {
    Ok(Json(state.stores.orders.insert_one(body).await?))
}

/// Finalize an order's payment: record the payment, then mark the order
/// paid.
///
/// The two writes are independent; a failure after the first leaves an
/// orphaned payment record and an untouched order. That window is accepted:
/// there is no compensating delete.
#[instrument(skip(state, body), fields(order_id = %id))]
pub async fn finalize_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FinalizePayment>,
) -> ApiResult<Json<UpdateAck>> {
    let payment = to_document(&body)?;
    state.stores.payments.insert_one(payment).await?;

    let mut changes = Document::new();
    changes.insert("paid".to_string(), Value::Bool(true));
    changes.insert(
        "transactionId".to_string(),
        Value::String(body.transaction_id.clone()),
    );
    if let Some(status) = &body.status {
        changes.insert("status".to_string(), Value::String(status.clone()));
    }

    let ack = state
        .stores
        .orders
        .update_one(Filter::by_id(id), changes, false)
        .await?;

    info!("payment {} recorded", body.transaction_id);
    Ok(Json(ack))
}

/// Delete an order; a miss acks with count 0
pub async fn delete_order(
    State(state): State<AppState>,
    _identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    Ok(Json(state.stores.orders.delete_one(Filter::by_id(id)).await?))
}

// =============================================================================
// Orders (admin views)
// =============================================================================

/// Every order, across all users. Admin only.
pub async fn list_all_orders(
    State(state): State<AppState>,
    AdminIdentity(_): AdminIdentity,
) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.stores.orders.find(Filter::new()).await?))
}

/// Move an order through the workflow (pending → approved → shipped …) and
/// sync the status onto a payment document sharing the identifier.
///
/// Payments carry their own generated ids, so the second update routinely
/// matches zero documents. Rekeying payments to order ids needs a product
/// decision first; until then the zero-match write stays.
#[instrument(skip(state, body), fields(order_id = %id))]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> ApiResult<Json<UpdateAck>> {
    let mut changes = Document::new();
    changes.insert("status".to_string(), Value::String(body.status.clone()));

    let ack = state
        .stores
        .orders
        .update_one(Filter::by_id(id.clone()), changes.clone(), false)
        .await?;

    state
        .stores
        .payments
        .update_one(Filter::by_id(id), changes, false)
        .await?;

    Ok(Json(ack))
}

/// Admin delete of any order; a miss acks with count 0
pub async fn delete_order_admin(
    State(state): State<AppState>,
    AdminIdentity(_): AdminIdentity,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    Ok(Json(state.stores.orders.delete_one(Filter::by_id(id)).await?))
}

// =============================================================================
// Users
// =============================================================================

/// Full account list
pub async fn list_users(
    State(state): State<AppState>,
    _identity: Identity,
) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.stores.users.find(Filter::new()).await?))
}

/// Login/registration: upsert the profile under the email key and mint a
/// fresh credential for it. First-time callers get created, returning
/// callers get their profile merged and re-authenticated, same endpoint.
#[instrument(skip(state, body), fields(email = %email))]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<Document>,
) -> ApiResult<Json<Value>> {
    let ack = state
        .stores
        .users
        .update_one(Filter::new().eq("email", email.clone()), body, true)
        .await?;

    let token = state.tokens.issue(&email);

    Ok(Json(json!({
        "result": ack,
        "token": token,
    })))
}

/// Promote an email to admin. Admin only. No existence check: promoting an
/// unknown email matches zero documents and acks as such.
pub async fn promote_admin(
    State(state): State<AppState>,
    AdminIdentity(identity): AdminIdentity,
    Path(email): Path<String>,
) -> ApiResult<Json<UpdateAck>> {
    let mut changes = Document::new();
    changes.insert("role".to_string(), Value::String("admin".to_string()));

    let ack = state
        .stores
        .users
        .update_one(Filter::new().eq("email", email.clone()), changes, false)
        .await?;

    info!("{} promoted {} to admin", identity.email, email);
    Ok(Json(ack))
}

/// Does this email hold the admin role? Open endpoint the storefront uses to
/// decide which navigation to render.
pub async fn check_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    let account = state
        .stores
        .users
        .find_one(Filter::new().eq("email", email))
        .await?;

    let admin = match account {
        Some(doc) => serde_json::from_value::<User>(Value::Object(doc))
            .map(|user| user.is_admin())
            .unwrap_or(false),
        None => false,
    };

    Ok(Json(json!({ "admin": admin })))
}

// =============================================================================
// Reviews
// =============================================================================

/// Every review
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.stores.reviews.find(Filter::new()).await?))
}

/// Leave a review; the body is stored verbatim
pub async fn create_review(
    State(state): State<AppState>,
    Json(body): Json<Document>,
) -> ApiResult<Json<InsertAck>> {
    Ok(Json(state.stores.reviews.insert_one(body).await?))
}

// =============================================================================
// Payments
// =============================================================================

/// Turn a price into a processor-side payment intent and hand the client
/// secret back. No retry; a processor failure propagates as 5xx.
#[instrument(skip(state, _identity, body))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    _identity: Identity,
    Json(body): Json<IntentRequest>,
) -> ApiResult<Json<Value>> {
    let intent = state.payments.create_intent(body.price).await?;
    Ok(Json(json!({ "clientSecret": intent.client_secret })))
}
