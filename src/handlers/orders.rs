use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::checkout::CheckoutService;
use crate::domain::checkout::{CartItem, CustomerPayload};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// One cart line as the storefront sends it. Every field defaults so that a
/// missing or mistyped entry falls through to catalog validation (and its
/// user-facing message) instead of a deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CartItemRequest {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    /// Unit price; accepted as a JSON number, normalized to two decimals
    /// before comparison against the catalog.
    #[serde(default)]
    #[schema(value_type = f64)]
    pub price: BigDecimal,
    #[serde(default)]
    pub quantity: i32,
}

impl From<CartItemRequest> for CartItem {
    fn from(item: CartItemRequest) -> Self {
        CartItem {
            product_id: item.id,
            name: item.name,
            unit_price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Customer data under the storefront's Spanish field names.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CustomerRequest {
    #[serde(default, rename = "nombre")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "telefono")]
    pub phone: Option<String>,
    #[serde(default, rename = "calle")]
    pub street: Option<String>,
    #[serde(default, rename = "numero")]
    pub exterior_number: Option<String>,
    #[serde(default, rename = "colonia")]
    pub neighborhood: Option<String>,
    #[serde(default, rename = "ciudad")]
    pub city: Option<String>,
    #[serde(default, rename = "codigo")]
    pub postal_code: Option<String>,
}

impl From<CustomerRequest> for CustomerPayload {
    fn from(customer: CustomerRequest) -> Self {
        CustomerPayload {
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            street: customer.street,
            exterior_number: customer.exterior_number,
            neighborhood: customer.neighborhood,
            city: customer.city,
            postal_code: customer.postal_code,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub cart: Vec<CartItemRequest>,
    #[serde(default)]
    pub cliente: CustomerRequest,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    /// Processor-assigned order id; also the primary key of the stored order.
    pub id: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Validates the cart against the catalog, registers the order with the
/// payment processor, and persists order + details + customer in one
/// transaction. Responds with the processor's order id for the client to
/// approve.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = CreateOrderResponse),
        (status = 400, description = "Empty cart, missing customer data, or an invalid product"),
        (status = 500, description = "Processor or database failure"),
    ),
    tag = "checkout"
)]
pub async fn create_order(
    service: web::Data<CheckoutService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let cart: Vec<CartItem> = body.cart.into_iter().map(CartItem::from).collect();

    let id = service
        .create_order(cart, body.cliente.into())
        .await
        .map_err(AppError::creating_order)?;

    Ok(HttpResponse::Ok().json(CreateOrderResponse { id }))
}

/// POST /api/orders/{order_id}/capture
///
/// Captures the payment and marks the stored order COMPLETED, which also
/// enqueues the confirmation email. Answers with the processor's own capture
/// payload; if the order was already captured, with its current state.
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/capture",
    params(("order_id" = String, Path, description = "Processor order id")),
    responses(
        (status = 200, description = "Processor capture payload"),
        (status = 500, description = "Processor or database failure"),
    ),
    tag = "checkout"
)]
pub async fn capture_order(
    service: web::Data<CheckoutService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let outcome = service
        .capture_order(&order_id)
        .await
        .map_err(AppError::capturing_order)?;

    Ok(HttpResponse::Ok().json(outcome.into_payload()))
}
