use std::sync::Arc;

use bigdecimal::BigDecimal;
use log::info;

use crate::domain::catalog::{to_money, Catalog};
use crate::domain::checkout::{
    CartItem, CustomerContact, CustomerPayload, NewOrder, OrderStatus, PricedCart, PricedLine,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CaptureOutcome, OrderStore, PaymentOrder, PaymentProcessor};

/// Drives the two checkout operations: order creation (validate, price,
/// register with the processor, persist) and capture (processor capture plus
/// the status transition that enqueues the confirmation email).
pub struct CheckoutService {
    catalog: Catalog,
    store: Arc<dyn OrderStore>,
    processor: Arc<dyn PaymentProcessor>,
}

impl CheckoutService {
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn OrderStore>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            catalog,
            store,
            processor,
        }
    }

    /// Validates and prices the cart, registers the order with the payment
    /// processor, then persists order + details + customer in one
    /// transaction. Returns the processor-assigned order id.
    ///
    /// A processor order that was created before a failed persist is left
    /// as-is; it is never captured, so no money moves.
    pub async fn create_order(
        &self,
        cart: Vec<CartItem>,
        customer: CustomerPayload,
    ) -> Result<String, DomainError> {
        let (priced, contact) = validate_and_price(&self.catalog, &cart, &customer)?;

        let created = self
            .processor
            .create_order(&PaymentOrder {
                total: priced.total.clone(),
                lines: priced.lines.clone(),
            })
            .await?;
        info!(
            "processor order {} created with status {}",
            created.id, created.status
        );

        let store = Arc::clone(&self.store);
        let order = NewOrder {
            id: created.id.clone(),
            total: priced.total,
            customer: contact,
            status: OrderStatus::Created,
        };
        let lines = priced.lines;
        tokio::task::spawn_blocking(move || store.create_order(order, lines))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))??;

        Ok(created.id)
    }

    /// Captures a previously created order. If the processor already shows it
    /// COMPLETED the stored state is left untouched and the processor's
    /// current payload is returned, so repeating the call cannot double-charge
    /// or re-enqueue the confirmation email.
    pub async fn capture_order(&self, order_id: &str) -> Result<CaptureOutcome, DomainError> {
        let snapshot = self.processor.fetch_order(order_id).await?;
        if snapshot.is_completed() {
            info!("order {order_id} is already captured, returning current state");
            return Ok(CaptureOutcome::AlreadyCompleted(snapshot.payload));
        }

        let capture = self.processor.capture_order(order_id).await?;
        info!(
            "captured processor order {order_id} with status {}",
            capture.status
        );

        let store = Arc::clone(&self.store);
        let id = order_id.to_string();
        tokio::task::spawn_blocking(move || store.update_status(&id, OrderStatus::Completed))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))??;

        Ok(CaptureOutcome::Captured(capture.payload))
    }
}

fn incomplete() -> DomainError {
    DomainError::InvalidInput("Datos incompletos".to_string())
}

fn invalid_product(name: &str) -> DomainError {
    DomainError::InvalidInput(format!("Producto inválido: {name}"))
}

/// Pure validation + pricing. The catalog is the price authority: a line is
/// accepted only when its id exists, its submitted price equals the catalog
/// price after two-decimal normalization, and its quantity is positive. The
/// total is computed from catalog prices, never from client input.
fn validate_and_price(
    catalog: &Catalog,
    cart: &[CartItem],
    customer: &CustomerPayload,
) -> Result<(PricedCart, CustomerContact), DomainError> {
    let contact = customer.validate().ok_or_else(incomplete)?;
    if cart.is_empty() {
        return Err(incomplete());
    }

    let mut total = BigDecimal::from(0);
    let mut lines = Vec::with_capacity(cart.len());
    for item in cart {
        let product = catalog
            .get(item.product_id)
            .ok_or_else(|| invalid_product(&item.name))?;
        if item.quantity <= 0 || to_money(&item.unit_price) != product.price {
            return Err(invalid_product(&item.name));
        }
        total += &product.price * BigDecimal::from(item.quantity);
        lines.push(PricedLine {
            name: item.name.clone(),
            unit_price: product.price.clone(),
            quantity: item.quantity,
        });
    }

    Ok((
        PricedCart {
            total: to_money(&total),
            lines,
        },
        contact,
    ))
}
