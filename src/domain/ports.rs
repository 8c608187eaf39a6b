use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::Value;
use uuid::Uuid;

use super::checkout::{CustomerView, NewOrder, OrderDetailView, OrderStatus, PricedLine};
use super::clinical::{
    BiochemicalRecord, MeasurementRecord, NutritionPlanRecord, UserAccount, VitalSignsRecord,
};
use super::errors::{DomainError, NotificationError};

/// Outbox rows are retried until delivered or until this many attempts have
/// failed; after that they stay in the table for manual inspection.
pub const MAX_DELIVERY_ATTEMPTS: i32 = 5;

/// Persistence gateway for the checkout database. Implementations acquire a
/// pooled connection per call and release it on every exit path.
pub trait OrderStore: Send + Sync + 'static {
    /// Write the order row, its detail rows, and the customer row in a single
    /// transaction. A failure anywhere rolls back the whole set.
    fn create_order(&self, order: NewOrder, lines: Vec<PricedLine>) -> Result<(), DomainError>;

    /// Set the order status. Zero affected rows surfaces as
    /// [`DomainError::OrderNotFound`]. Transitioning to
    /// [`OrderStatus::Completed`] also enqueues the `OrderCaptured`
    /// notification event in the same transaction.
    fn update_status(&self, order_id: &str, status: OrderStatus) -> Result<(), DomainError>;

    /// Detail rows for an order; empty when the order is unknown.
    fn order_details(&self, order_id: &str) -> Result<Vec<OrderDetailView>, DomainError>;

    /// The customer recorded for an order. `None` is a recoverable-null, not
    /// an error: callers decide how to degrade.
    fn customer_by_order(&self, order_id: &str) -> Result<Option<CustomerView>, DomainError>;

    /// Undelivered outbox events below the attempt cap, oldest first.
    fn pending_notifications(&self, limit: i64) -> Result<Vec<PendingNotification>, DomainError>;

    fn mark_notification_sent(&self, id: Uuid) -> Result<(), DomainError>;

    fn mark_notification_failed(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Persistence gateway for the clinical/login database.
pub trait ClinicalStore: Send + Sync + 'static {
    fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;
    fn measurements(&self, folio: i32) -> Result<Vec<MeasurementRecord>, DomainError>;
    fn vital_signs(&self, folio: i32) -> Result<Vec<VitalSignsRecord>, DomainError>;
    fn biochemical_results(&self, folio: i32) -> Result<Vec<BiochemicalRecord>, DomainError>;
    fn nutrition_plans(&self, folio: i32) -> Result<Vec<NutritionPlanRecord>, DomainError>;
}

/// An order as submitted to the payment processor: the validated total plus
/// the itemized breakdown it must add up to.
#[derive(Debug, Clone)]
pub struct PaymentOrder {
    pub total: BigDecimal,
    pub lines: Vec<PricedLine>,
}

/// The processor's answer to order creation.
#[derive(Debug, Clone)]
pub struct CreatedPaymentOrder {
    pub id: String,
    pub status: String,
}

/// Current processor-side state of an order, with the raw payload so the
/// capture endpoint can return it verbatim on the already-captured path.
#[derive(Debug, Clone)]
pub struct PaymentOrderSnapshot {
    pub id: String,
    pub status: String,
    pub payload: Value,
}

impl PaymentOrderSnapshot {
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }
}

/// The processor's capture response.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    pub status: String,
    pub payload: Value,
}

/// What the capture operation hands back to the HTTP layer: either the
/// snapshot of an order that was already captured, or the fresh capture
/// payload. Both serialize to the processor's own JSON.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    AlreadyCompleted(Value),
    Captured(Value),
}

impl CaptureOutcome {
    pub fn into_payload(self) -> Value {
        match self {
            CaptureOutcome::AlreadyCompleted(payload) | CaptureOutcome::Captured(payload) => {
                payload
            }
        }
    }
}

/// External payment processor: order create / get / capture, as exposed by
/// the PayPal v2 checkout API.
#[async_trait]
pub trait PaymentProcessor: Send + Sync + 'static {
    async fn create_order(&self, order: &PaymentOrder) -> Result<CreatedPaymentOrder, DomainError>;
    async fn fetch_order(&self, order_id: &str) -> Result<PaymentOrderSnapshot, DomainError>;
    async fn capture_order(&self, order_id: &str) -> Result<CaptureResult, DomainError>;
}

/// One undelivered confirmation-email event.
#[derive(Debug, Clone)]
pub struct PendingNotification {
    pub id: Uuid,
    pub order_id: String,
    pub attempts: i32,
}

/// Mail transport for the confirmation email. Send failures are the worker's
/// problem; they never propagate to a request.
pub trait ConfirmationMailer: Send + Sync + 'static {
    fn send_confirmation(
        &self,
        customer: &CustomerView,
        order_id: &str,
        items: &[OrderDetailView],
    ) -> Result<(), NotificationError>;
}
