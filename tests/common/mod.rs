//! Shared fixtures: in-memory port implementations for API tests and the
//! fake payment-processor server used by the e2e test.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use uuid::Uuid;

use async_trait::async_trait;
use nutricion_service::domain::checkout::{
    CustomerView, NewOrder, OrderDetailView, OrderStatus, PricedLine,
};
use nutricion_service::domain::clinical::{
    BiochemicalRecord, MeasurementRecord, NutritionPlanRecord, UserAccount, VitalSignsRecord,
};
use nutricion_service::domain::errors::{DomainError, NotificationError};
use nutricion_service::domain::ports::{
    CaptureResult, ClinicalStore, ConfirmationMailer, CreatedPaymentOrder, OrderStore,
    PaymentOrder, PaymentOrderSnapshot, PaymentProcessor, PendingNotification,
    MAX_DELIVERY_ATTEMPTS,
};

pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind failed")
        .local_addr()
        .expect("addr failed")
        .port()
}

// ── In-memory order store ────────────────────────────────────────────────────

pub struct OutboxEntry {
    pub id: Uuid,
    pub order_id: String,
    pub attempts: i32,
    pub processed: bool,
}

#[derive(Default)]
struct OrderState {
    orders: HashMap<String, (NewOrder, Vec<PricedLine>)>,
    outbox: Vec<OutboxEntry>,
}

#[derive(Default)]
pub struct InMemoryOrderStore {
    pub fail_create: AtomicBool,
    inner: Mutex<OrderState>,
}

impl InMemoryOrderStore {
    pub fn order_status(&self, order_id: &str) -> Option<OrderStatus> {
        self.inner
            .lock()
            .unwrap()
            .orders
            .get(order_id)
            .map(|(order, _)| order.status)
    }

    pub fn outbox_len(&self) -> usize {
        self.inner.lock().unwrap().outbox.len()
    }

    pub fn outbox_attempts(&self, order_id: &str) -> Option<i32> {
        self.inner
            .lock()
            .unwrap()
            .outbox
            .iter()
            .find(|e| e.order_id == order_id)
            .map(|e| e.attempts)
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create_order(&self, order: NewOrder, lines: Vec<PricedLine>) -> Result<(), DomainError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("connection lost".into()));
        }
        self.inner
            .lock()
            .unwrap()
            .orders
            .insert(order.id.clone(), (order, lines));
        Ok(())
    }

    fn update_status(&self, order_id: &str, status: OrderStatus) -> Result<(), DomainError> {
        let mut state = self.inner.lock().unwrap();
        let Some((order, _)) = state.orders.get_mut(order_id) else {
            return Err(DomainError::OrderNotFound(order_id.to_string()));
        };
        order.status = status;
        if status == OrderStatus::Completed {
            state.outbox.push(OutboxEntry {
                id: Uuid::new_v4(),
                order_id: order_id.to_string(),
                attempts: 0,
                processed: false,
            });
        }
        Ok(())
    }

    fn order_details(&self, order_id: &str) -> Result<Vec<OrderDetailView>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .orders
            .get(order_id)
            .map(|(_, lines)| {
                lines
                    .iter()
                    .map(|line| OrderDetailView {
                        product_name: line.name.clone(),
                        quantity: Some(line.quantity),
                        price: Some(line.unit_price.clone()),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn customer_by_order(&self, order_id: &str) -> Result<Option<CustomerView>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .orders
            .get(order_id)
            .map(|(order, _)| CustomerView {
                name: order.customer.name.clone(),
                email: order.customer.email.clone(),
                phone: order.customer.phone.clone(),
                address: order.customer.address.clone(),
            }))
    }

    fn pending_notifications(&self, limit: i64) -> Result<Vec<PendingNotification>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .outbox
            .iter()
            .filter(|e| !e.processed && e.attempts < MAX_DELIVERY_ATTEMPTS)
            .take(limit as usize)
            .map(|e| PendingNotification {
                id: e.id,
                order_id: e.order_id.clone(),
                attempts: e.attempts,
            })
            .collect())
    }

    fn mark_notification_sent(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(entry) = state.outbox.iter_mut().find(|e| e.id == id) {
            entry.processed = true;
        }
        Ok(())
    }

    fn mark_notification_failed(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(entry) = state.outbox.iter_mut().find(|e| e.id == id) {
            entry.attempts += 1;
        }
        Ok(())
    }
}

// ── In-memory clinical store ─────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryClinicalStore {
    pub users: Vec<UserAccount>,
    pub measurements: Vec<MeasurementRecord>,
    pub vital_signs: Vec<VitalSignsRecord>,
    pub biochemical: Vec<BiochemicalRecord>,
    pub plans: Vec<NutritionPlanRecord>,
}

impl ClinicalStore for InMemoryClinicalStore {
    fn find_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    fn measurements(&self, folio: i32) -> Result<Vec<MeasurementRecord>, DomainError> {
        Ok(self
            .measurements
            .iter()
            .filter(|m| m.folio == folio)
            .cloned()
            .collect())
    }

    fn vital_signs(&self, folio: i32) -> Result<Vec<VitalSignsRecord>, DomainError> {
        Ok(self
            .vital_signs
            .iter()
            .filter(|v| v.folio == folio)
            .cloned()
            .collect())
    }

    fn biochemical_results(&self, folio: i32) -> Result<Vec<BiochemicalRecord>, DomainError> {
        Ok(self
            .biochemical
            .iter()
            .filter(|b| b.folio == folio)
            .cloned()
            .collect())
    }

    fn nutrition_plans(&self, folio: i32) -> Result<Vec<NutritionPlanRecord>, DomainError> {
        Ok(self
            .plans
            .iter()
            .filter(|p| p.folio == folio)
            .cloned()
            .collect())
    }
}

// ── Mock payment processor ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockProcessor {
    pub fail_create: AtomicBool,
    pub fail_capture: AtomicBool,
    pub capture_calls: AtomicUsize,
    counter: AtomicUsize,
    statuses: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PaymentProcessor for MockProcessor {
    async fn create_order(&self, _order: &PaymentOrder) -> Result<CreatedPaymentOrder, DomainError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Payment("processor unavailable".into()));
        }
        let id = format!("PAY-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1);
        self.statuses
            .lock()
            .unwrap()
            .insert(id.clone(), "CREATED".into());
        Ok(CreatedPaymentOrder {
            id,
            status: "CREATED".into(),
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<PaymentOrderSnapshot, DomainError> {
        let statuses = self.statuses.lock().unwrap();
        let status = statuses
            .get(order_id)
            .cloned()
            .ok_or_else(|| DomainError::Payment(format!("no such order {order_id}")))?;
        Ok(PaymentOrderSnapshot {
            id: order_id.to_string(),
            status: status.clone(),
            payload: json!({ "id": order_id, "status": status }),
        })
    }

    async fn capture_order(&self, order_id: &str) -> Result<CaptureResult, DomainError> {
        if self.fail_capture.load(Ordering::SeqCst) {
            return Err(DomainError::Payment("capture declined".into()));
        }
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .insert(order_id.to_string(), "COMPLETED".into());
        Ok(CaptureResult {
            status: "COMPLETED".into(),
            payload: json!({ "id": order_id, "status": "COMPLETED" }),
        })
    }
}

// ── Recording mailer ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingMailer {
    pub fail: AtomicBool,
    pub sent: Mutex<Vec<(String, String, usize)>>,
}

impl ConfirmationMailer for RecordingMailer {
    fn send_confirmation(
        &self,
        customer: &CustomerView,
        order_id: &str,
        items: &[OrderDetailView],
    ) -> Result<(), NotificationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Transport("relay refused".into()));
        }
        self.sent.lock().unwrap().push((
            customer.email.clone(),
            order_id.to_string(),
            items.len(),
        ));
        Ok(())
    }
}

// ── Fake PayPal server (for the e2e test) ────────────────────────────────────

type PaypalState = web::Data<Mutex<HashMap<String, String>>>;

fn authorized(req: &HttpRequest) -> bool {
    req.headers().contains_key(header::AUTHORIZATION)
}

async fn token(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({ "error": "invalid_client" }));
    }
    HttpResponse::Ok().json(json!({
        "access_token": "test-token",
        "token_type": "Bearer",
        "expires_in": 32400
    }))
}

async fn create_order(
    req: HttpRequest,
    state: PaypalState,
    body: web::Json<Value>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    if body["intent"] != "CAPTURE" {
        return HttpResponse::UnprocessableEntity().json(json!({ "name": "INVALID_REQUEST" }));
    }
    let id = format!("E2E-{}", Uuid::new_v4().simple());
    state.lock().unwrap().insert(id.clone(), "CREATED".into());
    HttpResponse::Created().json(json!({ "id": id, "status": "CREATED" }))
}

async fn get_order(req: HttpRequest, state: PaypalState, path: web::Path<String>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let id = path.into_inner();
    match state.lock().unwrap().get(&id) {
        Some(status) => HttpResponse::Ok().json(json!({ "id": id, "status": status })),
        None => HttpResponse::NotFound().json(json!({ "name": "RESOURCE_NOT_FOUND" })),
    }
}

async fn capture_order(
    req: HttpRequest,
    state: PaypalState,
    path: web::Path<String>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let id = path.into_inner();
    let mut statuses = state.lock().unwrap();
    match statuses.get_mut(&id) {
        Some(status) => {
            *status = "COMPLETED".into();
            HttpResponse::Created().json(json!({
                "id": id,
                "status": "COMPLETED",
                "purchase_units": []
            }))
        }
        None => HttpResponse::NotFound().json(json!({ "name": "RESOURCE_NOT_FOUND" })),
    }
}

/// Spawn a minimal PayPal v2 stand-in on a free port. Returns the port and
/// the shared order-status map for assertions.
pub fn spawn_fake_paypal() -> std::io::Result<(u16, PaypalState)> {
    let port = free_port();
    let state: PaypalState = web::Data::new(Mutex::new(HashMap::new()));
    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/v1/oauth2/token", web::post().to(token))
            .route("/v2/checkout/orders", web::post().to(create_order))
            .route("/v2/checkout/orders/{id}", web::get().to(get_order))
            .route(
                "/v2/checkout/orders/{id}/capture",
                web::post().to(capture_order),
            )
    })
    .bind(("127.0.0.1", port))?
    .run();
    tokio::spawn(server);
    Ok((port, state))
}
