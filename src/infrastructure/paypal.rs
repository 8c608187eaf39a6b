use async_trait::async_trait;
use bigdecimal::BigDecimal;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::catalog::to_money;
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    CaptureResult, CreatedPaymentOrder, PaymentOrder, PaymentOrderSnapshot, PaymentProcessor,
};

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Payment(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// PayPal v2 checkout client. Every call fetches a fresh OAuth token; the
/// handful of checkout requests per order does not justify caching one.
pub struct PayPalClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    currency: String,
}

impl PayPalClient {
    pub fn new(base_url: &str, client_id: &str, client_secret: &str, currency: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            currency: currency.to_string(),
        }
    }

    async fn access_token(&self) -> Result<String, DomainError> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = expect_success(response, "token request").await?.parse()?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl PaymentProcessor for PayPalClient {
    async fn create_order(&self, order: &PaymentOrder) -> Result<CreatedPaymentOrder, DomainError> {
        let token = self.access_token().await?;
        let body = order_request_body(order, &self.currency);
        debug!("creating processor order for total {}", order.total);

        let response = self
            .http
            .post(format!("{}/v2/checkout/orders", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let payload = expect_success(response, "order creation").await?.payload;
        Ok(CreatedPaymentOrder {
            id: require_str(&payload, "id")?,
            status: require_str(&payload, "status")?,
        })
    }

    async fn fetch_order(&self, order_id: &str) -> Result<PaymentOrderSnapshot, DomainError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{}/v2/checkout/orders/{}", self.base_url, order_id))
            .bearer_auth(token)
            .send()
            .await?;

        let payload = expect_success(response, "order lookup").await?.payload;
        Ok(PaymentOrderSnapshot {
            id: require_str(&payload, "id")?,
            status: require_str(&payload, "status")?,
            payload,
        })
    }

    async fn capture_order(&self, order_id: &str) -> Result<CaptureResult, DomainError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{}/capture",
                self.base_url, order_id
            ))
            .bearer_auth(token)
            // The capture endpoint rejects requests without a JSON body.
            .json(&json!({}))
            .send()
            .await?;

        let payload = expect_success(response, "order capture").await?.payload;
        Ok(CaptureResult {
            status: require_str(&payload, "status")?,
            payload,
        })
    }
}

struct ApiPayload {
    payload: Value,
}

impl ApiPayload {
    fn parse<T: serde::de::DeserializeOwned>(self) -> Result<T, DomainError> {
        serde_json::from_value(self.payload)
            .map_err(|e| DomainError::Payment(format!("malformed processor response: {e}")))
    }
}

async fn expect_success(response: reqwest::Response, context: &str) -> Result<ApiPayload, DomainError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DomainError::Payment(format!(
            "{context} failed with HTTP {status}: {body}"
        )));
    }
    let payload: Value = response.json().await?;
    Ok(ApiPayload { payload })
}

fn require_str(payload: &Value, field: &str) -> Result<String, DomainError> {
    payload[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DomainError::Payment(format!("processor response missing `{field}`")))
}

/// The PayPal v2 order-creation body. Amounts travel as strings with two
/// decimals, quantities as strings, and the breakdown's item_total must equal
/// the amount value or PayPal rejects the order.
fn order_request_body(order: &PaymentOrder, currency: &str) -> Value {
    let total = money_string(&order.total);
    let items: Vec<Value> = order
        .lines
        .iter()
        .map(|line| {
            json!({
                "name": line.name,
                "unit_amount": {
                    "currency_code": currency,
                    "value": money_string(&line.unit_price),
                },
                "quantity": line.quantity.to_string(),
            })
        })
        .collect();

    json!({
        "intent": "CAPTURE",
        "purchase_units": [{
            "amount": {
                "currency_code": currency,
                "value": total,
                "breakdown": {
                    "item_total": {
                        "currency_code": currency,
                        "value": total,
                    },
                },
            },
            "items": items,
        }],
    })
}

fn money_string(value: &BigDecimal) -> String {
    to_money(value).to_string()
}
