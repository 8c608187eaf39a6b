use std::fmt;

use bigdecimal::BigDecimal;

/// One line of the submitted cart, exactly as the client sent it. The price
/// is untrusted until validated against the catalog.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: i32,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

/// Customer data as submitted, before validation. Every field may be absent;
/// `validate` turns a complete payload into a `CustomerContact`.
#[derive(Debug, Clone, Default)]
pub struct CustomerPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub exterior_number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl CustomerPayload {
    /// True when name, email and all address components are present and
    /// non-blank. The phone is optional.
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.street,
            &self.exterior_number,
            &self.neighborhood,
            &self.city,
            &self.postal_code,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Validated contact data, with the address joined into the single
    /// delimited string persisted on both the order and the customer row.
    pub fn validate(&self) -> Option<CustomerContact> {
        if !self.is_complete() {
            return None;
        }
        let address = format!(
            "{} {}, {}, {}, {}",
            self.street.as_deref().unwrap_or_default(),
            self.exterior_number.as_deref().unwrap_or_default(),
            self.neighborhood.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default(),
            self.postal_code.as_deref().unwrap_or_default(),
        );
        Some(CustomerContact {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone(),
            address,
        })
    }
}

/// Contact data after validation: what gets denormalized onto the order row
/// and written to the customers table.
#[derive(Debug, Clone)]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
}

/// A cart line after catalog validation: the name the client displayed, the
/// catalog unit price, and the requested quantity.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

/// Result of validating and pricing a cart against the catalog.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub total: BigDecimal,
    pub lines: Vec<PricedLine>,
}

/// Order data persisted when the payment processor accepts the order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: String,
    pub total: BigDecimal,
    pub customer: CustomerContact,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Created,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted order line as read back for the confirmation email. Quantity
/// and price are optional: legacy rows may miss either, and the email total
/// skips such lines rather than failing.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub product_name: String,
    pub quantity: Option<i32>,
    pub price: Option<BigDecimal>,
}

/// The customer row for an order, as read back for the confirmation email.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
}
