use bigdecimal::BigDecimal;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::domain::catalog::to_money;
use crate::domain::checkout::{CustomerView, OrderDetailView};
use crate::domain::errors::NotificationError;
use crate::domain::ports::ConfirmationMailer;

impl From<lettre::address::AddressError> for NotificationError {
    fn from(e: lettre::address::AddressError) -> Self {
        NotificationError::Recipient(e.to_string())
    }
}

impl From<lettre::error::Error> for NotificationError {
    fn from(e: lettre::error::Error) -> Self {
        NotificationError::Message(e.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for NotificationError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        NotificationError::Transport(e.to_string())
    }
}

/// Confirmation email sender over an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        username: &str,
        password: &str,
        from: &str,
    ) -> Result<Self, NotificationError> {
        let transport = SmtpTransport::relay(host)?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();
        let from = from.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }
}

impl ConfirmationMailer for SmtpMailer {
    fn send_confirmation(
        &self,
        customer: &CustomerView,
        order_id: &str,
        items: &[OrderDetailView],
    ) -> Result<(), NotificationError> {
        let to = customer.email.parse::<Mailbox>()?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(confirmation_subject(order_id))
            .header(ContentType::TEXT_HTML)
            .body(render_confirmation(customer, items))?;
        self.transport.send(&message)?;
        Ok(())
    }
}

pub fn confirmation_subject(order_id: &str) -> String {
    format!("Confirmación de Compra - Pedido #{order_id}")
}

/// The customer-facing purchase summary. Copy is Spanish, matching the rest
/// of the storefront.
pub fn render_confirmation(customer: &CustomerView, items: &[OrderDetailView]) -> String {
    let address = AddressParts::split(&customer.address);
    let lines: String = items.iter().map(item_html).collect();
    let total = format_amount(&confirmation_total(items));

    format!(
        "<h1>Gracias por tu compra, {}!</h1>\
         <p>Tu pedido ha sido recibido con éxito. Aquí están los detalles:</p>\
         <ul>{}</ul>\
         <p><strong>Total: ${}</strong></p>\
         <p>Dirección de envío: {} {}, {}</p>\
         <p>¡Esperamos verte de nuevo pronto!</p>",
        customer.name, lines, total, address.street_line, address.neighborhood, address.city
    )
}

fn item_html(item: &OrderDetailView) -> String {
    let quantity = item
        .quantity
        .map(|q| q.to_string())
        .unwrap_or_default();
    let price = item
        .price
        .as_ref()
        .map(format_amount)
        .unwrap_or_default();
    format!(
        "<li>{} - {} x ${}</li>",
        item.product_name, quantity, price
    )
}

/// Sum of `price × quantity` over the items that carry both. Detail rows
/// with a missing price or quantity are left out of the total rather than
/// failing the whole email.
pub fn confirmation_total(items: &[OrderDetailView]) -> BigDecimal {
    let sum = items
        .iter()
        .filter_map(|item| {
            let price = item.price.as_ref()?;
            let quantity = item.quantity?;
            Some(price * BigDecimal::from(quantity))
        })
        .sum::<BigDecimal>();
    to_money(&sum)
}

/// Two decimals, thousands separated: `1234567.8` → `1,234,567.80`.
pub fn format_amount(value: &BigDecimal) -> String {
    let normalized = to_money(value).to_string();
    let (raw_int, frac) = normalized
        .split_once('.')
        .unwrap_or((normalized.as_str(), "00"));
    let (sign, digits) = match raw_int.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw_int),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac}")
}

/// The stored shipping address is one comma-delimited string
/// (`"street number, neighborhood, city, postal code"`). Splitting tolerates
/// short input: absent parts come back empty.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub street_line: String,
    pub neighborhood: String,
    pub city: String,
    pub postal_code: String,
}

impl AddressParts {
    pub fn split(address: &str) -> Self {
        let mut parts = address.split(',').map(str::trim);
        Self {
            street_line: parts.next().unwrap_or_default().to_string(),
            neighborhood: parts.next().unwrap_or_default().to_string(),
            city: parts.next().unwrap_or_default().to_string(),
            postal_code: parts.next().unwrap_or_default().to_string(),
        }
    }
}
