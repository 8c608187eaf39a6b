pub mod clinical_store;
pub mod mailer;
pub mod models;
pub mod order_store;
pub mod paypal;
