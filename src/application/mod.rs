pub mod checkout;
pub mod clinical;
pub mod notifications;
