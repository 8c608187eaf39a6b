pub mod catalog;
pub mod checkout;
pub mod clinical;
pub mod errors;
pub mod ports;
