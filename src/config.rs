use std::env;

/// Runtime configuration, read once at startup. Required variables abort the
/// process with a message naming the variable; optional ones carry defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub checkout_database_url: String,
    pub clinical_database_url: String,
    pub allowed_origins: Vec<String>,
    pub paypal_base_url: String,
    pub paypal_client_id: String,
    pub paypal_client_secret: String,
    pub paypal_currency: String,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,
    pub outbox_poll_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            checkout_database_url: require("CHECKOUT_DATABASE_URL"),
            clinical_database_url: require("CLINICAL_DATABASE_URL"),
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_default(),
            ),
            paypal_base_url: env::var("PAYPAL_BASE_URL")
                .unwrap_or_else(|_| "https://api-m.paypal.com".to_string()),
            paypal_client_id: require("PAYPAL_CLIENT_ID"),
            paypal_client_secret: require("PAYPAL_CLIENT_SECRET"),
            paypal_currency: env::var("PAYPAL_CURRENCY").unwrap_or_else(|_| "MXN".to_string()),
            smtp_host: require("SMTP_HOST"),
            smtp_username: require("SMTP_USERNAME"),
            smtp_password: require("SMTP_PASSWORD"),
            smtp_from: require("SMTP_FROM"),
            outbox_poll_secs: env::var("OUTBOX_POLL_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("OUTBOX_POLL_SECS must be a valid number"),
        }
    }
}

fn require(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

/// Comma-separated origin list; blank entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
