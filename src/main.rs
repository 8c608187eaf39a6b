use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use dotenvy::dotenv;

use nutricion_service::application::checkout::CheckoutService;
use nutricion_service::application::clinical::ClinicalService;
use nutricion_service::application::notifications::spawn_notification_worker;
use nutricion_service::config::Config;
use nutricion_service::domain::catalog::Catalog;
use nutricion_service::domain::ports::{ConfirmationMailer, OrderStore, PaymentProcessor};
use nutricion_service::infrastructure::clinical_store::DieselClinicalStore;
use nutricion_service::infrastructure::mailer::SmtpMailer;
use nutricion_service::infrastructure::order_store::DieselOrderStore;
use nutricion_service::infrastructure::paypal::PayPalClient;
use nutricion_service::{
    build_server, create_pool, run_checkout_migrations, run_clinical_migrations,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let catalog = Catalog::standard().expect("Product catalog must be valid");

    let checkout_pool = create_pool(&config.checkout_database_url);
    run_checkout_migrations(&checkout_pool);
    let clinical_pool = create_pool(&config.clinical_database_url);
    run_clinical_migrations(&clinical_pool);

    let order_store: Arc<dyn OrderStore> = Arc::new(DieselOrderStore::new(checkout_pool));
    let clinical_store = Arc::new(DieselClinicalStore::new(clinical_pool));

    let processor: Arc<dyn PaymentProcessor> = Arc::new(PayPalClient::new(
        &config.paypal_base_url,
        &config.paypal_client_id,
        &config.paypal_client_secret,
        &config.paypal_currency,
    ));
    let mailer: Arc<dyn ConfirmationMailer> = Arc::new(
        SmtpMailer::new(
            &config.smtp_host,
            &config.smtp_username,
            &config.smtp_password,
            &config.smtp_from,
        )
        .expect("SMTP configuration must be valid"),
    );

    spawn_notification_worker(
        Arc::clone(&order_store),
        mailer,
        Duration::from_secs(config.outbox_poll_secs),
    );

    let checkout = web::Data::new(CheckoutService::new(
        catalog,
        Arc::clone(&order_store),
        processor,
    ));
    let clinical = web::Data::new(ClinicalService::new(clinical_store));

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(
        checkout,
        clinical,
        config.allowed_origins.clone(),
        &config.host,
        config.port,
    )?
    .await
}
