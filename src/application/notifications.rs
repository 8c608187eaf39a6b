use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::task::JoinHandle;

use crate::domain::errors::DomainError;
use crate::domain::ports::{ConfirmationMailer, OrderStore, PendingNotification};

const BATCH_SIZE: i64 = 20;

/// Background delivery of confirmation emails. Polls the outbox on a fixed
/// interval and drains it on the blocking pool. Runs until the process exits.
pub fn spawn_notification_worker(
    store: Arc<dyn OrderStore>,
    mailer: Arc<dyn ConfirmationMailer>,
    poll_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "notification worker polling every {}s",
            poll_interval.as_secs()
        );
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let store = Arc::clone(&store);
            let mailer = Arc::clone(&mailer);
            let drained =
                tokio::task::spawn_blocking(move || drain_pending(store.as_ref(), mailer.as_ref()))
                    .await;
            match drained {
                Ok(Ok(0)) => {}
                Ok(Ok(sent)) => info!("delivered {sent} confirmation emails"),
                Ok(Err(e)) => error!("outbox poll failed: {e}"),
                Err(e) => error!("outbox drain task panicked: {e}"),
            }
        }
    })
}

/// One poll: send every due event, record each outcome. A failed send only
/// increments that event's attempt count; delivery is retried on later polls
/// and is therefore at-least-once. Returns how many emails went out.
pub fn drain_pending(
    store: &dyn OrderStore,
    mailer: &dyn ConfirmationMailer,
) -> Result<usize, DomainError> {
    let pending = store.pending_notifications(BATCH_SIZE)?;
    let mut delivered = 0;
    for event in pending {
        match send_one(store, mailer, &event) {
            Ok(()) => {
                store.mark_notification_sent(event.id)?;
                delivered += 1;
            }
            Err(reason) => {
                warn!(
                    "confirmation email for order {} failed on attempt {}: {reason}",
                    event.order_id,
                    event.attempts + 1
                );
                store.mark_notification_failed(event.id)?;
            }
        }
    }
    Ok(delivered)
}

fn send_one(
    store: &dyn OrderStore,
    mailer: &dyn ConfirmationMailer,
    event: &PendingNotification,
) -> Result<(), String> {
    let customer = store
        .customer_by_order(&event.order_id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("no customer recorded for order {}", event.order_id))?;
    let items = store
        .order_details(&event.order_id)
        .map_err(|e| e.to_string())?;
    mailer
        .send_confirmation(&customer, &event.order_id, &items)
        .map_err(|e| e.to_string())
}
