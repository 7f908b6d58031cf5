use super::{PendingWill, WillScheduler};
use crate::mqtt::ClientSession;
use crate::time::Clock;

impl<C: Clock> WillScheduler<C> {
    /// Register the will of a client that just disconnected.
    ///
    /// The effective delay is `min(will delay, session expiry)`. A zero delay
    /// publishes right away and never touches the table; otherwise the will is
    /// scheduled, replacing any earlier entry for the same client.
    pub fn add_will(&self, client_id: &str, session: &ClientSession) {
        let (will, delay) = match (session.will.as_ref(), session.effective_will_delay()) {
            (Some(will), Some(delay)) => (will, delay),
            _ => {
                tracing::debug!(client_id, "add_will called for session without will");
                return;
            }
        };
        if delay == 0 {
            tracing::debug!(client_id, topic = %will.topic, "publishing will without delay");
            self.send_will(client_id, will);
            return;
        }

        let pending = PendingWill::new(delay, self.clock.epoch_millis());
        if let Some(previous) = self.table.insert(client_id.to_string(), pending) {
            tracing::debug!(
                client_id,
                previous_delay = previous.delay_interval,
                "pending will superseded"
            );
        }
        tracing::debug!(client_id, delay_secs = delay, "will scheduled");
    }

    /// Forget a pending will, typically because the client reconnected.
    ///
    /// Nothing is published and the durable will record is left alone.
    pub fn cancel_will(&self, client_id: &str) -> Option<PendingWill> {
        let removed = self.table.remove(client_id);
        if removed.is_some() {
            tracing::debug!(client_id, "pending will cancelled");
        }
        removed
    }
}
