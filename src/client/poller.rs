//! Fetch, validate, interpret, notify, sleep. Forever.

use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

use super::{api::ReviewSource, config::PollingConfig, notifier::Notifier, telegram::ChatSender};
use crate::{interpreter::interpret, result::BotError, state::PollState, validator::validate};

/// Single-task poller for one tracked submission
///
/// Every failure inside a cycle is caught here; the operator is alerted once
/// per distinct diagnostic, except when the chat itself is what failed.
#[derive(Debug)]
pub struct ReviewPoller<R, S> {
    source: R,
    notifier: Notifier<S>,
    config: PollingConfig,
    state: PollState,
}

impl<R: ReviewSource, S: ChatSender> ReviewPoller<R, S> {
    pub fn new(source: R, notifier: Notifier<S>, config: PollingConfig) -> Self {
        let state = PollState::starting_now(config.lookback.as_secs());
        Self::with_state(source, notifier, config, state)
    }

    pub fn with_state(
        source: R,
        notifier: Notifier<S>,
        config: PollingConfig,
        state: PollState,
    ) -> Self {
        Self { source, notifier, config, state }
    }

    /// Poll until the process is killed
    pub async fn run(mut self) {
        info!(
            retry_period = ?self.config.retry_period,
            cursor = self.state.cursor_timestamp,
            "Starting homework poller"
        );

        loop {
            self.tick().await;
            sleep(self.config.retry_period).await;
        }
    }

    /// One cycle including failure handling, without the trailing sleep
    #[instrument(skip(self), fields(cursor = self.state.cursor_timestamp))]
    pub async fn tick(&mut self) {
        if let Err(e) = self.run_cycle().await {
            self.handle_failure(e).await;
        }
    }

    async fn run_cycle(&mut self) -> Result<(), BotError> {
        let payload = self.source.fetch(self.state.cursor_timestamp).await?;
        let homeworks = validate(&payload)?;

        if let Some(message) = interpret(homeworks, &mut self.state)? {
            self.notifier.notify(&message).await?;

            if let Some(current_date) = payload.get("current_date").and_then(Value::as_i64) {
                debug!(
                    from = self.state.cursor_timestamp,
                    to = current_date,
                    "Advancing cursor"
                );
                self.state.cursor_timestamp = current_date;
            }
        }

        self.state.clear_error();
        Ok(())
    }

    async fn handle_failure(&mut self, err: BotError) {
        if err.is_delivery() {
            // alerting through a broken channel would only fail again
            error!(error = %err, "Notification delivery failed");
            return;
        }

        let message = format!("Сбой в работе программы: {err}");
        error!(error = %err, "Poll cycle failed");

        if !self.state.remember_error(&message) {
            debug!("Same failure as previous cycle, alert suppressed");
            return;
        }

        if let Err(e) = self.notifier.notify(&message).await {
            error!(error = %e, "Failed to alert operator");
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }
}
