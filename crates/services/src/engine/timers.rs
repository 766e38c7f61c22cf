use tokio::task::JoinHandle;

/// Background tasks owned by the live session.
///
/// Handles are aborted on replacement and on every transition out of the
/// active phase.
#[derive(Debug, Default)]
pub(super) struct SessionTimers {
    ticker: Option<JoinHandle<()>>,
    advance: Option<JoinHandle<()>>,
}

impl SessionTimers {
    pub(super) fn set_ticker(&mut self, handle: JoinHandle<()>) {
        self.cancel_ticker();
        self.ticker = Some(handle);
    }

    pub(super) fn set_advance(&mut self, handle: JoinHandle<()>) {
        self.cancel_advance();
        self.advance = Some(handle);
    }

    /// Forget the ticker handle without aborting; used by the ticker itself.
    pub(super) fn release_ticker(&mut self) {
        self.ticker = None;
    }

    pub(super) fn release_advance(&mut self) {
        self.advance = None;
    }

    pub(super) fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    pub(super) fn cancel_advance(&mut self) {
        if let Some(handle) = self.advance.take() {
            handle.abort();
        }
    }

    pub(super) fn cancel_all(&mut self) {
        self.cancel_ticker();
        self.cancel_advance();
    }

    pub(super) fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub(super) fn has_pending_advance(&self) -> bool {
        self.advance.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}
