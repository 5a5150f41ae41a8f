use std::sync::{Arc, Mutex, PoisonError};

use services::{CompletedAttempt, SessionController};

pub trait UiApp: Send + Sync {
    /// A controller for a new attempt, starting in `Idle`.
    fn new_attempt(&self) -> Arc<SessionController>;
    fn test_minutes(&self) -> u32;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    // Hand-off from the test page to the result page.
    report: Arc<Mutex<Option<CompletedAttempt>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
            report: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn new_attempt(&self) -> Arc<SessionController> {
        self.app.new_attempt()
    }

    #[must_use]
    pub fn test_minutes(&self) -> u32 {
        self.app.test_minutes()
    }

    pub fn store_report(&self, attempt: CompletedAttempt) {
        let mut slot = self.report.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(attempt);
    }

    #[must_use]
    pub fn latest_report(&self) -> Option<CompletedAttempt> {
        self.report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
