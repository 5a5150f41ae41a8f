mod controller;
mod recovery;

pub use controller::{CompletedAttempt, SessionController, SessionSnapshot, SubmitOutcome};
pub use recovery::recover_abandoned_session;
