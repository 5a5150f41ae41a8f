#![forbid(unsafe_code)]

pub mod model;
pub mod report;
pub mod session;
pub mod time;
pub mod timer;

pub use session::{ReadingSession, SessionState, SubmissionRequest, TransitionError};
pub use time::Clock;
pub use timer::{Countdown, Remaining, Tick};
