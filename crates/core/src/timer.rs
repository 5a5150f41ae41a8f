use std::fmt;

/// Remaining time on a countdown, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Remaining(u32);

impl Remaining {
    #[must_use]
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    #[must_use]
    pub fn secs(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0 / 60
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.0 % 60
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Renders as `M:SS`, e.g. `59:07`.
impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes(), self.seconds())
    }
}

/// What a single one-second tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time is still left; carries the new remaining value.
    Running(Remaining),
    /// Remaining time just reached zero. Produced exactly once.
    Expired,
    /// The countdown already expired earlier; nothing happens.
    Finished,
}

/// Pure countdown state: no clocks, no tasks.
///
/// The ticking driver lives in the services crate; this type only decides
/// what each tick means. A countdown cannot be paused or reset; build a new
/// one instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: Remaining,
    fired: bool,
}

impl Countdown {
    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self::from_secs(minutes.saturating_mul(60))
    }

    #[must_use]
    pub fn from_secs(secs: u32) -> Self {
        Self {
            remaining: Remaining::from_secs(secs),
            fired: false,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    /// Claim the completion notification for a countdown that starts at zero.
    ///
    /// Returns `true` at most once, and only when no time was allotted.
    pub fn take_immediate_expiry(&mut self) -> bool {
        if self.remaining.is_zero() && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if self.fired {
            return Tick::Finished;
        }
        let next = self.remaining.0.saturating_sub(1);
        self.remaining = Remaining(next);
        if next == 0 {
            self.fired = true;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}
