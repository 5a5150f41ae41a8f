//! Drives a `Countdown` once per second on the tokio runtime.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use reading_core::{Countdown, Remaining, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(Remaining),
    /// Sent exactly once, after which the channel closes.
    Expired,
}

/// Handle to a running countdown task. Dropping it stops the ticks.
#[derive(Debug)]
pub struct CountdownTimer {
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Spawn the ticking task. Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(countdown: Countdown) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(countdown, tx));
        (Self { task }, rx)
    }

    /// Stop ticking; equivalent to dropping the handle.
    pub fn stop(self) {}
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(mut countdown: Countdown, tx: mpsc::UnboundedSender<TimerEvent>) {
    if countdown.take_immediate_expiry() {
        let _ = tx.send(TimerEvent::Expired);
        return;
    }

    let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let event = match countdown.tick() {
            Tick::Running(remaining) => TimerEvent::Tick(remaining),
            Tick::Expired => TimerEvent::Expired,
            Tick::Finished => break,
        };
        if tx.send(event).is_err() || event == TimerEvent::Expired {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn one_minute_fires_single_expiry_after_sixty_seconds() {
        let started = Instant::now();
        let (_timer, mut events) = CountdownTimer::start(Countdown::from_minutes(1));

        let mut ticks = Vec::new();
        let mut expiries = 0;
        while let Some(event) = events.recv().await {
            match event {
                TimerEvent::Tick(remaining) => ticks.push(remaining),
                TimerEvent::Expired => expiries += 1,
            }
        }

        assert_eq!(ticks.len(), 59);
        assert_eq!(ticks.first().map(ToString::to_string).as_deref(), Some("0:59"));
        assert_eq!(ticks.last().map(ToString::to_string).as_deref(), Some("0:01"));
        assert_eq!(expiries, 1);
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_minutes_expires_immediately() {
        let (_timer, mut events) = CountdownTimer::start(Countdown::from_minutes(0));
        assert_eq!(events.recv().await, Some(TimerEvent::Expired));
        assert_eq!(events.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_notifications() {
        let (timer, mut events) = CountdownTimer::start(Countdown::from_secs(3));
        assert_eq!(
            events.recv().await,
            Some(TimerEvent::Tick(Remaining::from_secs(2)))
        );

        drop(timer);

        let mut rest = Vec::new();
        while let Some(event) = events.recv().await {
            rest.push(event);
        }
        assert!(!rest.contains(&TimerEvent::Expired));
    }
}
