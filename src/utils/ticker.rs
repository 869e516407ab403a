use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use futures::{stream, Stream};
use tokio::time::Instant;

use super::clock::Clock;

/// Shortest period a [Ticker] accepts. Anything faster only burns cycles on redraws.
pub const MIN_TICK_PERIOD: Duration = Duration::from_secs(1);

/// A single firing of a [Ticker].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Zero based position of the tick in the sequence.
    pub index: u64,
    /// The moment this tick was scheduled for.
    pub deadline: Instant,
}

/// Repeating timer. The first tick fires immediately and every following one `period` after
/// the previous deadline. Deadlines that were missed while the consumer was busy are skipped
/// rather than fired in a burst.
pub struct Ticker {
    clock: Arc<dyn Clock>,
    period: Duration,
    next_deadline: Instant,
    index: u64,
}

impl Ticker {
    pub fn new(clock: Arc<dyn Clock>, period: Duration) -> Result<Self> {
        if period < MIN_TICK_PERIOD {
            bail!("Tick period must be at least {MIN_TICK_PERIOD:?}, got {period:?}");
        }
        let next_deadline = clock.instant();
        Ok(Self {
            clock,
            period,
            next_deadline,
            index: 0,
        })
    }

    /// Waits for the next deadline. State only changes after the wait completes, so dropping the
    /// returned future part way leaves the ticker untouched.
    pub async fn tick(&mut self) -> Tick {
        if self.next_deadline > self.clock.instant() {
            self.clock.sleep_until(self.next_deadline).await;
        }

        let tick = Tick {
            index: self.index,
            deadline: self.next_deadline,
        };
        self.index += 1;
        self.next_deadline += self.period;

        let now = self.clock.instant();
        while self.next_deadline <= now {
            self.next_deadline += self.period;
        }

        tick
    }

    /// Turns the ticker into an infinite stream of ticks. The ticker is consumed, so a sequence
    /// can't be restarted.
    pub fn into_stream(self) -> impl Stream<Item = Tick> {
        stream::unfold(self, |mut ticker| async move {
            let tick = ticker.tick().await;
            Some((tick, ticker))
        })
    }
}
