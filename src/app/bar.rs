use std::{pin::pin, sync::Arc, time::Duration};

use anyhow::Result;
use futures::StreamExt;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span};

use crate::{
    progress::Progress,
    utils::{clock::Clock, ticker::Ticker},
    window_api::{Surface, SurfaceEvent},
};

use super::context::AppContext;

/// How often window events are drained between ticks.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Owns the bar window and repaints it on every tick.
pub struct BarModule {
    context: AppContext,
    surface: Box<dyn Surface>,
    shutdown: CancellationToken,
    tick_period: Duration,
    time_provider: Arc<dyn Clock>,
}

impl BarModule {
    pub fn new(
        context: AppContext,
        surface: Box<dyn Surface>,
        shutdown: CancellationToken,
        tick_period: Duration,
        time_provider: Arc<dyn Clock>,
    ) -> Self {
        Self {
            context,
            surface,
            shutdown,
            tick_period,
            time_provider,
        }
    }

    fn repaint(&mut self) -> Result<Progress> {
        let now = self.time_provider.time().time();
        let (progress, layout) = self.context.frame_at(now);
        self.surface.draw(&layout.segments())?;
        Ok(progress)
    }

    /// A failed repaint only leaves the bar stale until the next one.
    fn refresh(&mut self, reason: &str) {
        let _span = info_span!("Repainting bar", reason).entered();
        match self.repaint() {
            Ok(progress) => debug!("Bar shows {progress}"),
            Err(e) => error!("Encountered an error during repaint {e:?}"),
        }
    }

    /// Executes the bar event loop. Returns when the shutdown token is cancelled or the window is
    /// closed.
    pub async fn run(mut self) -> Result<()> {
        let ticker = Ticker::new(self.time_provider.clone(), self.tick_period)?;
        let mut ticks = pin!(ticker.into_stream());

        let mut event_poll = tokio::time::interval(EVENT_POLL_INTERVAL);
        event_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    return Ok(())
                }
                Some(tick) = ticks.next() => {
                    debug!("Tick {}", tick.index);
                    self.refresh("tick");
                }
                _ = event_poll.tick() => {
                    match self.surface.poll_events() {
                        Ok(events) if events.contains(&SurfaceEvent::Closed) => {
                            info!("Bar window was closed");
                            return Ok(());
                        }
                        Ok(events) => {
                            if events.contains(&SurfaceEvent::Obscured) {
                                debug!("Bar window was covered, raising it");
                                if let Err(e) = self.surface.raise() {
                                    error!("Failed to raise bar window {e:?}");
                                }
                            }
                            if events.contains(&SurfaceEvent::Exposed) {
                                self.refresh("exposed");
                            }
                        }
                        Err(e) => error!("Failed to poll window events {e:?}"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::{DateTime, Local, NaiveDate, TimeZone};
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use crate::{
        app::context::AppContext,
        config::{color::Color, document::ConfigDocument, Configuration},
        render::Segment,
        utils::{clock::Clock, logging::TEST_LOGGING},
        window_api::{MockSurface, ScreenMetrics, SurfaceEvent},
    };

    use super::BarModule;

    const LIME: Color = Color::rgb(0, 255, 0);
    const GRAY: Color = Color::rgb(128, 128, 128);

    /// Wall clock stuck at one moment while tokio's paused timers move.
    struct FixedClock {
        time: DateTime<Local>,
    }

    impl FixedClock {
        fn at(hour: u32, minute: u32) -> Self {
            let naive = NaiveDate::from_ymd_opt(2018, 7, 4)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            Self {
                time: Local.from_local_datetime(&naive).earliest().unwrap(),
            }
        }
    }

    #[async_trait]
    impl Clock for FixedClock {
        fn time(&self) -> DateTime<Local> {
            self.time
        }

        fn instant(&self) -> Instant {
            Instant::now()
        }

        async fn sleep_until(&self, instant: Instant) {
            tokio::time::sleep_until(instant).await;
        }
    }

    fn default_context(width: u32) -> AppContext {
        let config = Configuration::try_from(ConfigDocument::default()).unwrap();
        AppContext::new(config, ScreenMetrics { width })
    }

    fn recording_surface(frames: Arc<Mutex<Vec<Vec<Segment>>>>) -> MockSurface {
        let mut surface = MockSurface::new();
        surface
            .expect_poll_events()
            .returning(|| Ok(Vec::new()));
        surface.expect_draw().returning(move |segments| {
            frames.lock().unwrap().push(segments.to_vec());
            Ok(())
        });
        surface
    }

    #[tokio::test(start_paused = true)]
    async fn repaints_once_per_tick() -> Result<()> {
        *TEST_LOGGING;
        let frames = Arc::new(Mutex::new(Vec::new()));
        let shutdown = CancellationToken::new();
        let module = BarModule::new(
            default_context(1000),
            Box::new(recording_surface(frames.clone())),
            shutdown.clone(),
            Duration::from_secs(60),
            Arc::new(FixedClock::at(14, 0)),
        );

        let (_, result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(125)).await;
                shutdown.cancel()
            },
            module.run(),
        );
        result?;

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 3);
        for frame in frames.iter() {
            assert_eq!(
                frame,
                &vec![
                    Segment {
                        x: 0,
                        width: 500,
                        height: 2,
                        color: LIME
                    },
                    Segment {
                        x: 500,
                        width: 500,
                        height: 2,
                        color: GRAY
                    },
                ]
            );
        }
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn failed_repaint_keeps_schedule() -> Result<()> {
        *TEST_LOGGING;
        let attempts = Arc::new(Mutex::new(0u32));
        let mut surface = MockSurface::new();
        surface
            .expect_poll_events()
            .returning(|| Ok(Vec::new()));
        {
            let attempts = attempts.clone();
            surface.expect_draw().returning(move |_| {
                let mut attempts = attempts.lock().unwrap();
                *attempts += 1;
                if *attempts == 1 {
                    Err(anyhow!("display went away for a moment"))
                } else {
                    Ok(())
                }
            });
        }
        let shutdown = CancellationToken::new();
        let module = BarModule::new(
            default_context(800),
            Box::new(surface),
            shutdown.clone(),
            Duration::from_secs(60),
            Arc::new(FixedClock::at(9, 0)),
        );

        let (_, result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(65)).await;
                shutdown.cancel()
            },
            module.run(),
        );

        result?;
        assert_eq!(*attempts.lock().unwrap(), 2);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn exposure_triggers_repaint() -> Result<()> {
        *TEST_LOGGING;
        let frames = Arc::new(Mutex::new(Vec::new()));
        let polls = Arc::new(Mutex::new(0u32));
        let mut surface = MockSurface::new();
        {
            let polls = polls.clone();
            surface.expect_poll_events().returning(move || {
                let mut polls = polls.lock().unwrap();
                *polls += 1;
                if *polls == 3 {
                    Ok(vec![SurfaceEvent::Exposed])
                } else {
                    Ok(Vec::new())
                }
            });
        }
        {
            let frames = frames.clone();
            surface.expect_draw().returning(move |segments| {
                frames.lock().unwrap().push(segments.to_vec());
                Ok(())
            });
        }
        let shutdown = CancellationToken::new();
        let module = BarModule::new(
            default_context(1000),
            Box::new(surface),
            shutdown.clone(),
            Duration::from_secs(60),
            Arc::new(FixedClock::at(20, 0)),
        );

        let (_, result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                shutdown.cancel()
            },
            module.run(),
        );
        result?;

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1][0].width, 1000);
        assert_eq!(frames[1][1].width, 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn covered_window_is_raised_between_ticks() -> Result<()> {
        *TEST_LOGGING;
        let polls = Arc::new(Mutex::new(0u32));
        let mut surface = MockSurface::new();
        {
            let polls = polls.clone();
            surface.expect_poll_events().returning(move || {
                let mut polls = polls.lock().unwrap();
                *polls += 1;
                if *polls == 4 {
                    Ok(vec![SurfaceEvent::Obscured])
                } else {
                    Ok(Vec::new())
                }
            });
        }
        surface.expect_raise().times(1).returning(|| Ok(()));
        surface.expect_draw().times(1).returning(|_| Ok(()));

        let shutdown = CancellationToken::new();
        let module = BarModule::new(
            default_context(1000),
            Box::new(surface),
            shutdown.clone(),
            Duration::from_secs(60),
            Arc::new(FixedClock::at(11, 0)),
        );

        let (_, result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                shutdown.cancel()
            },
            module.run(),
        );
        result?;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn closed_window_ends_loop() -> Result<()> {
        *TEST_LOGGING;
        let mut surface = MockSurface::new();
        surface
            .expect_poll_events()
            .returning(|| Ok(vec![SurfaceEvent::Closed]));
        surface.expect_draw().times(1).returning(|_| Ok(()));

        let module = BarModule::new(
            default_context(1000),
            Box::new(surface),
            CancellationToken::new(),
            Duration::from_secs(60),
            Arc::new(FixedClock::at(10, 0)),
        );

        tokio::time::timeout(Duration::from_secs(30), module.run()).await??;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_sub_second_period() {
        let module = BarModule::new(
            default_context(1000),
            Box::new(MockSurface::new()),
            CancellationToken::new(),
            Duration::from_millis(100),
            Arc::new(FixedClock::at(10, 0)),
        );
        assert!(module.run().await.is_err());
    }
}
