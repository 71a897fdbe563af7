//! Tick driver.
//!
//! Owns the one-second heartbeat that advances every countdown.  The
//! scheduler knows nothing about slots or catalogs; it calls a
//! [`TickDelegate`] once per period and the delegate forwards to
//! `AppService::tick`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  futures_lite::future::block_on                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  edge_executor::LocalExecutor                      │  │
//! │  │   ┌──────────────────────┐   ┌──────────────────┐  │  │
//! │  │   │ tick_loop            │   │ command pump     │  │  │
//! │  │   │  Timer::after(period)│   │  channel.receive │  │  │
//! │  │   │  delegate.on_tick()  │   │  handle_command  │  │  │
//! │  │   └──────────────────────┘   └──────────────────┘  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Both tasks run on the same thread, so a tick and a command never
//! interleave; each runs to completion before the other is polled.

use core::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use edge_executor::{LocalExecutor, Task};
use log::{debug, info};

use crate::app::ports::TickDelegate;

/// Default heartbeat.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct Scheduler {
    period: Duration,
    /// Live tick loop; dropping it cancels the loop at its next await.
    task: Option<Task<()>>,
    ticks: Rc<Cell<u64>>,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: None,
            ticks: Rc::new(Cell::new(0)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawn the tick loop on `executor`.
    ///
    /// Returns `false` and leaves the running loop untouched if already
    /// started, so there is never more than one heartbeat.
    pub fn start<'a, const C: usize, D>(&mut self, executor: &LocalExecutor<'a, C>, delegate: D) -> bool
    where
        D: TickDelegate + 'a,
    {
        if self.task.is_some() {
            debug!("Scheduler: already running");
            return false;
        }
        info!("Scheduler: started ({} ms period)", self.period.as_millis());
        self.task = Some(executor.spawn(tick_loop(self.period, self.ticks.clone(), delegate)));
        true
    }

    /// Cancel the tick loop.  No tick is delivered after this returns.
    pub fn stop(&mut self) {
        if self.task.take().is_some() {
            info!("Scheduler: stopped after {} ticks", self.ticks.get());
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Ticks delivered since construction, across restarts.
    pub fn tick_count(&self) -> u64 {
        self.ticks.get()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn tick_loop<D: TickDelegate>(period: Duration, ticks: Rc<Cell<u64>>, mut delegate: D) {
    loop {
        async_io_mini::Timer::after(period).await;
        ticks.set(ticks.get() + 1);
        delegate.on_tick();
    }
}
