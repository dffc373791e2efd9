//! Timed rotation through the highlight list
//!
//! [`Carousel`] is the pure rotation state and can be stepped by hand.
//! [`CarouselScheduler`] drives it from a tokio task, deactivating the
//! current card, waiting a short transition gap, then activating the next.
//! The task shares nothing with the search session and runs until the
//! returned [`CarouselHandle`] is stopped or dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, warn};

use super::highlights::Highlight;

/// Receives activation changes from a running carousel
///
/// Implemented by the renderer; called from the scheduler task.
pub trait HighlightSink: Send + Sync {
    fn deactivate(&self, index: usize, highlight: &Highlight);
    fn activate(&self, index: usize, highlight: &Highlight);
}

/// One step of the rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub deactivate: usize,
    pub activate: usize,
}

/// Ordered, non-empty highlight list with a current index
#[derive(Debug, Clone)]
pub struct Carousel {
    items: Vec<Highlight>,
    current: usize,
}

impl Carousel {
    /// Returns `None` for an empty list
    #[must_use]
    pub fn new(items: Vec<Highlight>) -> Option<Self> {
        (!items.is_empty()).then_some(Self { items, current: 0 })
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Highlight {
        &self.items[self.current]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Highlight> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether there is anything to rotate to
    #[must_use]
    pub fn can_rotate(&self) -> bool {
        self.items.len() >= 2
    }

    /// Step to the next highlight, wrapping at the end
    pub fn advance(&mut self) -> Option<Rotation> {
        if !self.can_rotate() {
            return None;
        }
        let deactivate = self.current;
        self.current = (self.current + 1) % self.items.len();
        Some(Rotation {
            deactivate,
            activate: self.current,
        })
    }
}

/// Rotation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTiming {
    /// Time between rotations
    pub interval: Duration,
    /// Gap between deactivating the old card and activating the new one
    pub transition: Duration,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(4500),
            transition: Duration::from_millis(400),
        }
    }
}

/// Starts carousel tasks
pub struct CarouselScheduler;

impl CarouselScheduler {
    /// Spawn the rotation task on the current tokio runtime
    ///
    /// Nothing is scheduled when the carousel cannot rotate; the returned
    /// handle is then idle.
    #[must_use]
    pub fn start(carousel: Carousel, timing: CarouselTiming, sink: Arc<dyn HighlightSink>) -> CarouselHandle {
        if !carousel.can_rotate() {
            debug!(items = carousel.len(), "carousel not started");
            return CarouselHandle::idle();
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(rotate(carousel, timing, sink, stop_rx));

        CarouselHandle {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }
}

async fn rotate(
    mut carousel: Carousel,
    timing: CarouselTiming,
    sink: Arc<dyn HighlightSink>,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + timing.interval, timing.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = stop.changed() => break,
            _ = ticker.tick() => {}
        }

        let Some(rotation) = carousel.advance() else {
            break;
        };
        if let Some(old) = carousel.get(rotation.deactivate) {
            sink.deactivate(rotation.deactivate, old);
        }

        tokio::select! {
            _ = stop.changed() => break,
            () = sleep(timing.transition) => {}
        }

        sink.activate(rotation.activate, carousel.current());
    }

    debug!("carousel stopped");
}

/// Lifecycle handle for a running carousel
///
/// Dropping the handle also stops the task.
#[derive(Debug)]
pub struct CarouselHandle {
    stop: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl CarouselHandle {
    const fn idle() -> Self {
        Self { stop: None, task: None }
    }

    /// Whether rotation is scheduled and not yet stopped
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.stop.is_some() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Request the task to stop; no further sink calls happen once it
    /// observes the request
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
        }
    }

    /// Stop and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.stop();
        let Some(task) = self.task.take() else {
            return;
        };
        if let Err(e) = task.await {
            warn!(error = %e, "carousel task ended abnormally");
        }
    }
}
