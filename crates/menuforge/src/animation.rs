//! Menu animations and the per-viewer runner that drives them.
//!
//! Every animation declares a fixed tick interval. A menu with several
//! animations is driven by a single host timer running at the greatest
//! common divisor of those intervals; the runner keeps one accumulator per
//! animation and fires each one exactly on its own cadence.

use std::sync::Arc;

use menuforge_host::{MenuHost, Scheduler, TaskHandle, ViewerId};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::{MenuError, MenuResult};
use crate::menu::AnyMenu;

/// A repeating per-viewer animation attached to a menu.
///
/// `tick` receives the viewer the animation is running for, so the same
/// menu value can animate differently for each viewer that has it open.
pub trait MenuAnimation: Send + Sync {
    /// Ticks between firings, in host time units. Must be non-zero; menu
    /// construction rejects zero intervals.
    fn interval(&self) -> u64;

    /// Runs one animation frame for `viewer`.
    fn tick(&self, viewer: ViewerId, menu: &AnyMenu, host: &mut dyn MenuHost);
}

type TickFn = Box<dyn Fn(ViewerId, &AnyMenu, &mut dyn MenuHost) + Send + Sync>;

/// A [`MenuAnimation`] built from a closure.
pub struct FnAnimation {
    interval: u64,
    tick: TickFn,
}

impl std::fmt::Debug for FnAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAnimation")
            .field("interval", &self.interval)
            .finish()
    }
}

impl FnAnimation {
    /// Wraps a closure as an animation firing every `interval` ticks.
    #[must_use]
    pub fn new(
        interval: u64,
        tick: impl Fn(ViewerId, &AnyMenu, &mut dyn MenuHost) + Send + Sync + 'static,
    ) -> Self {
        Self {
            interval,
            tick: Box::new(tick),
        }
    }
}

impl MenuAnimation for FnAnimation {
    fn interval(&self) -> u64 {
        self.interval
    }

    fn tick(&self, viewer: ViewerId, menu: &AnyMenu, host: &mut dyn MenuHost) {
        (self.tick)(viewer, menu, host);
    }
}

/// Several animations folded into one, ticking at the GCD of their
/// intervals and fanning out to each sub-animation on its own cadence.
///
/// Useful for attaching a bundle of effects as a single animation slot; a
/// menu attaching animations individually gets the same arithmetic from
/// its runner.
pub struct MultiAnimation {
    animations: Vec<Arc<dyn MenuAnimation>>,
    interval: u64,
    counters: Mutex<Vec<u64>>,
}

impl std::fmt::Debug for MultiAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiAnimation")
            .field("animations", &self.animations.len())
            .field("interval", &self.interval)
            .finish()
    }
}

impl MultiAnimation {
    /// Combines a non-empty set of animations.
    ///
    /// # Errors
    ///
    /// [`MenuError::ZeroInterval`] when the set is empty or any member
    /// declares interval 0.
    pub fn new(animations: Vec<Arc<dyn MenuAnimation>>) -> MenuResult<Self> {
        if animations.iter().any(|a| a.interval() == 0) {
            return Err(MenuError::ZeroInterval);
        }
        let Some(interval) =
            crate::interval::reduced_interval(animations.iter().map(|a| a.interval()))
        else {
            return Err(MenuError::ZeroInterval);
        };
        let counters = Mutex::new(vec![0; animations.len()]);
        Ok(Self {
            animations,
            interval: interval.get(),
            counters,
        })
    }
}

impl MenuAnimation for MultiAnimation {
    fn interval(&self) -> u64 {
        self.interval
    }

    fn tick(&self, viewer: ViewerId, menu: &AnyMenu, host: &mut dyn MenuHost) {
        let mut counters = self.counters.lock();
        for (counter, animation) in counters.iter_mut().zip(&self.animations) {
            *counter += self.interval;
            if *counter >= animation.interval() {
                *counter -= animation.interval();
                animation.tick(viewer, menu, host);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RunnerState {
    Idle,
    Running(Option<TaskHandle>),
    Stopped,
}

/// Drives one menu's animations for one viewer.
///
/// The runner moves strictly Idle -> Running -> Stopped. [`start`] on a
/// non-idle runner and [`stop`] on a non-running runner are usage-protocol
/// errors and panic; session bookkeeping owns exactly one runner per open
/// view and never crosses those edges twice.
///
/// [`start`]: RunningAnimations::start
/// [`stop`]: RunningAnimations::stop
#[derive(Debug)]
pub struct RunningAnimations {
    menu: Arc<AnyMenu>,
    viewer: ViewerId,
    state: RunnerState,
}

impl RunningAnimations {
    /// A fresh idle runner for one viewer of `menu`.
    #[must_use]
    pub fn new(menu: Arc<AnyMenu>, viewer: ViewerId) -> Self {
        Self {
            menu,
            viewer,
            state: RunnerState::Idle,
        }
    }

    /// True while the runner is in the running state, including for menus
    /// with no animations.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, RunnerState::Running(_))
    }

    /// Schedules the menu's animations on the host timer.
    ///
    /// A menu with no animations still transitions to running without
    /// scheduling anything.
    ///
    /// # Panics
    ///
    /// Panics if the runner is not idle.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        assert!(
            matches!(self.state, RunnerState::Idle),
            "animation runner for {} started twice",
            self.viewer
        );
        let Some(period) = self.menu.animation_interval() else {
            self.state = RunnerState::Running(None);
            return;
        };
        let period = period.get();
        let menu = Arc::clone(&self.menu);
        let viewer = self.viewer;
        let mut counters = vec![0u64; menu.animations().len()];
        let handle = scheduler.run_repeating(
            period,
            period,
            Box::new(move |host| {
                for (counter, animation) in counters.iter_mut().zip(menu.animations()) {
                    *counter += period;
                    if *counter >= animation.interval() {
                        *counter -= animation.interval();
                        animation.tick(viewer, &menu, host);
                    }
                }
            }),
        );
        debug!(viewer = %self.viewer, period, "menu animations started");
        self.state = RunnerState::Running(Some(handle));
    }

    /// Cancels the host timer and retires the runner.
    ///
    /// # Panics
    ///
    /// Panics if the runner is not running.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        let RunnerState::Running(handle) = self.state else {
            panic!("animation runner for {} stopped while not running", self.viewer);
        };
        if let Some(handle) = handle {
            scheduler.cancel(handle);
        }
        debug!(viewer = %self.viewer, "menu animations stopped");
        self.state = RunnerState::Stopped;
    }
}
