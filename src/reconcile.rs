//! Reconciliation of live scheduler state from the durable store.
//!
//! The host's in-memory bury state does not survive restarts and can drift
//! after sync. Each lifecycle trigger re-asserts every still-active record
//! on the scheduler; assert-only, so cards buried outside this mechanism
//! are never touched.

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::host::{HostContext, Scheduler};
use crate::store::BuryStore;

/// Default denominator of the per-pass expiry-sweep roll (1-in-10).
pub const DEFAULT_SWEEP_CHANCE: u32 = 10;

/// Host lifecycle points that trigger a reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Application start.
    Startup,
    /// Synchronization is about to begin.
    SyncWillStart,
    /// Synchronization finished.
    SyncDidFinish,
}

/// What one reconcile pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Active records asserted on the scheduler.
    pub attempted: usize,
    /// Cards the scheduler reports as actually changed.
    pub changed: usize,
    /// Whether the expiry sweep ran this pass.
    pub swept: bool,
}

impl ReconcileReport {
    /// User-facing summary, or `None` when nothing was re-buried.
    ///
    /// Both counts are surfaced only when the scheduler changed fewer cards
    /// than were attempted.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if self.attempted == 0 {
            return None;
        }
        if self.changed == self.attempted {
            Some(format!("Re-buried {} cards.", self.changed))
        } else {
            Some(format!(
                "Re-buried {} of {} cards.",
                self.changed, self.attempted
            ))
        }
    }
}

/// Re-asserts still-active burials on the host scheduler and, with a
/// 1-in-`sweep_chance` roll per pass, garbage-collects expired records.
///
/// The sweep is amortized cleanup in place of a dedicated timer: stale rows
/// may linger, but the store cannot grow unboundedly under regular use.
#[derive(Debug)]
pub struct Reconciler<'a> {
    store: &'a BuryStore,
    sweep_chance: u32,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub fn new(store: &'a BuryStore) -> Self {
        Self {
            store,
            sweep_chance: DEFAULT_SWEEP_CHANCE,
        }
    }

    /// Override the sweep roll denominator. `0` disables the roll.
    #[must_use]
    pub fn with_sweep_chance(mut self, chance: u32) -> Self {
        self.sweep_chance = chance;
        self
    }

    /// One reconcile pass at `now`, triggered by `event`.
    pub fn run(
        &self,
        event: LifecycleEvent,
        scheduler: &mut dyn Scheduler,
        now: i64,
        rng: &mut impl Rng,
    ) -> Result<ReconcileReport> {
        let active = self.store.select_active(now)?;
        let mut report = ReconcileReport {
            attempted: active.len(),
            ..ReconcileReport::default()
        };

        if !active.is_empty() {
            report.changed = scheduler.bury_cards(&active)?;
        }

        if self.sweep_chance > 0 && rng.random_range(0..self.sweep_chance) == 0 {
            self.store.delete_expired(now)?;
            report.swept = true;
        }

        info!(
            ?event,
            attempted = report.attempted,
            changed = report.changed,
            swept = report.swept,
            "reconciled bury state"
        );
        Ok(report)
    }

    /// Run a pass and surface its summary through the host context.
    pub fn run_notified(
        &self,
        event: LifecycleEvent,
        scheduler: &mut dyn Scheduler,
        host: &mut dyn HostContext,
        now: i64,
        rng: &mut impl Rng,
    ) -> Result<ReconcileReport> {
        let report = self.run(event, scheduler, now, rng)?;
        if let Some(message) = report.message() {
            host.notify(&message);
        }
        Ok(report)
    }
}
