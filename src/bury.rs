//! User-triggered bury action.

use rand::Rng;
use tracing::debug;

use crate::days::DaysSpec;
use crate::error::Result;
use crate::host::{CardId, HostContext, Scheduler};
use crate::store::BuryStore;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Outcome of a bury request. Clean aborts are outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuryOutcome {
    /// Nothing was selected; the user was told, no state changed.
    NothingSelected,
    /// The user cancelled the duration prompt; no state changed.
    Cancelled,
    /// Burials recorded and asserted on the scheduler.
    Buried {
        cards: usize,
        days: DaysSpec,
        /// Cards the scheduler reports as actually changed.
        changed: usize,
    },
}

/// Run one user-initiated bury request end-to-end: validate the selection,
/// prompt for a duration, persist one record per card, then assert the
/// burials on the host scheduler.
///
/// The durable write happens-before the scheduler call. The two are not
/// atomic; a crash in between leaves records that the next reconcile pass
/// re-asserts, which is the designed recovery path.
pub fn bury_selected(
    store: &mut BuryStore,
    scheduler: &mut dyn Scheduler,
    host: &mut dyn HostContext,
    now: i64,
    rng: &mut impl Rng,
) -> Result<BuryOutcome> {
    let cards = host.selected_cards();
    if cards.is_empty() {
        host.warn("No cards selected.");
        return Ok(BuryOutcome::NothingSelected);
    }

    let Some(days) = prompt_days(host)? else {
        return Ok(BuryOutcome::Cancelled);
    };

    // One independent draw per card.
    let records: Vec<(CardId, i64)> = cards
        .iter()
        .map(|&card| (card, until_timestamp(now, days.sample(rng))))
        .collect();
    store.upsert_many(&records)?;

    let changed = scheduler.bury_cards(&cards)?;
    debug!(cards = cards.len(), changed, %days, "buried selection");

    host.notify(&bury_message(cards.len(), days));
    Ok(BuryOutcome::Buried {
        cards: cards.len(),
        days,
        changed,
    })
}

/// Expiry timestamp for a bury of `days` starting at `now`.
#[must_use]
pub fn until_timestamp(now: i64, days: u32) -> i64 {
    now + i64::from(days) * SECONDS_PER_DAY
}

/// Prompt until the user supplies a valid duration or cancels.
fn prompt_days(host: &mut dyn HostContext) -> Result<Option<DaysSpec>> {
    loop {
        let Some(text) = host.prompt_days("Number of days (e.g. '10' or '1-100'):") else {
            return Ok(None);
        };
        match text.parse::<DaysSpec>() {
            Ok(days) => return Ok(Some(days)),
            Err(_) => host.warn("Invalid input. Enter a number or range like '1-100'."),
        }
    }
}

fn bury_message(count: usize, days: DaysSpec) -> String {
    if days.is_fixed() {
        format!("Buried {count} cards for {} days.", days.low())
    } else {
        format!(
            "Buried {count} cards for between {} and {} days.",
            days.low(),
            days.high()
        )
    }
}
