//! nbury reconcile - re-derive the active bury set and run housekeeping.
//!
//! Prints the set a host reconcile pass would re-assert on its scheduler,
//! and rolls the same 1-in-N expiry sweep the in-host pass uses.

use chrono::Utc;
use clap::Args;
use colored::Colorize;
use rand::Rng;
use serde_json::json;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Run the expiry sweep unconditionally instead of the 1-in-N roll
    #[arg(long)]
    pub sweep: bool,
}

pub fn run(ctx: &AppContext, args: &ReconcileArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let now = Utc::now().timestamp();

    let active = store.select_active(now)?;

    let chance = ctx.config.sweep.chance;
    let rolled = chance > 0 && rand::rng().random_range(0..chance) == 0;
    let removed = if args.sweep || rolled {
        Some(store.delete_expired(now)?)
    } else {
        None
    };

    if ctx.robot_mode {
        let output = json!({
            "now": now,
            "active": active,
            "count": active.len(),
            "swept": removed.is_some(),
            "removed": removed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if active.is_empty() {
        println!("No active bury records to re-assert.");
    } else {
        println!(
            "{} active bury records to re-assert:",
            active.len().to_string().cyan()
        );
        for card in &active {
            println!("  card {card}");
        }
    }

    if let Some(removed) = removed {
        println!(
            "{} Swept {} expired records.",
            "✓".green(),
            removed.to_string().yellow()
        );
    }

    Ok(())
}
