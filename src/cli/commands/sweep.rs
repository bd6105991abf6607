//! nbury sweep - delete expired bury records now.
//!
//! The reconcile pass already sweeps with low probability; this is the
//! explicit form for housekeeping on demand.

use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Show what would be removed without deleting
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &AppContext, args: &SweepArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let now = Utc::now().timestamp();

    let total = store.count()?;
    let active = store.count_active(now)?;
    let expired = total - active;

    let removed = if args.dry_run {
        None
    } else {
        Some(store.delete_expired(now)?)
    };

    if ctx.robot_mode {
        let output = json!({
            "expired": expired,
            "removed": removed,
            "dry_run": args.dry_run,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if args.dry_run {
        println!(
            "Would remove {} expired records ({} active kept).",
            expired.to_string().yellow(),
            active.to_string().cyan()
        );
        println!("  (dry run - no changes made)");
    } else {
        println!(
            "{} Removed {} expired records ({} active kept).",
            "✓".green(),
            removed.unwrap_or(0).to_string().yellow(),
            active.to_string().cyan()
        );
    }

    Ok(())
}
