//! nbury status - show bury records and their expiry.

use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::commands::format_timestamp;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Include expired records still awaiting a sweep
    #[arg(long)]
    pub all: bool,
}

pub fn run(ctx: &AppContext, args: &StatusArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let now = Utc::now().timestamp();
    let records = store.list_records()?;

    let (active, expired): (Vec<_>, Vec<_>) = records.iter().partition(|r| r.until > now);

    if ctx.robot_mode {
        let output = json!({
            "now": now,
            "active": active
                .iter()
                .map(|r: &&crate::store::sqlite::BuryRecord| json!({"card_id": r.card_id, "until": r.until}))
                .collect::<Vec<_>>(),
            "active_count": active.len(),
            "expired_count": expired.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No bury records.");
        return Ok(());
    }

    if !active.is_empty() {
        println!("{}", "Buried Cards".bold());
        println!("{}", "─".repeat(40));
        for record in &active {
            println!(
                "  {}  until {}",
                format!("card {}", record.card_id).cyan(),
                format_timestamp(record.until)
            );
        }
        println!();
    }

    if args.all {
        for record in &expired {
            println!(
                "  {}  expired {}",
                format!("card {}", record.card_id).dimmed(),
                format_timestamp(record.until).dimmed()
            );
        }
        if !expired.is_empty() {
            println!();
        }
    }

    println!(
        "Total: {} active, {} expired",
        active.len().to_string().cyan(),
        expired.len().to_string().yellow()
    );

    Ok(())
}
