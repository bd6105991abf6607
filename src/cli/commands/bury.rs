//! nbury bury - record burials for the given cards.
//!
//! Writes the durable records only. The live scheduler belongs to the host
//! process; it picks these records up on its next reconcile pass, the same
//! path that heals a crash between store write and scheduler call.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::app::AppContext;
use crate::bury::until_timestamp;
use crate::days::DaysSpec;
use crate::error::Result;
use crate::host::CardId;

#[derive(Args, Debug)]
pub struct BuryArgs {
    /// Card ids to bury
    #[arg(required = true)]
    pub cards: Vec<CardId>,

    /// Days to bury for: a number ('10') or an inclusive range ('1-100').
    /// Prompts interactively when omitted.
    #[arg(long, short = 'd')]
    pub days: Option<String>,
}

pub fn run(ctx: &AppContext, args: &BuryArgs) -> Result<()> {
    let days = match &args.days {
        Some(text) => text.parse::<DaysSpec>()?,
        None => {
            let stdin = io::stdin();
            match prompt_days(&mut stdin.lock())? {
                Some(days) => days,
                None => {
                    if !ctx.robot_mode {
                        println!("Cancelled.");
                    }
                    return Ok(());
                }
            }
        }
    };

    let now = Utc::now().timestamp();
    let mut rng = rand::rng();
    let mut store = ctx.open_store()?;

    let records: Vec<(CardId, i64)> = args
        .cards
        .iter()
        .map(|&card| (card, until_timestamp(now, days.sample(&mut rng))))
        .collect();
    store.upsert_many(&records)?;

    if ctx.robot_mode {
        let output = json!({
            "buried": records
                .iter()
                .map(|&(card_id, until)| json!({"card_id": card_id, "until": until}))
                .collect::<Vec<_>>(),
            "count": records.len(),
            "days": days.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if days.is_fixed() {
            println!(
                "{} Recorded {} cards buried for {} days.",
                "✓".green(),
                records.len().to_string().cyan(),
                days.low()
            );
        } else {
            println!(
                "{} Recorded {} cards buried for between {} and {} days.",
                "✓".green(),
                records.len().to_string().cyan(),
                days.low(),
                days.high()
            );
        }
        println!("  The host applies these on its next reconcile pass.");
    }

    Ok(())
}

/// Prompt on stdin until a valid duration arrives; empty input cancels.
fn prompt_days(input: &mut impl BufRead) -> Result<Option<DaysSpec>> {
    loop {
        eprint!("Number of days (e.g. '10' or '1-100'), empty to cancel: ");
        io::stderr().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let text = line.trim();
        if text.is_empty() {
            return Ok(None);
        }
        match text.parse::<DaysSpec>() {
            Ok(days) => return Ok(Some(days)),
            Err(err) => eprintln!("{err}"),
        }
    }
}
