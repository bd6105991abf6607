//! Command handlers, one module per subcommand.

pub mod bury;
pub mod init;
pub mod reconcile;
pub mod status;
pub mod sweep;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run(ctx, args),
        Commands::Bury(args) => bury::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
        Commands::Reconcile(args) => reconcile::run(ctx, args),
        Commands::Sweep(args) => sweep::run(ctx, args),
    }
}

/// Render a unix timestamp for human output.
pub(crate) fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map_or_else(|| format!("@{ts}"), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
