//! nbury init - create the data directory, config file, and store schema.
//!
//! Safe to run on every start; everything it creates is idempotent.

use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::app::AppContext;
use crate::config::Config;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file with the default template
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TEMPLATE: &str = "\
# nbury configuration
#
# [store]
# path = \"/path/to/bury.db\"   # default: platform data dir
#
# [sweep]
# chance = 10                  # 1-in-N expiry sweep per reconcile; 0 disables
";

pub fn run(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir)?;
    let store = ctx.open_store()?;
    let schema_version = store.schema_version();

    let config_path = Config::global_path()?;
    let wrote_config = if args.force || !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        true
    } else {
        false
    };

    if ctx.robot_mode {
        let output = json!({
            "store_path": ctx.store_path(),
            "schema_version": schema_version,
            "config_path": config_path,
            "config_written": wrote_config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} Store ready at {}",
            "✓".green(),
            ctx.store_path().display().to_string().cyan()
        );
        if wrote_config {
            println!(
                "{} Wrote config to {}",
                "✓".green(),
                config_path.display().to_string().cyan()
            );
        } else {
            println!(
                "  Config already present at {}",
                config_path.display().to_string().dimmed()
            );
        }
    }

    Ok(())
}
