//! `crumb`: command-line front end for the Crumb purchase planner.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crumb_core::simulation::SimulationResult;
use crumb_core::{Planner, PlannerConfig};
use crumb_data::CatalogStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog file (RON, JSON or TOML). Defaults to the stock catalog.
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Planner config file (RON, JSON or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Buy one level of an upgrade before planning (repeatable)
    #[arg(short, long = "buy", value_name = "NAME", global = true)]
    buy: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the best next purchase
    Best,
    /// Print every unlocked upgrade with its price and time to afford
    Overview,
    /// Print how production splits across owned upgrades
    Distribution,
    /// Simulate a greedy purchase sequence from a fresh start
    Simulate {
        /// Number of purchases to simulate
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        purchases: i64,
        /// Write the full report to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => crumb_data::load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    let planner = Planner::new(config).context("building planner")?;

    let mut store = match &args.catalog {
        Some(path) => CatalogStore::open(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => CatalogStore::seeded(),
    };
    for name in &args.buy {
        store
            .purchase(name)
            .with_context(|| format!("buying {name}"))?;
    }
    let catalog = store.snapshot();

    match args.command {
        Commands::Best => match planner.best_upgrade(&catalog) {
            Some(best) => println!(
                "{} (level {}) for {:.0} cookies: {:.2} min, efficiency {:.6e}",
                best.name, best.level, best.price, best.minutes, best.efficiency
            ),
            None => println!("nothing affordable at {:.3} cps", catalog.aggregate_cps()),
        },
        Commands::Overview => {
            let view = planner.overview(&catalog);
            println!("total: {:.3} cps", view.total_cps);
            println!(
                "{:<16} {:>5} {:>20} {:>12} {:>12}",
                "upgrade", "level", "price", "minutes", "value"
            );
            for u in &view.upgrades {
                let minutes = u
                    .minutes_to_afford
                    .map_or_else(|| "never".to_string(), |m| format!("{m:.2}"));
                let marker = if u.is_best { " *" } else { "" };
                println!(
                    "{:<16} {:>5} {:>20.4e} {:>12} {:>12.4e}{marker}",
                    u.name, u.level, u.current_price, minutes, u.value
                );
            }
        }
        Commands::Distribution => {
            for share in planner.cps_distribution(&catalog) {
                println!(
                    "{:<16} {:>5} {:>14.3} cps {:>6.2}%",
                    share.name, share.level, share.cps, share.percentage
                );
            }
        }
        Commands::Simulate { purchases, output } => {
            let request = planner.request(purchases)?;
            let result = planner.run_simulation(&catalog, request);
            print_summary(&result);
            if let Some(path) = output {
                crumb_data::write_report(&path, &result)
                    .with_context(|| format!("writing report {}", path.display()))?;
                log::info!("report written to {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_summary(result: &SimulationResult) {
    println!(
        "{} purchases ({:?}): {:.3} cps after {:.1} min, {:.4e} cookies spent",
        result.total_purchases,
        result.termination,
        result.final_cps,
        result.total_minutes,
        result.total_cookies
    );
    for r in &result.results {
        println!(
            "{:<16} x{:<5} {:>6.2}% cps {:>6.2}% time",
            r.name, r.purchases, r.cps_percentage, r.time_percentage
        );
    }
}
