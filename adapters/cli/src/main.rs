#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that computes Office Space purchase schedules.

mod plan_transfer;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use office_planner_core::BonusRates;
use office_planner_ledger::{
    PurchaseLedger, DEFAULT_BRIEFCASE_UPGRADES, DEFAULT_THERMOS_UPGRADES,
};
use plan_transfer::PlanTransfer;

/// Greedy purchase-path calculator for the Office Space minigame.
#[derive(Debug, Parser)]
#[command(name = "office-planner", version, about)]
struct Cli {
    /// Maximum thermos count the planning loop runs toward.
    #[arg(short, long, default_value_t = 10_000)]
    max: u32,
    /// Also print the candidate bonuses each decision compared.
    #[arg(short, long)]
    verbose: bool,
    /// Print the encoded plan transfer string after planning.
    #[arg(long)]
    share: bool,
    /// Replay an encoded plan transfer string instead of planning.
    #[arg(long, value_name = "PLAN", conflicts_with_all = ["max", "share"])]
    replay: Option<String>,
}

/// Entry point for the Office Space planner command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.replay.as_deref() {
        Some(encoded) => run_replay(encoded),
        None => run_planner(&cli),
    }
}

fn run_planner(cli: &Cli) -> Result<()> {
    let rates = BonusRates::default();
    let mut ledger = PurchaseLedger::new();

    let commands = session::run_plan(&mut ledger, cli.max, |decision, events| {
        if cli.verbose {
            if let Some(decision) = decision {
                println!(
                    "  candidates: buy {:.4} vs convert {:.4}",
                    decision.buy_bonus, decision.convert_bonus,
                );
            }
        }
        for event in events {
            println!("{}", session::describe(event));
        }
    })
    .context("planning loop failed")?;

    if cli.share {
        let transfer = PlanTransfer {
            max: cli.max,
            rates,
            commands,
        };
        println!("{}", transfer.encode());
    }

    Ok(())
}

fn run_replay(encoded: &str) -> Result<()> {
    let plan =
        PlanTransfer::decode(encoded).context("could not decode the plan transfer string")?;
    let mut ledger = PurchaseLedger::with_config(
        plan.rates,
        DEFAULT_THERMOS_UPGRADES,
        DEFAULT_BRIEFCASE_UPGRADES,
    );

    session::replay(&mut ledger, &plan.commands, |events| {
        for event in events {
            println!("{}", session::describe(event));
        }
    })
}
