use office_planner_core::{base_bonus, BonusRates, Command, LedgerSnapshot};
use office_planner_ledger::{apply, query, PurchaseLedger};
use office_planner_system_planner::GreedyPlanner;

fn snapshot(thermoses: u32, briefcases: u32, rates: BonusRates) -> LedgerSnapshot {
    LedgerSnapshot {
        thermoses,
        briefcases,
        multiplier: 1.0,
        bonus: base_bonus(i64::from(thermoses), i64::from(briefcases), rates),
        rates,
        pending_thermos: None,
        pending_briefcase: None,
    }
}

#[test]
fn buys_thermoses_while_conversion_is_unaffordable() {
    let planner = GreedyPlanner::new();
    let rates = BonusRates::new(0.01, 0.18);

    for thermoses in 0..8 {
        let decision = planner.decide(&snapshot(thermoses, 0, rates));
        assert_eq!(
            decision.command,
            Command::BuyThermos,
            "with {thermoses} thermoses conversion is not affordable yet",
        );
        assert_eq!(decision.convert_bonus, 0.0);
    }
}

#[test]
fn first_conversion_happens_at_eight_thermoses() {
    // A ninth thermos is worth 0.09 while converting is worth 0.18.
    let planner = GreedyPlanner::new();
    let rates = BonusRates::new(0.01, 0.18);

    let decision = planner.decide(&snapshot(8, 0, rates));

    assert_eq!(decision.command, Command::ConvertBriefcase);
    assert!((decision.buy_bonus - 0.09).abs() < 1e-9);
    assert!((decision.convert_bonus - 0.18).abs() < 1e-9);
}

#[test]
fn ties_resolve_toward_conversion() {
    let planner = GreedyPlanner::new();
    let rates = BonusRates::new(0.0, 0.0);

    let decision = planner.decide(&snapshot(8, 0, rates));

    assert_eq!(decision.buy_bonus, decision.convert_bonus);
    assert_eq!(decision.command, Command::ConvertBriefcase);
}

#[test]
fn candidates_scale_with_the_applied_upgrade_multiplier() {
    let rates = BonusRates::default();
    let mut doubled = snapshot(8, 0, rates);
    doubled.multiplier = 2.0;
    doubled.bonus *= 2.0;
    let planner = GreedyPlanner::new();

    let plain = planner.decide(&snapshot(8, 0, rates));
    let upgraded = planner.decide(&doubled);

    assert_eq!(plain.command, upgraded.command);
    assert!((upgraded.buy_bonus - 2.0 * plain.buy_bonus).abs() < 1e-9);
    assert!((upgraded.convert_bonus - 2.0 * plain.convert_bonus).abs() < 1e-9);
}

#[test]
fn handle_emits_exactly_the_decided_command() {
    let planner = GreedyPlanner::new();
    let rates = BonusRates::new(0.01, 0.18);
    let mut commands = Vec::new();

    planner.handle(&snapshot(8, 0, rates), &mut commands);

    assert_eq!(commands, vec![Command::ConvertBriefcase]);
}

#[test]
fn planned_sequence_keeps_the_bonus_non_decreasing() {
    let planner = GreedyPlanner::new();
    let mut ledger = PurchaseLedger::with_config(
        BonusRates::new(0.01, 0.18),
        std::iter::empty(),
        std::iter::empty(),
    );
    let mut events = Vec::new();
    let mut previous = query::effective_bonus(&ledger);

    while query::thermoses(&ledger) < 50 {
        let decision = planner.decide(&query::snapshot(&ledger));
        events.clear();
        apply(&mut ledger, decision.command, &mut events);

        let bonus = query::effective_bonus(&ledger);
        assert!(
            bonus >= previous,
            "bonus regressed from {previous} to {bonus}",
        );
        previous = bonus;
    }
}
