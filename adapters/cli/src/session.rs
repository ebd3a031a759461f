use anyhow::{bail, Result};
use office_planner_core::{Command, Event, THERMOSES_PER_BRIEFCASE};
use office_planner_ledger::{apply, query, PurchaseLedger};
use office_planner_system_planner::{Decision, GreedyPlanner};
use office_planner_system_upgrades::UpgradeWatch;

/// Runs the greedy planning loop until the thermos count reaches `max`.
///
/// Each pass re-snapshots the ledger, lets the upgrade system claim the step
/// if a pending offer pays off, and otherwise applies the greedy planner's
/// buy-versus-convert decision. The `report` callback receives the planner's
/// decision (absent for upgrade steps) together with the events the ledger
/// emitted for the applied command.
pub(crate) fn run_plan<F>(
    ledger: &mut PurchaseLedger,
    max: u32,
    mut report: F,
) -> Result<Vec<Command>>
where
    F: FnMut(Option<&Decision>, &[Event]),
{
    let upgrades = UpgradeWatch::new();
    let planner = GreedyPlanner::new();
    let mut commands = Vec::new();
    let mut proposed = Vec::new();
    let mut events = Vec::new();

    while query::thermoses(ledger) < max {
        let snapshot = query::snapshot(ledger);

        proposed.clear();
        upgrades.handle(&snapshot, &mut proposed);
        let decision = if proposed.is_empty() {
            let decision = planner.decide(&snapshot);
            proposed.push(decision.command);
            Some(decision)
        } else {
            None
        };

        let command = proposed[0];
        events.clear();
        apply(ledger, command, &mut events);
        if let Some(rejection) = events
            .iter()
            .find(|event| matches!(event, Event::CommandRejected { .. }))
        {
            bail!("ledger rejected a planned command: {rejection:?}");
        }

        report(decision.as_ref(), &events);
        commands.push(command);
    }

    Ok(commands)
}

/// Replays a previously planned command sequence against a fresh ledger.
pub(crate) fn replay<F>(
    ledger: &mut PurchaseLedger,
    commands: &[Command],
    mut report: F,
) -> Result<()>
where
    F: FnMut(&[Event]),
{
    let mut events = Vec::new();
    for command in commands {
        events.clear();
        apply(ledger, *command, &mut events);
        if let Some(rejection) = events
            .iter()
            .find(|event| matches!(event, Event::CommandRejected { .. }))
        {
            bail!("plan replay was rejected by the ledger: {rejection:?}");
        }
        report(&events);
    }

    Ok(())
}

/// Formats an applied ledger event as a single report line.
pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::ThermosPurchased {
            thermoses,
            briefcases,
            bonus,
        } => format!(
            "+1 thermos -> {thermoses} thermoses, {briefcases} briefcases, bonus {:.2}%",
            bonus * 100.0,
        ),
        Event::BriefcaseConverted {
            thermoses,
            briefcases,
            bonus,
        } => format!(
            "{THERMOSES_PER_BRIEFCASE} thermoses -> +1 briefcase: \
             {thermoses} thermoses, {briefcases} briefcases, bonus {:.2}%",
            bonus * 100.0,
        ),
        Event::UpgradeApplied {
            unit,
            offer,
            thermoses,
            briefcases,
            bonus,
        } => format!(
            "{} upgrade +{}% (spent {} {}es) -> {thermoses} thermoses, {briefcases} briefcases, bonus {:.2}%",
            unit.label(),
            offer.percent(),
            offer.threshold(),
            unit.label(),
            bonus * 100.0,
        ),
        Event::CommandRejected { command, reason } => {
            format!("rejected {command:?}: {reason:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{describe, replay, run_plan};
    use office_planner_core::{BonusRates, Command, Event};
    use office_planner_ledger::{query, PurchaseLedger};

    #[test]
    fn loop_terminates_once_the_ceiling_is_reached() {
        let mut ledger = PurchaseLedger::new();

        let commands = run_plan(&mut ledger, 50, |_, _| {}).expect("planning succeeds");

        assert!(query::thermoses(&ledger) >= 50);
        assert!(!commands.is_empty());
    }

    #[test]
    fn first_conversion_happens_after_eight_purchases() {
        let mut ledger = PurchaseLedger::with_config(
            BonusRates::new(0.01, 0.18),
            std::iter::empty(),
            std::iter::empty(),
        );

        let commands = run_plan(&mut ledger, 50, |_, _| {}).expect("planning succeeds");

        assert_eq!(&commands[..8], &[Command::BuyThermos; 8]);
        assert_eq!(commands[8], Command::ConvertBriefcase);
    }

    #[test]
    fn bonus_never_decreases_and_upgrades_fire_on_long_runs() {
        let mut ledger = PurchaseLedger::new();
        let mut previous = query::effective_bonus(&ledger);
        let mut upgrades_applied = 0_u32;

        let _ = run_plan(&mut ledger, 300, |_, events| {
            for event in events {
                let bonus = match event {
                    Event::ThermosPurchased { bonus, .. }
                    | Event::BriefcaseConverted { bonus, .. }
                    | Event::UpgradeApplied { bonus, .. } => *bonus,
                    Event::CommandRejected { .. } => return,
                };
                if matches!(event, Event::UpgradeApplied { .. }) {
                    upgrades_applied += 1;
                }
                assert!(
                    bonus >= previous,
                    "bonus regressed from {previous} to {bonus}",
                );
                previous = bonus;
            }
        })
        .expect("planning succeeds");

        assert!(
            upgrades_applied >= 1,
            "a 300-thermos run unlocks the first thermos upgrade",
        );
    }

    #[test]
    fn replay_of_a_planned_run_reaches_the_same_state() {
        let mut planned = PurchaseLedger::new();
        let commands = run_plan(&mut planned, 120, |_, _| {}).expect("planning succeeds");

        let mut replayed = PurchaseLedger::new();
        replay(&mut replayed, &commands, |_| {}).expect("replay succeeds");

        assert_eq!(query::thermoses(&replayed), query::thermoses(&planned));
        assert_eq!(query::briefcases(&replayed), query::briefcases(&planned));
        assert!(
            (query::effective_bonus(&replayed) - query::effective_bonus(&planned)).abs() < 1e-12,
        );
    }

    #[test]
    fn replay_rejects_an_unaffordable_conversion() {
        let mut ledger = PurchaseLedger::new();

        let result = replay(&mut ledger, &[Command::ConvertBriefcase], |_| {});

        assert!(result.is_err());
    }

    #[test]
    fn purchase_lines_carry_counts_and_bonus() {
        let line = describe(&Event::ThermosPurchased {
            thermoses: 9,
            briefcases: 0,
            bonus: 0.09,
        });

        assert_eq!(line, "+1 thermos -> 9 thermoses, 0 briefcases, bonus 9.00%");
    }
}
