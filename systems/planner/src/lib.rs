#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure greedy planning system that picks the best one-step purchase.

use office_planner_core::{Command, LedgerSnapshot, THERMOSES_PER_BRIEFCASE};

/// One-step purchase decision together with the candidate bonuses compared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    /// Command the planner selected.
    pub command: Command,
    /// Effective bonus reached by buying one more thermos.
    pub buy_bonus: f64,
    /// Effective bonus reached by converting eight thermoses into a briefcase.
    pub convert_bonus: f64,
}

/// Greedy one-step-lookahead planner over ledger snapshots.
///
/// The planner only weighs buying against converting; profitable upgrades are
/// the upgrade system's concern and take precedence in the driving loop.
#[derive(Debug, Default)]
pub struct GreedyPlanner;

impl GreedyPlanner {
    /// Creates a new greedy planner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates both one-step candidates for the provided snapshot.
    ///
    /// Buying wins strictly; a tie converts. A conversion candidate with fewer than
    /// [`THERMOSES_PER_BRIEFCASE`] thermoses probes to a zero bonus and can
    /// therefore never win against a purchase.
    #[must_use]
    pub fn decide(&self, snapshot: &LedgerSnapshot) -> Decision {
        let thermoses = i64::from(snapshot.thermoses);
        let briefcases = i64::from(snapshot.briefcases);

        let buy_bonus = snapshot.probe(thermoses + 1, briefcases);
        let convert_bonus = snapshot.probe(
            thermoses - i64::from(THERMOSES_PER_BRIEFCASE),
            briefcases + 1,
        );

        let command = if buy_bonus > convert_bonus {
            Command::BuyThermos
        } else {
            Command::ConvertBriefcase
        };

        Decision {
            command,
            buy_bonus,
            convert_bonus,
        }
    }

    /// Emits the winning purchase command for the provided snapshot.
    pub fn handle(&self, snapshot: &LedgerSnapshot, out: &mut Vec<Command>) {
        out.push(self.decide(snapshot).command);
    }
}
