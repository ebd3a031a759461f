#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that cashes in pending upgrades once they pay for themselves.

use office_planner_core::{Command, LedgerSnapshot, UnitKind};

/// Upgrade system that emits `Command::ApplyUpgrade` for profitable offers.
///
/// Queues are consumed strictly from the head, thermos queue first. An offer
/// is proposed only when the unit count has reached its unlock threshold and
/// spending the threshold still leaves the effective bonus strictly higher.
#[derive(Debug, Default)]
pub struct UpgradeWatch;

impl UpgradeWatch {
    /// Creates a new upgrade watch system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits a command for the first pending offer that is affordable and improving.
    ///
    /// At most one command is pushed per call; the driving loop re-snapshots
    /// the ledger after every applied command, so a second profitable offer is
    /// picked up on the following pass against fresh counts.
    pub fn handle(&self, snapshot: &LedgerSnapshot, out: &mut Vec<Command>) {
        for unit in UnitKind::ALL {
            let Some(offer) = snapshot.pending_head(unit) else {
                continue;
            };

            if snapshot.count(unit) < offer.threshold() {
                continue;
            }

            let thermoses = i64::from(snapshot.thermoses);
            let briefcases = i64::from(snapshot.briefcases);
            let spent = i64::from(offer.threshold());
            let upgraded = match unit {
                UnitKind::Thermos => snapshot.probe(thermoses - spent, briefcases),
                UnitKind::Briefcase => snapshot.probe(thermoses, briefcases - spent),
            } * offer.multiplier();

            if upgraded > snapshot.bonus {
                out.push(Command::ApplyUpgrade { unit });
                return;
            }
        }
    }
}
