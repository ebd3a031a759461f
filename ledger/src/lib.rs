#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative purchase ledger for the Office Space planner.
//!
//! The ledger owns the unit counts, the pending and applied upgrade queues,
//! and the accumulated upgrade multiplier. Adapters mutate it exclusively
//! through [`apply`], which emits [`Event`] values describing each
//! transition; planning systems observe it through the read-only [`query`]
//! module.

use std::collections::VecDeque;

use office_planner_core::{
    base_bonus, BonusRates, Command, Event, RejectReason, UnitKind, UpgradeOffer,
    THERMOSES_PER_BRIEFCASE,
};

/// Thermos upgrade table of the minigame, in unlock order.
pub const DEFAULT_THERMOS_UPGRADES: [UpgradeOffer; 2] =
    [UpgradeOffer::new(100, 100), UpgradeOffer::new(200, 200)];

/// Briefcase upgrade table of the minigame, in unlock order.
pub const DEFAULT_BRIEFCASE_UPGRADES: [UpgradeOffer; 2] =
    [UpgradeOffer::new(150, 150), UpgradeOffer::new(250, 250)];

/// Represents the authoritative purchase state of a planning run.
#[derive(Clone, Debug)]
pub struct PurchaseLedger {
    thermoses: u32,
    briefcases: u32,
    rates: BonusRates,
    multiplier: f64,
    pending_thermos: VecDeque<UpgradeOffer>,
    pending_briefcase: VecDeque<UpgradeOffer>,
    applied_thermos: Vec<UpgradeOffer>,
    applied_briefcase: Vec<UpgradeOffer>,
}

impl PurchaseLedger {
    /// Creates a ledger seeded with the minigame's default rates and tables.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(
            BonusRates::default(),
            DEFAULT_THERMOS_UPGRADES,
            DEFAULT_BRIEFCASE_UPGRADES,
        )
    }

    /// Creates a ledger with explicit rates and pending upgrade tables.
    #[must_use]
    pub fn with_config(
        rates: BonusRates,
        thermos_upgrades: impl IntoIterator<Item = UpgradeOffer>,
        briefcase_upgrades: impl IntoIterator<Item = UpgradeOffer>,
    ) -> Self {
        Self {
            thermoses: 0,
            briefcases: 0,
            rates,
            multiplier: 1.0,
            pending_thermos: thermos_upgrades.into_iter().collect(),
            pending_briefcase: briefcase_upgrades.into_iter().collect(),
            applied_thermos: Vec::new(),
            applied_briefcase: Vec::new(),
        }
    }

    fn effective_bonus(&self) -> f64 {
        base_bonus(
            i64::from(self.thermoses),
            i64::from(self.briefcases),
            self.rates,
        ) * self.multiplier
    }

    fn count(&self, unit: UnitKind) -> u32 {
        match unit {
            UnitKind::Thermos => self.thermoses,
            UnitKind::Briefcase => self.briefcases,
        }
    }

    fn pending(&self, unit: UnitKind) -> &VecDeque<UpgradeOffer> {
        match unit {
            UnitKind::Thermos => &self.pending_thermos,
            UnitKind::Briefcase => &self.pending_briefcase,
        }
    }

    fn pending_mut(&mut self, unit: UnitKind) -> &mut VecDeque<UpgradeOffer> {
        match unit {
            UnitKind::Thermos => &mut self.pending_thermos,
            UnitKind::Briefcase => &mut self.pending_briefcase,
        }
    }

    fn applied_mut(&mut self, unit: UnitKind) -> &mut Vec<UpgradeOffer> {
        match unit {
            UnitKind::Thermos => &mut self.applied_thermos,
            UnitKind::Briefcase => &mut self.applied_briefcase,
        }
    }

    /// Unit counts remaining after spending an offer's unlock threshold.
    fn counts_after_spend(&self, unit: UnitKind, threshold: u32) -> (i64, i64) {
        let thermoses = i64::from(self.thermoses);
        let briefcases = i64::from(self.briefcases);
        match unit {
            UnitKind::Thermos => (thermoses - i64::from(threshold), briefcases),
            UnitKind::Briefcase => (thermoses, briefcases - i64::from(threshold)),
        }
    }
}

impl Default for PurchaseLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the ledger, mutating state deterministically.
pub fn apply(ledger: &mut PurchaseLedger, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BuyThermos => {
            ledger.thermoses += 1;
            out_events.push(Event::ThermosPurchased {
                thermoses: ledger.thermoses,
                briefcases: ledger.briefcases,
                bonus: ledger.effective_bonus(),
            });
        }
        Command::ConvertBriefcase => {
            if ledger.thermoses < THERMOSES_PER_BRIEFCASE {
                out_events.push(Event::CommandRejected {
                    command,
                    reason: RejectReason::InsufficientThermoses,
                });
                return;
            }

            ledger.thermoses -= THERMOSES_PER_BRIEFCASE;
            ledger.briefcases += 1;
            out_events.push(Event::BriefcaseConverted {
                thermoses: ledger.thermoses,
                briefcases: ledger.briefcases,
                bonus: ledger.effective_bonus(),
            });
        }
        Command::ApplyUpgrade { unit } => {
            let Some(offer) = ledger.pending(unit).front().copied() else {
                out_events.push(Event::CommandRejected {
                    command,
                    reason: RejectReason::NoPendingUpgrade,
                });
                return;
            };

            if ledger.count(unit) < offer.threshold() {
                out_events.push(Event::CommandRejected {
                    command,
                    reason: RejectReason::BelowThreshold,
                });
                return;
            }

            let (thermoses, briefcases) = ledger.counts_after_spend(unit, offer.threshold());
            let upgraded =
                base_bonus(thermoses, briefcases, ledger.rates) * ledger.multiplier * offer.multiplier();
            if upgraded <= ledger.effective_bonus() {
                out_events.push(Event::CommandRejected {
                    command,
                    reason: RejectReason::NotImproving,
                });
                return;
            }

            match unit {
                UnitKind::Thermos => ledger.thermoses -= offer.threshold(),
                UnitKind::Briefcase => ledger.briefcases -= offer.threshold(),
            }
            ledger.multiplier *= offer.multiplier();
            let _ = ledger.pending_mut(unit).pop_front();
            ledger.applied_mut(unit).push(offer);

            out_events.push(Event::UpgradeApplied {
                unit,
                offer,
                thermoses: ledger.thermoses,
                briefcases: ledger.briefcases,
                bonus: ledger.effective_bonus(),
            });
        }
    }
}

/// Query functions that provide read-only access to the ledger state.
pub mod query {
    use super::PurchaseLedger;
    use office_planner_core::{LedgerSnapshot, UnitKind, UpgradeOffer};

    /// Thermoses currently owned.
    #[must_use]
    pub fn thermoses(ledger: &PurchaseLedger) -> u32 {
        ledger.thermoses
    }

    /// Briefcases currently owned.
    #[must_use]
    pub fn briefcases(ledger: &PurchaseLedger) -> u32 {
        ledger.briefcases
    }

    /// Effective bonus of the current state.
    #[must_use]
    pub fn effective_bonus(ledger: &PurchaseLedger) -> f64 {
        ledger.effective_bonus()
    }

    /// Upgrades already cashed in for the provided unit kind, in application order.
    #[must_use]
    pub fn applied_upgrades(ledger: &PurchaseLedger, unit: UnitKind) -> &[UpgradeOffer] {
        match unit {
            UnitKind::Thermos => &ledger.applied_thermos,
            UnitKind::Briefcase => &ledger.applied_briefcase,
        }
    }

    /// Number of offers still pending for the provided unit kind.
    #[must_use]
    pub fn pending_upgrade_count(ledger: &PurchaseLedger, unit: UnitKind) -> usize {
        ledger.pending(unit).len()
    }

    /// Captures a read-only snapshot for the planning systems.
    #[must_use]
    pub fn snapshot(ledger: &PurchaseLedger) -> LedgerSnapshot {
        LedgerSnapshot {
            thermoses: ledger.thermoses,
            briefcases: ledger.briefcases,
            multiplier: ledger.multiplier,
            bonus: ledger.effective_bonus(),
            rates: ledger.rates,
            pending_thermos: ledger.pending(UnitKind::Thermos).front().copied(),
            pending_briefcase: ledger.pending(UnitKind::Briefcase).front().copied(),
        }
    }
}
