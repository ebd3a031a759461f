#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Office Space purchase planner.
//!
//! This crate defines the message surface that connects the command-line
//! adapter, the authoritative purchase ledger, and the pure planning systems.
//! The adapter submits [`Command`] values describing desired purchases, the
//! ledger executes those commands via its `apply` entry point and broadcasts
//! [`Event`] values describing each transition. Systems consume immutable
//! [`LedgerSnapshot`] values and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Number of thermoses consumed when converting them into a single briefcase.
pub const THERMOSES_PER_BRIEFCASE: u32 = 8;

/// The two purchasable production unit types of the minigame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Tier-one unit bought one at a time with accumulated currency.
    Thermos,
    /// Tier-two unit obtained by converting [`THERMOSES_PER_BRIEFCASE`] thermoses.
    Briefcase,
}

impl UnitKind {
    /// Both unit kinds in the order upgrade queues are inspected.
    pub const ALL: [UnitKind; 2] = [UnitKind::Thermos, UnitKind::Briefcase];

    /// Lower-case noun used when reporting transitions to the player.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Thermos => "thermos",
            Self::Briefcase => "briefcase",
        }
    }
}

/// Commands that express all permissible ledger mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Purchases a single additional thermos.
    BuyThermos,
    /// Converts [`THERMOSES_PER_BRIEFCASE`] thermoses into one briefcase.
    ConvertBriefcase,
    /// Cashes in the head of a pending upgrade queue.
    ApplyUpgrade {
        /// Unit kind whose pending upgrade queue is consumed.
        unit: UnitKind,
    },
}

/// Events broadcast by the ledger after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a thermos was purchased.
    ThermosPurchased {
        /// Thermos count after the purchase.
        thermoses: u32,
        /// Briefcase count after the purchase.
        briefcases: u32,
        /// Effective bonus after the purchase.
        bonus: f64,
    },
    /// Confirms that thermoses were converted into a briefcase.
    BriefcaseConverted {
        /// Thermos count after the conversion.
        thermoses: u32,
        /// Briefcase count after the conversion.
        briefcases: u32,
        /// Effective bonus after the conversion.
        bonus: f64,
    },
    /// Confirms that a pending upgrade was cashed in.
    UpgradeApplied {
        /// Unit kind whose queue supplied the upgrade.
        unit: UnitKind,
        /// The offer that was consumed.
        offer: UpgradeOffer,
        /// Thermos count after deducting the unlock threshold.
        thermoses: u32,
        /// Briefcase count after deducting the unlock threshold.
        briefcases: u32,
        /// Effective bonus after the upgrade multiplier took effect.
        bonus: f64,
    },
    /// Reports that a command was rejected by the ledger.
    CommandRejected {
        /// The command that failed.
        command: Command,
        /// Specific reason the command was rejected.
        reason: RejectReason,
    },
}

/// Reasons a purchase command may be rejected by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Fewer than [`THERMOSES_PER_BRIEFCASE`] thermoses were available to convert.
    InsufficientThermoses,
    /// The targeted upgrade queue has no pending offers left.
    NoPendingUpgrade,
    /// The unit count has not reached the offer's unlock threshold.
    BelowThreshold,
    /// Applying the offer would not improve the effective bonus.
    NotImproving,
}

/// One-time percentage upgrade unlocked at a unit-count threshold.
///
/// Cashing in an offer spends `threshold` units of its kind and multiplies
/// the accumulated bonus by `1 + percent / 100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeOffer {
    threshold: u32,
    percent: u32,
}

impl UpgradeOffer {
    /// Creates a new offer from its unlock threshold and percentage bonus.
    #[must_use]
    pub const fn new(threshold: u32, percent: u32) -> Self {
        Self { threshold, percent }
    }

    /// Unit count required (and spent) to cash in the offer.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Percentage bonus granted by the offer.
    #[must_use]
    pub const fn percent(&self) -> u32 {
        self.percent
    }

    /// Factor applied to the effective bonus when the offer is cashed in.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        1.0 + f64::from(self.percent) / 100.0
    }
}

/// Per-unit bonus rates of the two production unit types.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusRates {
    thermos: f64,
    briefcase: f64,
}

impl BonusRates {
    /// Creates a rate pair with explicit per-unit bonuses.
    #[must_use]
    pub const fn new(thermos: f64, briefcase: f64) -> Self {
        Self { thermos, briefcase }
    }

    /// Bonus contributed by each owned thermos.
    #[must_use]
    pub const fn thermos(&self) -> f64 {
        self.thermos
    }

    /// Bonus contributed by each owned briefcase.
    #[must_use]
    pub const fn briefcase(&self) -> f64 {
        self.briefcase
    }
}

impl Default for BonusRates {
    fn default() -> Self {
        Self {
            thermos: 0.01,
            briefcase: 0.12,
        }
    }
}

/// Computes the pre-upgrade bonus for the provided unit counts.
///
/// Counts are accepted as `i64` so candidate evaluation can probe states such
/// as "eight fewer thermoses" without underflow; any negative count yields a
/// bonus of zero, which keeps impossible candidates from ever winning a
/// comparison.
#[must_use]
pub fn base_bonus(thermoses: i64, briefcases: i64, rates: BonusRates) -> f64 {
    if thermoses < 0 || briefcases < 0 {
        return 0.0;
    }

    (1.0 + thermoses as f64 * rates.thermos()) * (1.0 + briefcases as f64 * rates.briefcase()) - 1.0
}

/// Immutable snapshot of the purchase ledger consumed by planning systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LedgerSnapshot {
    /// Thermoses currently owned.
    pub thermoses: u32,
    /// Briefcases currently owned.
    pub briefcases: u32,
    /// Product of the multipliers of every upgrade applied so far.
    pub multiplier: f64,
    /// Effective bonus of the captured state.
    pub bonus: f64,
    /// Per-unit bonus rates the ledger was configured with.
    pub rates: BonusRates,
    /// Head of the pending thermos upgrade queue, if any.
    pub pending_thermos: Option<UpgradeOffer>,
    /// Head of the pending briefcase upgrade queue, if any.
    pub pending_briefcase: Option<UpgradeOffer>,
}

impl LedgerSnapshot {
    /// Count of the provided unit kind in the captured state.
    #[must_use]
    pub const fn count(&self, unit: UnitKind) -> u32 {
        match unit {
            UnitKind::Thermos => self.thermoses,
            UnitKind::Briefcase => self.briefcases,
        }
    }

    /// Head of the pending upgrade queue for the provided unit kind.
    #[must_use]
    pub const fn pending_head(&self, unit: UnitKind) -> Option<UpgradeOffer> {
        match unit {
            UnitKind::Thermos => self.pending_thermos,
            UnitKind::Briefcase => self.pending_briefcase,
        }
    }

    /// Effective bonus of a neighboring state sharing this snapshot's upgrades.
    #[must_use]
    pub fn probe(&self, thermoses: i64, briefcases: i64) -> f64 {
        base_bonus(thermoses, briefcases, self.rates) * self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::{base_bonus, BonusRates, Command, RejectReason, UnitKind, UpgradeOffer};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn negative_counts_yield_zero_bonus() {
        let rates = BonusRates::default();
        assert_eq!(base_bonus(-8, 1, rates), 0.0);
        assert_eq!(base_bonus(5, -1, rates), 0.0);
    }

    #[test]
    fn bonus_matches_minigame_formula() {
        let rates = BonusRates::new(0.01, 0.18);
        assert!((base_bonus(9, 0, rates) - 0.09).abs() < 1e-9);
        assert!((base_bonus(0, 1, rates) - 0.18).abs() < 1e-9);
        assert!((base_bonus(10, 2, rates) - (1.10 * 1.36 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn offer_multiplier_scales_with_percent() {
        assert!((UpgradeOffer::new(100, 100).multiplier() - 2.0).abs() < f64::EPSILON);
        assert!((UpgradeOffer::new(250, 250).multiplier() - 3.5).abs() < f64::EPSILON);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn unit_kind_round_trips_through_bincode() {
        assert_round_trip(&UnitKind::Briefcase);
    }

    #[test]
    fn command_round_trips_through_bincode() {
        assert_round_trip(&Command::ApplyUpgrade {
            unit: UnitKind::Thermos,
        });
    }

    #[test]
    fn reject_reason_round_trips_through_bincode() {
        assert_round_trip(&RejectReason::NotImproving);
    }

    #[test]
    fn upgrade_offer_round_trips_through_bincode() {
        assert_round_trip(&UpgradeOffer::new(150, 150));
    }
}
