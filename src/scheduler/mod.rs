mod assignment;
pub mod coverage;
pub mod quota;
pub mod rules;
mod types;

pub use coverage::{has_minimum_coverage, CoverageScope, Presence};
pub use quota::{remaining_quota, LeaveQuota, LeaveTally};
pub use rules::{check_holiday_coverage, check_month, HolidayFinding, RuleCheck, RuleViolation};
pub use types::{EngineOptions, SchedError};

use crate::calendar::YearMonth;
use crate::model::{Group, MonthConfig, Staff, StaffId};
use crate::schedule::Schedule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Moteur de congés automatiques : source d'aléa injectable + options.
#[derive(Debug)]
pub struct LeaveEngine<R = StdRng> {
    rng: R,
    options: EngineOptions,
}

impl LeaveEngine<StdRng> {
    /// Aléa système.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Tirages reproductibles.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for LeaveEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LeaveEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Recalcule les congés automatiques de `targets` sur `month`.
    ///
    /// Le planning d'entrée n'est pas modifié ; un nouvel instantané est
    /// retourné. Les cases manuelles sont conservées telles quelles et les
    /// identifiants inconnus sont ignorés.
    pub fn generate(
        &mut self,
        schedule: &Schedule,
        staff_list: &[Staff],
        groups: &[Group],
        config: &MonthConfig,
        targets: &[StaffId],
        month: YearMonth,
    ) -> Schedule {
        assignment::generate(
            schedule,
            staff_list,
            groups,
            config,
            targets,
            month,
            self.options,
            &mut self.rng,
        )
    }
}

/// Variante fonctionnelle avec mois `YYYY-MM` et options par défaut.
pub fn generate_auto_leaves<R: Rng + ?Sized>(
    schedule: &Schedule,
    staff_list: &[Staff],
    groups: &[Group],
    config: &MonthConfig,
    targets: &[StaffId],
    month: &str,
    rng: &mut R,
) -> Result<Schedule, SchedError> {
    let month: YearMonth = month.parse()?;
    Ok(assignment::generate(
        schedule,
        staff_list,
        groups,
        config,
        targets,
        month,
        EngineOptions::default(),
        rng,
    ))
}
